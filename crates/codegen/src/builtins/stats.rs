// Probability & statistics distributions

use super::{Builtin, Category, ParamType};
use crate::types::CrunchType::Float;

pub(crate) fn builtins() -> Vec<Builtin> {
    use ParamType::{Float as F, Int as I};
    let c = Category::Stats;

    vec![
        Builtin::call(c, "normal_cdf", "normalcdf({0},{1},{2},{3})", Float)
            .param("lower", F)
            .param("upper", F)
            .param_default("mean", F, "0")
            .param_default("std", F, "1"),
        Builtin::call(c, "inv_norm", "invNorm({0},{1},{2})", Float)
            .param("p", F)
            .param_default("mean", F, "0")
            .param_default("std", F, "1"),
        Builtin::call(c, "t_cdf", "tcdf({0},{1},{2})", Float)
            .param("lower", F)
            .param("upper", F)
            .param("df", I),
        Builtin::call(c, "inv_t", "invT({0},{1})", Float).param("p", F).param("df", I),
        Builtin::call(c, "chi2_cdf", "χ²cdf({0},{1},{2})", Float)
            .param("lower", F)
            .param("upper", F)
            .param("df", I),
        Builtin::call(c, "f_cdf", "Fcdf({0},{1},{2},{3})", Float)
            .param("lower", F)
            .param("upper", F)
            .param("df1", I)
            .param("df2", I),
        Builtin::call(c, "binom_pdf", "binompdf({0},{1},{2})", Float)
            .param("n", I)
            .param("p", F)
            .param("x", I),
        Builtin::call(c, "binom_cdf", "binomcdf({0},{1},{2})", Float)
            .param("n", I)
            .param("p", F)
            .param("x", I),
        Builtin::call(c, "poisson_pdf", "poissonpdf({0},{1})", Float).param("lam", F).param("x", I),
        Builtin::call(c, "poisson_cdf", "poissoncdf({0},{1})", Float).param("lam", F).param("x", I),
        Builtin::call(c, "geomet_pdf", "geometpdf({0},{1})", Float).param("p", F).param("x", I),
        Builtin::call(c, "geomet_cdf", "geometcdf({0},{1})", Float).param("p", F).param("x", I),
        Builtin::call(c, "normal_pdf", "normalpdf({0},{1},{2})", Float)
            .param("x", F)
            .param_default("mean", F, "0")
            .param_default("std", F, "1"),
        Builtin::call(c, "t_pdf", "tpdf({0},{1})", Float).param("x", F).param("df", I),
        Builtin::call(c, "chi2_pdf", "χ²pdf({0},{1})", Float).param("x", F).param("df", I),
        Builtin::call(c, "f_pdf", "Fpdf({0},{1},{2})", Float)
            .param("x", F)
            .param("df1", I)
            .param("df2", I),
    ]
}
