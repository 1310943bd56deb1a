// Matrix operations

use super::{Builtin, Category, Emit, ParamType, Returns};
use crate::expr::Prec;
use crate::types::CrunchType::{Float, Matrix};

pub(crate) fn builtins() -> Vec<Builtin> {
    let c = Category::Matrix;
    let m = ParamType::Matrix;

    vec![
        Builtin::call(c, "det", "det({0})", Float).param("matrix", m),
        Builtin::call(c, "identity", "identity({0})", Matrix).param("n", ParamType::Int),
        Builtin::call(c, "ref", "ref({0})", Matrix).param("matrix", m),
        Builtin::call(c, "rref", "rref({0})", Matrix).param("matrix", m),
        Builtin::new(c, "transpose", Returns::Fixed(Matrix), Emit::Operator("{0}ᵀ", Prec::Power)).param("matrix", m),
        Builtin::new(c, "inv", Returns::Fixed(Matrix), Emit::Operator("{0}⁻¹", Prec::Power)).param("matrix", m),
        // Sum of the diagonal; θ is kept out of the variable pool for this
        Builtin::call(c, "trace", "sum(seq({0}(θ,θ),θ,1,min(dim({0}))))", Float)
            .param("matrix", ParamType::MatrixVar),
    ]
}
