// Math library functions (numeric, trigonometric, complex)

use super::{Builtin, Category, Emit, ParamType, Returns};
use crate::expr::Prec;
use crate::types::CrunchType::{Complex, Float, Int};

pub(crate) fn constants() -> Vec<Builtin> {
    vec![
        Builtin::call(Category::Constants, "i", "i", Complex),
        Builtin::call(Category::Constants, "pi", "π", Float),
    ]
}

pub(crate) fn numeric() -> Vec<Builtin> {
    use ParamType::{Float as F, Int as I};
    let c = Category::Numeric;

    vec![
        Builtin::call(c, "abs", "abs({0})", Float).param("x", F).returning_same_as(0),
        Builtin::call(c, "floor", "int({0})", Int).param("x", F),
        Builtin::call(c, "int_part", "iPart({0})", Int).param("x", F),
        // Name as published in crunch_lib
        Builtin::call(c, "fracton_part", "fPart({0})", Float).param("x", F),
        Builtin::call(c, "round", "round({0},{1})", Float)
            .param("x", F)
            .param_default("digits", I, "0"),
        Builtin::call(c, "sqrt", "√({0})", Float).param("x", F),
        Builtin::call(c, "cbrt", "³√({0})", Float).param("x", F),
        Builtin::new(c, "root", Returns::Fixed(Float), Emit::Operator("{1}ˣ√{0}", Prec::Power))
            .param("x", F)
            .param("n", F),
        Builtin::call(c, "log", "log({0})", Float).param("x", F),
        Builtin::call(c, "ln", "ln({0})", Float).param("x", F),
        Builtin::call(c, "exp", "e^({0})", Float).param("x", F),
        Builtin::call(c, "pow10", "₁₀^({0})", Float).param("x", F),
        Builtin::call(c, "random", "rand", Float),
        Builtin::call(c, "rand_int", "randInt({0},{1})", Int)
            .param("low", I)
            .param("high", I),
        Builtin::call(c, "rand_binomial", "randBin({0},{1},{2})", Int)
            .param("n", I)
            .param("p", F)
            .param("rep", I),
        Builtin::new(c, "permutation", Returns::Fixed(Int), Emit::Operator("{0} nPr {1}", Prec::Product))
            .param("n", I)
            .param("r", I),
        Builtin::new(c, "combination", Returns::Fixed(Int), Emit::Operator("{0} nCr {1}", Prec::Product))
            .param("n", I)
            .param("r", I),
        Builtin::new(c, "factorial", Returns::Fixed(Int), Emit::Operator("{0}!", Prec::Power)).param("n", I),
        Builtin::call(c, "min", "min({{*}})", Float).variadic("args", F),
        Builtin::call(c, "max", "max({{*}})", Float).variadic("args", F),
        Builtin::call(c, "gcd", "gcd({0},{1})", Int).param("a", I).param("b", I),
        Builtin::call(c, "lcm", "lcm({0},{1})", Int).param("a", I).param("b", I),
        Builtin::call(c, "remainder", "remainder({0},{1})", Int)
            .param("a", I)
            .param("b", I),
    ]
}

pub(crate) fn trigonometry() -> Vec<Builtin> {
    const FORMS: [(&str, &str); 12] = [
        ("sin", "sin({0})"),
        ("cos", "cos({0})"),
        ("tan", "tan({0})"),
        ("arcsin", "sin⁻¹({0})"),
        ("arccos", "cos⁻¹({0})"),
        ("arctan", "tan⁻¹({0})"),
        ("sinh", "sinh({0})"),
        ("cosh", "cosh({0})"),
        ("tanh", "tanh({0})"),
        ("arcsinh", "sinh⁻¹({0})"),
        ("arccosh", "cosh⁻¹({0})"),
        ("arctanh", "tanh⁻¹({0})"),
    ];

    FORMS
        .iter()
        .map(|&(name, template)| {
            Builtin::call(Category::Trigonometry, name, template, Float).param("x", ParamType::Float)
        })
        .collect()
}

pub(crate) fn complex() -> Vec<Builtin> {
    let c = Category::Complex;
    let x = ParamType::Complex;

    vec![
        Builtin::call(c, "conj", "conj({0})", Complex).param("x", x),
        Builtin::call(c, "real", "real({0})", Float).param("x", x),
        Builtin::call(c, "imag", "imag({0})", Float).param("x", x),
        Builtin::call(c, "angle", "angle({0})", Float).param("x", x),
        Builtin::call(c, "magnitude", "abs({0})", Float).param("x", x),
    ]
}
