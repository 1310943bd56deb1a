// Matrix and Complex class methods
//
// `{self}` in a template is the receiver: the matrix variable (`[A]`) or the
// complex expression the method was called on.

use super::{Builtin, Category, Emit, ParamType, Returns};
use crate::expr::Prec;
use crate::types::CrunchType;
use parser::ast::BinaryOp;

pub(crate) fn matrix_methods() -> Vec<Builtin> {
    use ParamType::{Float, Int};
    let c = Category::MatrixMethod;

    vec![
        Builtin::statement(c, "set_element", "{2}→{self}({0},{1})")
            .param("row", Int)
            .param("col", Int)
            .param("val", Float)
            .note("val→[A](row,col)")
            .on_variable(),
        Builtin::call(c, "get_element", "{self}({0},{1})", CrunchType::Float)
            .param("row", Int)
            .param("col", Int)
            .note("[A](row,col)")
            .on_variable(),
        Builtin::call(c, "dimensions", "dim({self})", CrunchType::IntList).note("dim([A])"),
        Builtin::call(c, "determinant", "det({self})", CrunchType::Float).note("det([A])"),
        Builtin::new(
            c,
            "inverse",
            Returns::Fixed(CrunchType::Matrix),
            Emit::Operator("{self}⁻¹", Prec::Power),
        )
        .note("[A]^-1"),
    ]
}

pub(crate) fn complex_methods() -> Vec<Builtin> {
    let c = Category::ComplexMethod;
    let arithmetic = |name, op| {
        Builtin::new(c, name, Returns::Fixed(CrunchType::Complex), Emit::Binary(op))
            .param("other", ParamType::Complex)
    };

    vec![
        arithmetic("add", BinaryOp::Add),
        arithmetic("sub", BinaryOp::Sub),
        arithmetic("mul", BinaryOp::Mul),
        arithmetic("div", BinaryOp::Div),
        Builtin::call(c, "conjugate", "conj({self})", CrunchType::Complex),
        Builtin::call(c, "modulus", "abs({self})", CrunchType::Float),
        Builtin::call(c, "argument", "angle({self})", CrunchType::Float),
    ]
}
