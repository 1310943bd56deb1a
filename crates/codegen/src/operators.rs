// Arithmetic, comparison and logical operators
//
// Python operators map onto TI-BASIC tokens; constant operands are folded
// so `2 * 3` reaches the calculator as `6`.

use crate::complex::Complex;
use crate::expr::{Emitted, Prec};
use crate::helpers::check_range;
use crate::{CodegenError, CodegenResult, CrunchType};
use parser::ast::{BinaryOp, Span, UnaryOp};

fn symbol(op: BinaryOp) -> &'static str {
    match op {
        BinaryOp::Add => "+",
        BinaryOp::Sub => "-",
        BinaryOp::Mul => "*",
        BinaryOp::Div => "/",
        BinaryOp::Pow => "^",
        BinaryOp::Eq => "=",
        BinaryOp::NotEq => "≠",
        BinaryOp::Lt => "<",
        BinaryOp::Gt => ">",
        BinaryOp::LtEq => "≤",
        BinaryOp::GtEq => "≥",
        BinaryOp::LogicalAnd => " and ",
        BinaryOp::LogicalOr => " or ",
        BinaryOp::FloorDiv => "//",
        BinaryOp::Mod => "%",
    }
}

fn precedence(op: BinaryOp) -> Prec {
    match op {
        BinaryOp::LogicalOr => Prec::Or,
        BinaryOp::LogicalAnd => Prec::And,
        BinaryOp::Eq | BinaryOp::NotEq | BinaryOp::Lt | BinaryOp::Gt | BinaryOp::LtEq | BinaryOp::GtEq => {
            Prec::Compare
        }
        BinaryOp::Add | BinaryOp::Sub => Prec::Sum,
        BinaryOp::Mul | BinaryOp::Div => Prec::Product,
        BinaryOp::Pow => Prec::Power,
        BinaryOp::FloorDiv | BinaryOp::Mod => Prec::Atom,
    }
}

/// `lhs op rhs` with TI grouping: operators are left-associative, so the
/// right operand is wrapped at equal strength too.
fn infix(lhs: &Emitted, op: BinaryOp, rhs: &Emitted, ty: CrunchType) -> Emitted {
    let prec = precedence(op);
    let rhs_code = if rhs.prec <= prec {
        format!("({})", rhs.code)
    } else {
        rhs.code.clone()
    };
    Emitted::new(format!("{}{}{}", lhs.wrapped(prec), symbol(op), rhs_code), ty, prec)
}

fn type_error(op: BinaryOp, lhs: &Emitted, rhs: &Emitted, span: &Span) -> CodegenError {
    CodegenError::TypeError {
        expected: "compatible operands".to_string(),
        found: format!("{} {} {}", lhs.ty, symbol(op).trim(), rhs.ty),
        context: "binary expression".to_string(),
        span: Some(span.clone()),
    }
}

/// Result type of an arithmetic operator, `None` when the operands don't mix
fn arithmetic_type(op: BinaryOp, lhs: CrunchType, rhs: CrunchType) -> Option<CrunchType> {
    use CrunchType::{Float, Int, Matrix, Str};
    let (lhs, rhs) = (lhs.arithmetic(), rhs.arithmetic());

    match (lhs, rhs) {
        (Str, Str) if op == BinaryOp::Add => Some(Str),
        (Matrix, Matrix) if matches!(op, BinaryOp::Add | BinaryOp::Sub | BinaryOp::Mul) => Some(Matrix),
        (Matrix, s) | (s, Matrix) if op == BinaryOp::Mul && s.is_real() => Some(Matrix),
        (Matrix, Int) if op == BinaryOp::Pow => Some(Matrix),
        (Matrix, _) | (_, Matrix) => None,
        (l, r) if l.is_list() || r.is_list() => {
            let le = l.element().unwrap_or(l);
            let re = r.element().unwrap_or(r);
            let elem = arithmetic_type(op, le, re)?;
            if op == BinaryOp::Pow && !elem.is_numeric() {
                return None;
            }
            elem.list_of()
        }
        (l, r) if l.is_numeric() && r.is_numeric() => {
            let unified = CrunchType::unify(l, r)?;
            match op {
                BinaryOp::Div if unified == Int => Some(Float),
                _ => Some(unified),
            }
        }
        _ => None,
    }
}

/// Fold two known numbers, `None` when the calculator should do it
fn fold(op: BinaryOp, l: Complex, r: Complex, ty: CrunchType) -> Option<Emitted> {
    let value = match op {
        BinaryOp::Add => l + r,
        BinaryOp::Sub => l - r,
        BinaryOp::Mul => l * r,
        BinaryOp::Div => l.checked_div(r)?,
        BinaryOp::Pow if l.is_real() && r.is_real() => {
            if l.real < 0.0 && r.real.fract() != 0.0 {
                return None;
            }
            Complex::from_real(l.real.powf(r.real))
        }
        // Python and TI disagree on negative operands; leave those to runtime
        BinaryOp::FloorDiv if l.is_real() && r.is_real() && l.real >= 0.0 && r.real > 0.0 => {
            Complex::from_real((l.real / r.real).floor())
        }
        BinaryOp::Mod if l.is_real() && r.is_real() && l.real >= 0.0 && r.real > 0.0 => {
            Complex::from_real(l.real % r.real)
        }
        _ => return None,
    };
    Some(Emitted::constant(value, ty))
}

/// Folded result of two constant operands, range-checked like a literal
fn fold_constants(
    op: BinaryOp,
    lhs: &Emitted,
    rhs: &Emitted,
    ty: CrunchType,
    span: &Span,
) -> CodegenResult<Option<Emitted>> {
    let (Some(l), Some(r)) = (lhs.value, rhs.value) else {
        return Ok(None);
    };
    match fold(op, l, r, ty) {
        Some(folded) => {
            if let Some(v) = folded.value {
                check_range(v.real, span)?;
                check_range(v.imag, span)?;
            }
            Ok(Some(folded))
        }
        None => Ok(None),
    }
}

pub fn binary(op: BinaryOp, lhs: Emitted, rhs: Emitted, span: &Span) -> CodegenResult<Emitted> {
    match op {
        BinaryOp::LogicalAnd | BinaryOp::LogicalOr => {
            if !lhs.ty.is_real() || !rhs.ty.is_real() {
                return Err(type_error(op, &lhs, &rhs, span));
            }
            Ok(infix(&lhs, op, &rhs, CrunchType::Bool))
        }

        BinaryOp::Eq | BinaryOp::NotEq => {
            let comparable = (lhs.ty.is_numeric() && rhs.ty.is_numeric())
                || (lhs.ty == CrunchType::Str && rhs.ty == CrunchType::Str);
            if !comparable {
                return Err(type_error(op, &lhs, &rhs, span));
            }
            Ok(infix(&lhs, op, &rhs, CrunchType::Bool))
        }

        BinaryOp::Lt | BinaryOp::Gt | BinaryOp::LtEq | BinaryOp::GtEq => {
            if !lhs.ty.is_real() || !rhs.ty.is_real() {
                return Err(type_error(op, &lhs, &rhs, span));
            }
            Ok(infix(&lhs, op, &rhs, CrunchType::Bool))
        }

        BinaryOp::FloorDiv | BinaryOp::Mod => {
            if !lhs.ty.is_real() || !rhs.ty.is_real() {
                return Err(type_error(op, &lhs, &rhs, span));
            }
            check_divisor(op, &rhs, span)?;
            let ty = if CrunchType::Int.is_assignable_from(&lhs.ty) && CrunchType::Int.is_assignable_from(&rhs.ty) {
                CrunchType::Int
            } else {
                CrunchType::Float
            };
            if let Some(folded) = fold_constants(op, &lhs, &rhs, ty, span)? {
                return Ok(folded);
            }
            let code = if op == BinaryOp::Mod {
                format!("remainder({},{})", lhs.code, rhs.code)
            } else {
                let quotient = infix(&lhs, BinaryOp::Div, &rhs, CrunchType::Float);
                format!("int({})", quotient.code)
            };
            Ok(Emitted::new(code, ty, Prec::Atom))
        }

        BinaryOp::Add | BinaryOp::Sub | BinaryOp::Mul | BinaryOp::Div | BinaryOp::Pow => {
            let mut ty = arithmetic_type(op, lhs.ty, rhs.ty).ok_or_else(|| type_error(op, &lhs, &rhs, span))?;
            if op == BinaryOp::Div {
                check_divisor(op, &rhs, span)?;
            }
            // int ** negative int is a float in Python
            if op == BinaryOp::Pow && ty == CrunchType::Int && rhs.int_value().is_none_or(|k| k < 0) {
                ty = CrunchType::Float;
            }
            if let Some(folded) = fold_constants(op, &lhs, &rhs, ty, span)? {
                return Ok(folded);
            }
            Ok(infix(&lhs, op, &rhs, ty))
        }
    }
}

fn check_divisor(op: BinaryOp, rhs: &Emitted, span: &Span) -> CodegenResult<()> {
    if rhs.value == Some(Complex::default()) {
        return Err(CodegenError::invalid(
            symbol(op).trim(),
            "division by zero",
            span,
        ));
    }
    Ok(())
}

pub fn unary(op: UnaryOp, operand: Emitted, span: &Span) -> CodegenResult<Emitted> {
    let numeric_like = operand.ty.is_numeric() || operand.ty.is_list() || operand.ty == CrunchType::Matrix;

    match op {
        UnaryOp::Plus | UnaryOp::Negate if !numeric_like => Err(CodegenError::mismatch(
            "number",
            operand.ty,
            "unary expression",
            span,
        )),
        UnaryOp::Plus => Ok(Emitted {
            ty: operand.ty.arithmetic(),
            ..operand
        }),
        UnaryOp::Negate => {
            let ty = operand.ty.arithmetic();
            if let Some(v) = operand.value {
                return Ok(Emitted::constant(-v, ty));
            }
            Ok(Emitted::new(format!("⁻{}", operand.wrapped(Prec::Negate)), ty, Prec::Negate))
        }
        UnaryOp::Not => {
            if !operand.ty.is_real() {
                return Err(CodegenError::mismatch("bool", operand.ty, "not", span));
            }
            if let Some(v) = operand.value {
                let flipped = if v.real == 0.0 { 1.0 } else { 0.0 };
                return Ok(Emitted::constant(Complex::from_real(flipped), CrunchType::Bool));
            }
            Ok(Emitted::new(format!("not({})", operand.code), CrunchType::Bool, Prec::Atom))
        }
    }
}
