// Formatting and argument-binding helpers shared by the emitters.

use crate::{CodegenError, CodegenResult};
use parser::ast::{Expr, Span};

/// Significant digits the calculator keeps for a real
const TI_DIGITS: usize = 14;

/// Calculator largest magnitude
const TI_MAX: f64 = 1e100;

/// Reject reals the calculator cannot store
pub(crate) fn check_range(value: f64, span: &Span) -> CodegenResult<f64> {
    if value.is_finite() && value.abs() < TI_MAX {
        Ok(value)
    } else {
        Err(CodegenError::invalid(
            format_number(value),
            "number is outside the calculator's range (|x| < 1ᴇ100)",
            span,
        ))
    }
}

/// Render a real the way the program editor expects it:
/// `⁻` for negation and `ᴇ` for the exponent.
pub fn format_number(value: f64) -> String {
    if value == 0.0 {
        return "0".to_string();
    }
    let rounded: f64 = format!("{:.*e}", TI_DIGITS - 1, value)
        .parse()
        .unwrap_or(value);

    let magnitude = rounded.abs();
    let text = if magnitude >= 1e10 || magnitude < 1e-4 {
        let formatted = format!("{:e}", magnitude);
        formatted.replacen('e', "ᴇ", 1).replace('-', "⁻")
    } else {
        format!("{}", magnitude)
    };

    if rounded < 0.0 {
        format!("⁻{}", text)
    } else {
        text
    }
}

/// Upper-case calculator program name: ASCII alphanumerics only,
/// starting with a letter, at most 8 characters.
pub fn program_name(name: &str) -> Option<String> {
    let cleaned: String = name
        .chars()
        .filter(|c| c.is_ascii_alphanumeric())
        .map(|c| c.to_ascii_uppercase())
        .take(8)
        .collect();
    match cleaned.chars().next() {
        Some(c) if c.is_ascii_alphabetic() => Some(cleaned),
        _ => None,
    }
}

/// One slot per declared parameter; `None` means "use the default"
pub(crate) struct BoundArgs<'e> {
    pub slots: Vec<Option<&'e Expr>>,
    pub rest: Vec<&'e Expr>,
}

/// Match call arguments to parameters: positional first, then keywords,
/// then defaults for whatever is left.
pub(crate) fn bind_args<'e>(
    callee: &str,
    params: &[(&str, bool)],
    variadic: bool,
    args: &'e [Expr],
    kwargs: &'e [(String, Expr)],
    span: &Span,
) -> CodegenResult<BoundArgs<'e>> {
    let mut slots: Vec<Option<&Expr>> = vec![None; params.len()];
    let mut rest = Vec::new();

    for (i, arg) in args.iter().enumerate() {
        if i < params.len() {
            slots[i] = Some(arg);
        } else if variadic {
            rest.push(arg);
        } else {
            return Err(CodegenError::invalid(
                format!("{}()", callee),
                format!("takes at most {} arguments, got {}", params.len(), args.len()),
                &arg.span,
            ));
        }
    }

    for (name, value) in kwargs {
        let Some(index) = params.iter().position(|(p, _)| p == name) else {
            return Err(CodegenError::invalid(
                format!("{}()", callee),
                format!("unknown keyword argument '{}'", name),
                &value.span,
            ));
        };
        if slots[index].is_some() {
            return Err(CodegenError::invalid(
                format!("{}()", callee),
                format!("argument '{}' given more than once", name),
                &value.span,
            ));
        }
        slots[index] = Some(value);
    }

    for (slot, (name, has_default)) in slots.iter().zip(params) {
        if slot.is_none() && !has_default {
            return Err(CodegenError::MissingValue {
                what: format!("argument '{}'", name),
                context: format!("call to {}()", callee),
                span: Some(span.clone()),
            });
        }
    }

    Ok(BoundArgs { slots, rest })
}
