// crunch_lib.py generation
//
// Editors and type checkers see the catalogue through this declaration-only
// module; every body is `pass`.

use super::{catalogue, complex_methods, matrix_methods, Builtin, Category, Param, Returns};
use crate::symbols::MATRIX_LABELS;
use crate::types::CrunchType;

const BANNER: &str = "# ===============================";

fn python_type(ty: &CrunchType) -> &'static str {
    match ty {
        CrunchType::Int => "int",
        CrunchType::Float => "float",
        CrunchType::Bool => "bool",
        CrunchType::Str => "str",
        CrunchType::Complex => "complex",
        CrunchType::IntList | CrunchType::FloatList | CrunchType::ComplexList => "list",
        CrunchType::Matrix => "list[list]",
        CrunchType::None => "None",
    }
}

fn param_text(param: &Param) -> String {
    let mut text = param.name.to_string();
    if let Some(ty) = param.ty.python() {
        text.push_str(": ");
        text.push_str(ty);
    }
    if let Some(default) = param.default {
        text.push_str(" = ");
        text.push_str(default);
    }
    text
}

fn return_text(builtin: &Builtin) -> &'static str {
    match builtin.returns {
        Returns::Fixed(ty) => python_type(&ty),
        Returns::SameAs(index) => builtin
            .params
            .get(index)
            .and_then(|p| p.ty.python())
            .unwrap_or("float"),
    }
}

fn signature(builtin: &Builtin, receiver: bool) -> String {
    let mut params: Vec<String> = Vec::new();
    if receiver {
        params.push("self".to_string());
    }
    params.extend(builtin.params.iter().map(param_text));
    if let Some(variadic) = &builtin.variadic {
        params.push(format!("*{}", param_text(variadic)));
    }
    format!("def {}({}) -> {}:", builtin.name, params.join(", "), return_text(builtin))
}

/// Source of `crunch_lib.py`, generated from the catalogue
pub fn python_stub() -> String {
    let mut out = String::from("from typing import Literal\n\n\n");
    let mut current: Option<Category> = None;

    for builtin in catalogue() {
        if current != Some(builtin.category) {
            if let Some(title) = builtin.category.title() {
                out.push_str(&format!("\n{}\n# {}\n{}\n\n", BANNER, title, BANNER));
            }
            current = Some(builtin.category);
        }
        out.push_str(&signature(builtin, false));
        out.push_str(" pass\n");
    }

    let labels: Vec<String> = MATRIX_LABELS.iter().map(|l| format!("\"{}\"", l)).collect();
    out.push_str("\nclass Matrix:\n");
    out.push_str(&format!(
        "    def __init__(self, name: Literal[{}]):\n        self.name = name  # \"A\" through \"J\"\n",
        labels.join(", ")
    ));
    for method in matrix_methods() {
        out.push_str(&method_block(method));
    }

    out.push_str("\nclass Complex:\n");
    out.push_str(
        "    def __init__(self, real: float = 0.0, imag: float = 0.0):\n        self.real = real\n        self.imag = imag\n",
    );
    for method in complex_methods() {
        out.push_str(&method_block(method));
    }
    out.push_str(
        "\n    def __repr__(self) -> str:\n        return f\"TIComplex({self.real} + {self.imag}i)\"\n",
    );
    out
}

fn method_block(method: &Builtin) -> String {
    let sig = signature(method, true).replace("-> list[list]", "-> \"Matrix\"");
    let sig = if method.category == Category::ComplexMethod {
        sig.replace("other: complex", "other: \"Complex\"")
            .replace("-> complex", "-> \"Complex\"")
    } else {
        sig
    };
    let note = method
        .note
        .map(|n| format!("        # Compiles to: {}\n", n))
        .unwrap_or_default();
    format!("\n    {}\n{}        pass\n", sig, note)
}
