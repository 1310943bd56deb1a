// Built-in catalogue for Crunch
//
// Every function and class method of crunch_lib, with its typed signature
// and the calculator form a call compiles to. The same table drives type
// checking, emission and the generated `crunch_lib.py` stub.

pub mod classes;
pub mod io;
pub mod linalg;
pub mod lists;
pub mod math;
pub mod stats;
pub mod stub;

use crate::expr::Prec;
use crate::types::CrunchType;
use once_cell::sync::Lazy;
use std::collections::HashMap;
use std::fmt;

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum Category {
    Constants,
    Numeric,
    Trigonometry,
    Complex,
    Lists,
    Matrix,
    Stats,
    Io,
    Graphics,
    MatrixMethod,
    ComplexMethod,
}

impl Category {
    /// Banner used in the generated stub, `None` for the unbannered head
    pub fn title(&self) -> Option<&'static str> {
        match self {
            Category::Constants => None,
            Category::Numeric => Some("Numeric Functions"),
            Category::Trigonometry => Some("Trigonometry"),
            Category::Complex => Some("Complex Numbers"),
            Category::Lists => Some("List Operations"),
            Category::Matrix => Some("Matrix Operations"),
            Category::Stats => Some("Probability & Stats"),
            Category::Io => Some("I/O & Program Control"),
            Category::Graphics => Some("Graphics"),
            Category::MatrixMethod | Category::ComplexMethod => None,
        }
    }
}

/// What a bound argument must be
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ParamType {
    Int,
    Float,
    Bool,
    Str,
    Complex,
    List,
    Matrix,
    /// A matrix variable such as `[A]`, for templates that index it
    MatrixVar,
    /// Any numeric expression, complex included
    Expr,
    /// String literal naming a numeric variable in scope
    VarName,
    Any,
}

impl ParamType {
    pub fn accepts(&self, ty: &CrunchType) -> bool {
        match self {
            ParamType::Int => CrunchType::Int.is_assignable_from(ty),
            ParamType::Float => CrunchType::Float.is_assignable_from(ty),
            ParamType::Bool => ty.is_real(),
            ParamType::Str => *ty == CrunchType::Str,
            ParamType::Complex | ParamType::Expr => ty.is_numeric(),
            ParamType::List => ty.is_list(),
            ParamType::Matrix | ParamType::MatrixVar => *ty == CrunchType::Matrix,
            ParamType::VarName => *ty == CrunchType::Str,
            ParamType::Any => *ty != CrunchType::None,
        }
    }

    /// Annotation written in the Python stub
    pub fn python(&self) -> Option<&'static str> {
        match self {
            ParamType::Int => Some("int"),
            ParamType::Float => Some("float"),
            ParamType::Bool => Some("bool"),
            ParamType::Str | ParamType::VarName => Some("str"),
            ParamType::Complex => Some("complex"),
            ParamType::List => Some("list"),
            ParamType::Matrix | ParamType::MatrixVar => Some("list[list]"),
            ParamType::Expr | ParamType::Any => None,
        }
    }
}

impl fmt::Display for ParamType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ParamType::MatrixVar => f.write_str("Matrix variable"),
            ParamType::Expr => f.write_str("numeric expression"),
            ParamType::VarName => f.write_str("variable name string"),
            ParamType::Any => f.write_str("value"),
            other => f.write_str(other.python().unwrap_or("value")),
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct Param {
    pub name: &'static str,
    pub ty: ParamType,
    /// Default as calculator text (also valid Python for the stub)
    pub default: Option<&'static str>,
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Returns {
    Fixed(CrunchType),
    /// Same type as the argument at this index
    SameAs(usize),
}

#[derive(Debug, Clone, PartialEq)]
pub enum Emit {
    /// Value in function-call form; the result needs no parentheses
    Call(&'static str),
    /// Value in operator form with the given binding strength
    Operator(&'static str, Prec),
    /// Arithmetic on the receiver, compiled like the matching operator
    Binary(parser::ast::BinaryOp),
    /// A whole program line with no value
    Statement(&'static str),
    /// Mode switch: constant argument picks one line
    Toggle { on: &'static str, off: &'static str },
    /// `Input "MSG",X`, only as the right-hand side of an assignment
    Input,
    /// In-place sort of a list variable
    Sort(&'static str),
    /// Value line then `Return`
    Return,
    Unsupported(&'static str),
}

#[derive(Debug, Clone, PartialEq)]
pub struct Builtin {
    pub name: &'static str,
    pub category: Category,
    pub params: Vec<Param>,
    pub variadic: Option<Param>,
    pub returns: Returns,
    pub emit: Emit,
    /// Calculator form quoted in the stub, for class methods
    pub note: Option<&'static str>,
    /// Method whose template indexes the receiver, so it must be a variable
    pub needs_variable: bool,
}

impl Builtin {
    pub(crate) fn new(category: Category, name: &'static str, returns: Returns, emit: Emit) -> Self {
        Self {
            name,
            category,
            params: Vec::new(),
            variadic: None,
            returns,
            emit,
            note: None,
            needs_variable: false,
        }
    }

    /// Value builtin `name(...)`, rendered from `template`
    pub(crate) fn call(category: Category, name: &'static str, template: &'static str, returns: CrunchType) -> Self {
        Self::new(category, name, Returns::Fixed(returns), Emit::Call(template))
    }

    /// Statement builtin with no value
    pub(crate) fn statement(category: Category, name: &'static str, template: &'static str) -> Self {
        Self::new(category, name, Returns::Fixed(CrunchType::None), Emit::Statement(template))
    }

    pub(crate) fn param(mut self, name: &'static str, ty: ParamType) -> Self {
        self.params.push(Param { name, ty, default: None });
        self
    }

    pub(crate) fn param_default(mut self, name: &'static str, ty: ParamType, default: &'static str) -> Self {
        self.params.push(Param {
            name,
            ty,
            default: Some(default),
        });
        self
    }

    pub(crate) fn variadic(mut self, name: &'static str, ty: ParamType) -> Self {
        self.variadic = Some(Param { name, ty, default: None });
        self
    }

    pub(crate) fn returning_same_as(mut self, index: usize) -> Self {
        self.returns = Returns::SameAs(index);
        self
    }

    pub(crate) fn note(mut self, note: &'static str) -> Self {
        self.note = Some(note);
        self
    }

    pub(crate) fn on_variable(mut self) -> Self {
        self.needs_variable = true;
        self
    }

    /// Builtins whose call is a whole line rather than a value
    pub fn is_statement(&self) -> bool {
        matches!(
            self.emit,
            Emit::Statement(_) | Emit::Toggle { .. } | Emit::Return | Emit::Sort(_)
        )
    }
}

static CATALOGUE: Lazy<Vec<Builtin>> = Lazy::new(|| {
    let mut all = Vec::new();
    all.extend(math::constants());
    all.extend(math::numeric());
    all.extend(math::trigonometry());
    all.extend(math::complex());
    all.extend(lists::builtins());
    all.extend(linalg::builtins());
    all.extend(stats::builtins());
    all.extend(io::program_control());
    all.extend(io::graphics());
    all
});

static BY_NAME: Lazy<HashMap<&'static str, &'static Builtin>> =
    Lazy::new(|| CATALOGUE.iter().map(|b| (b.name, b)).collect());

static MATRIX_METHODS: Lazy<Vec<Builtin>> = Lazy::new(classes::matrix_methods);
static COMPLEX_METHODS: Lazy<Vec<Builtin>> = Lazy::new(classes::complex_methods);

/// Every free function, in category order
pub fn catalogue() -> &'static [Builtin] {
    &CATALOGUE
}

pub fn lookup(name: &str) -> Option<&'static Builtin> {
    BY_NAME.get(name).copied()
}

pub fn matrix_methods() -> &'static [Builtin] {
    &MATRIX_METHODS
}

pub fn complex_methods() -> &'static [Builtin] {
    &COMPLEX_METHODS
}

pub fn matrix_method(name: &str) -> Option<&'static Builtin> {
    MATRIX_METHODS.iter().find(|m| m.name == name)
}

pub fn complex_method(name: &str) -> Option<&'static Builtin> {
    COMPLEX_METHODS.iter().find(|m| m.name == name)
}

/// Fill a template: `{0}`..`{9}` are bound arguments, `{*}` the variadic
/// arguments joined by commas, `{self}` the receiver. Any other brace is
/// literal calculator text (list braces).
pub fn render(template: &str, args: &[String], rest: &[String], receiver: Option<&str>) -> String {
    let mut out = String::with_capacity(template.len() + 16);
    let mut remaining = template;

    while let Some(open) = remaining.find('{') {
        out.push_str(&remaining[..open]);
        let after = &remaining[open + 1..];
        let placeholder = after.find('}').map(|close| (&after[..close], close));

        let substituted = match placeholder {
            Some(("*", _)) => Some(rest.join(",")),
            Some(("self", _)) => receiver.map(str::to_string),
            Some((key, _)) if !key.is_empty() && key.chars().all(|c| c.is_ascii_digit()) => key
                .parse::<usize>()
                .ok()
                .and_then(|i| args.get(i).cloned()),
            _ => None,
        };

        match (substituted, placeholder) {
            (Some(text), Some((_, close))) => {
                out.push_str(&text);
                remaining = &after[close + 1..];
            }
            _ => {
                out.push('{');
                remaining = after;
            }
        }
    }
    out.push_str(remaining);
    out
}
