// Type system for Crunch
//
// Python annotations collapse onto the handful of value kinds a TI-84 can
// hold: real/complex numbers, strings, numeric lists and matrices.

use parser::ast::TypeExpr;
use std::fmt;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum CrunchType {
    Int,
    Float,
    Bool,
    Str,
    Complex,
    IntList,
    FloatList,
    ComplexList,
    Matrix,
    None,
}

impl CrunchType {
    /// Resolve a written annotation. Unknown names yield `None`.
    pub fn from_annotation(ty: &TypeExpr) -> Option<CrunchType> {
        match (ty.name.as_str(), ty.args.as_slice()) {
            ("int", []) => Some(CrunchType::Int),
            ("float", []) => Some(CrunchType::Float),
            ("bool", []) => Some(CrunchType::Bool),
            ("str", []) => Some(CrunchType::Str),
            ("Complex" | "complex", []) => Some(CrunchType::Complex),
            ("Matrix", []) => Some(CrunchType::Matrix),
            ("None", []) => Some(CrunchType::None),
            ("list", []) => Some(CrunchType::FloatList),
            ("list", [elem]) => match elem.name.as_str() {
                "list" => Some(CrunchType::Matrix),
                _ => CrunchType::from_annotation(elem)?.list_of(),
            },
            _ => None,
        }
    }

    pub fn is_numeric(&self) -> bool {
        matches!(
            self,
            CrunchType::Int | CrunchType::Float | CrunchType::Bool | CrunchType::Complex
        )
    }

    /// Numeric and not complex: usable in comparisons and conditions
    pub fn is_real(&self) -> bool {
        matches!(self, CrunchType::Int | CrunchType::Float | CrunchType::Bool)
    }

    pub fn is_list(&self) -> bool {
        matches!(
            self,
            CrunchType::IntList | CrunchType::FloatList | CrunchType::ComplexList
        )
    }

    pub fn is_complex(&self) -> bool {
        matches!(self, CrunchType::Complex | CrunchType::ComplexList)
    }

    pub fn element(&self) -> Option<CrunchType> {
        match self {
            CrunchType::IntList => Some(CrunchType::Int),
            CrunchType::FloatList => Some(CrunchType::Float),
            CrunchType::ComplexList => Some(CrunchType::Complex),
            _ => None,
        }
    }

    pub fn list_of(&self) -> Option<CrunchType> {
        match self {
            CrunchType::Int | CrunchType::Bool => Some(CrunchType::IntList),
            CrunchType::Float => Some(CrunchType::FloatList),
            CrunchType::Complex => Some(CrunchType::ComplexList),
            _ => None,
        }
    }

    /// Numeric widening order, `None` for non-numeric kinds
    fn rank(&self) -> Option<u8> {
        match self {
            CrunchType::Bool => Some(0),
            CrunchType::Int => Some(1),
            CrunchType::Float => Some(2),
            CrunchType::Complex => Some(3),
            _ => None,
        }
    }

    /// Can a value of type `other` be stored where `self` is expected?
    pub fn is_assignable_from(&self, other: &CrunchType) -> bool {
        if self == other {
            return true;
        }
        if let (Some(to), Some(from)) = (self.rank(), other.rank()) {
            return from <= to;
        }
        match (self.element(), other.element()) {
            (Some(to), Some(from)) => to.is_assignable_from(&from),
            _ => false,
        }
    }

    /// Common type of two numeric operands (or two lists), widening as needed
    pub fn unify(a: CrunchType, b: CrunchType) -> Option<CrunchType> {
        if a.is_assignable_from(&b) {
            Some(a)
        } else if b.is_assignable_from(&a) {
            Some(b)
        } else {
            None
        }
    }

    /// Arithmetic drops booleans to integers
    pub fn arithmetic(self) -> CrunchType {
        match self {
            CrunchType::Bool => CrunchType::Int,
            other => other,
        }
    }
}

impl fmt::Display for CrunchType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            CrunchType::Int => "int",
            CrunchType::Float => "float",
            CrunchType::Bool => "bool",
            CrunchType::Str => "str",
            CrunchType::Complex => "Complex",
            CrunchType::IntList => "list[int]",
            CrunchType::FloatList => "list[float]",
            CrunchType::ComplexList => "list[Complex]",
            CrunchType::Matrix => "Matrix",
            CrunchType::None => "None",
        };
        f.write_str(name)
    }
}
