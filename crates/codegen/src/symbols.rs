// Calculator storage allocation
//
// TI-BASIC has no scopes: every variable is global and drawn from a fixed
// pool per value kind. Python names are mapped onto those pools once per
// (scope, name) for the whole compilation unit, so two functions never share
// a variable by accident.

use crate::types::CrunchType;
use crate::{CodegenError, CodegenResult};
use parser::ast::Span;
use std::collections::{HashMap, HashSet};
use std::fmt;

pub const MATRIX_LABELS: [char; 10] = ['A', 'B', 'C', 'D', 'E', 'F', 'G', 'H', 'I', 'J'];

/// String variables in the order the calculator lists them
const STRING_SLOTS: [u8; 10] = [1, 2, 3, 4, 5, 6, 7, 8, 9, 0];

const LIST_NAME_LEN: usize = 5;

#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum Storage {
    /// `A`..`Z`, holds reals and (in a+bi mode) complex values
    Real(char),
    /// `Str1`..`Str9`, `Str0`
    Str(u8),
    /// Custom list `∟NAME`
    List(String),
    /// `[A]`..`[J]`
    Matrix(char),
}

impl fmt::Display for Storage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Storage::Real(c) => write!(f, "{}", c),
            Storage::Str(n) => write!(f, "Str{}", n),
            Storage::List(name) => write!(f, "∟{}", name),
            Storage::Matrix(label) => write!(f, "[{}]", label),
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct Symbol {
    pub storage: Storage,
    pub ty: CrunchType,
}

#[derive(Debug, Default)]
pub struct SymbolTable {
    symbols: HashMap<(String, String), Symbol>,
    reals: HashSet<char>,
    strings: HashSet<u8>,
    lists: HashSet<String>,
    matrices: HashSet<char>,
    /// Labels named by `Matrix("X")` somewhere in the unit
    reserved_matrices: HashSet<char>,
    temp_counter: usize,
}

impl SymbolTable {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn lookup(&self, scope: &str, name: &str) -> Option<&Symbol> {
        self.symbols.get(&(scope.to_string(), name.to_string()))
    }

    /// Keep a label out of the free matrix pool
    pub fn reserve_matrix(&mut self, label: char) {
        self.reserved_matrices.insert(label);
    }

    /// Bind `name` to a fixed matrix label without allocating
    pub fn bind_matrix(&mut self, scope: &str, name: &str, label: char) -> Symbol {
        self.matrices.insert(label);
        let symbol = Symbol {
            storage: Storage::Matrix(label),
            ty: CrunchType::Matrix,
        };
        self.symbols
            .insert((scope.to_string(), name.to_string()), symbol.clone());
        symbol
    }

    /// Allocate storage for a new `(scope, name)` of type `ty`
    pub fn declare(&mut self, scope: &str, name: &str, ty: CrunchType, span: &Span) -> CodegenResult<Symbol> {
        if let Some(existing) = self.lookup(scope, name) {
            return Ok(existing.clone());
        }

        let storage = self.allocate(name, ty, span)?;
        log::trace!("{}::{} -> {} ({})", scope, name, storage, ty);
        let symbol = Symbol { storage, ty };
        self.symbols
            .insert((scope.to_string(), name.to_string()), symbol.clone());
        Ok(symbol)
    }

    /// Hidden real for loop counters
    pub fn temp_real(&mut self, span: &Span) -> CodegenResult<Storage> {
        self.temp_counter += 1;
        let name = format!("loop index #{}", self.temp_counter);
        self.allocate(&name, CrunchType::Int, span)
    }

    /// Hidden list for iterating over a list-valued expression
    pub fn temp_list(&mut self, span: &Span) -> CodegenResult<Storage> {
        self.temp_counter += 1;
        let name = format!("TMP{}", self.temp_counter);
        self.allocate(&name, CrunchType::FloatList, span)
    }

    fn allocate(&mut self, name: &str, ty: CrunchType, span: &Span) -> CodegenResult<Storage> {
        let exhausted = |resource: &str| CodegenError::ResourceExhausted {
            resource: resource.to_string(),
            needed_by: name.to_string(),
            span: Some(span.clone()),
        };

        match ty {
            CrunchType::Int | CrunchType::Float | CrunchType::Bool | CrunchType::Complex => {
                let var = ('A'..='Z')
                    .find(|c| !self.reals.contains(c))
                    .ok_or_else(|| exhausted("real variables (A-Z)"))?;
                self.reals.insert(var);
                Ok(Storage::Real(var))
            }
            CrunchType::Str => {
                let slot = STRING_SLOTS
                    .iter()
                    .copied()
                    .find(|n| !self.strings.contains(n))
                    .ok_or_else(|| exhausted("string variables (Str0-Str9)"))?;
                self.strings.insert(slot);
                Ok(Storage::Str(slot))
            }
            CrunchType::IntList | CrunchType::FloatList | CrunchType::ComplexList => {
                let list = self
                    .list_name(name)
                    .ok_or_else(|| exhausted("list names"))?;
                self.lists.insert(list.clone());
                Ok(Storage::List(list))
            }
            CrunchType::Matrix => {
                let label = MATRIX_LABELS
                    .iter()
                    .copied()
                    .find(|l| !self.matrices.contains(l) && !self.reserved_matrices.contains(l))
                    .ok_or_else(|| exhausted("matrices ([A]-[J])"))?;
                self.matrices.insert(label);
                Ok(Storage::Matrix(label))
            }
            CrunchType::None => Err(CodegenError::InvalidOperation {
                operation: name.to_string(),
                reason: "a None value has no calculator storage".to_string(),
                span: Some(span.clone()),
            }),
        }
    }

    /// Derive a free list name from a Python name: upper-case letters and
    /// digits, at most five characters, de-duplicated with a digit suffix.
    fn list_name(&self, name: &str) -> Option<String> {
        let base: String = name
            .chars()
            .filter(|c| c.is_ascii_alphanumeric())
            .map(|c| c.to_ascii_uppercase())
            .skip_while(|c| c.is_ascii_digit())
            .take(LIST_NAME_LEN)
            .collect();
        let base = if base.is_empty() { "L".to_string() } else { base };

        if !self.lists.contains(&base) {
            return Some(base);
        }

        let stem: String = base.chars().take(LIST_NAME_LEN - 1).collect();
        (1..=9)
            .map(|n| format!("{}{}", stem, n))
            .find(|candidate| !self.lists.contains(candidate))
    }
}
