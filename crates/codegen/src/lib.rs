use parser::ast::{Expr, ExprKind, Param, Program, Span, Stmt, StmtKind, TypeExpr};
use parser::call_analysis;
use std::collections::HashMap;
use std::fmt;

mod builtins;
mod calls;
mod complex;
mod error;
mod error_report;
mod expr;
mod helpers;
mod operators;
mod stmt;
pub mod symbols;
mod types;

pub use builtins::stub::python_stub;
pub use builtins::{catalogue, Builtin, Category};
pub use complex::Complex;
pub use types::CrunchType;

// Re-export error types for public API
pub use error::{CodegenError, CodegenResult};
pub use error_report::{render_codegen_error, report_codegen_error};
pub use helpers::{format_number, program_name};

use stmt::StatementCompiler;
use symbols::{Storage, Symbol, SymbolTable, MATRIX_LABELS};

#[cfg(test)]
mod tests;

/// Scope of the statements outside every `def`
const ENTRY_SCOPE: &str = "__main__";

/// Fallback name of the entry program when the file stem is unusable
const DEFAULT_ENTRY: &str = "MAIN";

/// One calculator program
#[derive(Debug, Clone, PartialEq)]
pub struct TiProgram {
    pub name: String,
    pub lines: Vec<String>,
}

impl TiProgram {
    /// Program body, one line per statement
    pub fn to_source(&self) -> String {
        let mut out = self.lines.join("\n");
        out.push('\n');
        out
    }
}

/// Editor view: `PROGRAM:NAME` then `:line` per line
impl fmt::Display for TiProgram {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "PROGRAM:{}", self.name)?;
        for line in &self.lines {
            writeln!(f, ":{}", line)?;
        }
        Ok(())
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct FunctionParam {
    pub name: String,
    pub ty: CrunchType,
    pub storage: Storage,
    pub default: Option<Expr>,
}

/// A top-level `def`, compiled to its own program
#[derive(Debug, Clone, PartialEq)]
pub struct UserFunction {
    pub name: String,
    pub params: Vec<FunctionParam>,
    /// Calculator program name, without `prgm`
    pub program: String,
    pub returns: Option<CrunchType>,
    pub span: Span,
}

pub struct Compiler {
    pub filename: String, // Source filename for error reporting
    pub source: String,   // Source code for error reporting
    /// Name of the program holding the top-level statements
    pub entry: String,
    pub symbols: SymbolTable,
    pub functions: HashMap<String, UserFunction>,
    pub current_function: Option<String>,
    /// Lines of the program being compiled
    pub lines: Vec<String>,
    pub uses_complex: bool,
    /// Program names claimed by other files of the same build, with their owner
    pub taken_programs: HashMap<String, String>,
}

impl Compiler {
    pub fn new(filename: impl Into<String>, source: impl Into<String>) -> Self {
        let filename = filename.into();
        let stem = std::path::Path::new(&filename)
            .file_stem()
            .and_then(|s| s.to_str())
            .unwrap_or_default();
        let entry = program_name(stem).unwrap_or_else(|| DEFAULT_ENTRY.to_string());

        Self {
            filename,
            source: source.into(),
            entry,
            symbols: SymbolTable::new(),
            functions: HashMap::new(),
            current_function: None,
            lines: Vec::new(),
            uses_complex: false,
            taken_programs: HashMap::new(),
        }
    }

    /// Reject program names another file of the build already produces
    pub fn with_taken_programs(mut self, taken: HashMap<String, String>) -> Self {
        self.taken_programs = taken;
        self
    }

    // --- SCOPES & SYMBOLS ---

    pub(crate) fn scope(&self) -> String {
        self.current_function
            .clone()
            .unwrap_or_else(|| ENTRY_SCOPE.to_string())
    }

    /// Look a name up in the current function, then among the top-level variables
    pub(crate) fn resolve(&self, name: &str) -> Option<&Symbol> {
        self.symbols
            .lookup(&self.scope(), name)
            .or_else(|| self.symbols.lookup(ENTRY_SCOPE, name))
    }

    /// Symbol behind an expression that is exactly a variable
    pub(crate) fn symbol_of(&self, expr: &Expr) -> Option<Symbol> {
        match &expr.kind {
            ExprKind::Identifier(name) => self.resolve(name).cloned(),
            _ => None,
        }
    }

    pub(crate) fn declare(&mut self, name: &str, ty: CrunchType, span: &Span) -> CodegenResult<Symbol> {
        let scope = self.scope();
        if ty.is_complex() {
            self.uses_complex = true;
        }
        self.symbols.declare(&scope, name, ty, span)
    }

    /// Calculator name of the program being compiled
    pub(crate) fn program_name(&self) -> String {
        self.current_function
            .as_ref()
            .and_then(|name| self.functions.get(name))
            .map_or_else(|| self.entry.clone(), |f| f.program.clone())
    }

    pub(crate) fn emit(&mut self, line: impl Into<String>) {
        self.lines.push(line.into());
    }

    // --- PROGRAMS ---

    pub fn compile_program(&mut self, program: &Program) -> CodegenResult<Vec<TiProgram>> {
        if let Some(owner) = self.taken_programs.get(&self.entry) {
            return Err(CodegenError::InvalidOperation {
                operation: format!("program {}", self.entry),
                reason: format!("program name {} is already used by {}", self.entry, owner),
                span: None,
            });
        }

        let mut entry_body = Vec::new();
        let mut defs = Vec::new();
        for stmt in &program.statements {
            match &stmt.kind {
                StmtKind::FunctionDef { name, params, return_type, body } => {
                    defs.push((name, params, return_type.as_ref(), body, &stmt.span));
                }
                _ => entry_body.push(stmt.clone()),
            }
        }

        // Matrix("X") labels stay out of the free pool
        for label in call_analysis::matrix_labels(program) {
            if let Some(c) = single_char(&label).filter(|c| MATRIX_LABELS.contains(c)) {
                self.symbols.reserve_matrix(c);
            }
        }

        for (name, params, return_type, _, span) in &defs {
            self.register_function(name, params, *return_type, span)?;
        }

        let graph: HashMap<String, Vec<(String, Span)>> = defs
            .iter()
            .map(|(name, _, _, body, _)| (name.to_string(), call_analysis::called_names(body)))
            .collect();
        if let Some((caller, span)) = call_analysis::find_recursion(&graph) {
            return Err(CodegenError::InvalidOperation {
                operation: format!("call inside {}()", caller),
                reason: "recursive calls are not supported: programs share global variables".to_string(),
                span: Some(span),
            });
        }

        let mut programs = Vec::with_capacity(defs.len() + 1);

        self.current_function = None;
        let entry = self.entry.clone();
        programs.push(self.compile_unit(entry, &entry_body)?);

        for (name, _, _, body, _) in &defs {
            self.current_function = Some(name.to_string());
            let program_name = self.program_name();
            programs.push(self.compile_unit(program_name, body)?);
        }
        self.current_function = None;

        Ok(programs)
    }

    /// Check the program name and declare the parameters of a top-level `def`
    fn register_function(
        &mut self,
        name: &str,
        params: &[Param],
        return_type: Option<&TypeExpr>,
        span: &Span,
    ) -> CodegenResult<()> {
        let program = program_name(name).ok_or_else(|| CodegenError::InvalidOperation {
            operation: format!("def {}", name),
            reason: "program names are at most 8 letters or digits and start with a letter".to_string(),
            span: Some(span.clone()),
        })?;

        let clash = if program == self.entry {
            Some(format!("the program of file '{}'", self.filename))
        } else if let Some(owner) = self.taken_programs.get(&program) {
            Some(owner.clone())
        } else {
            self.functions
                .values()
                .find(|f| f.program == program)
                .map(|f| format!("function '{}'", f.name))
        };
        if let Some(other) = clash {
            return Err(CodegenError::InvalidOperation {
                operation: format!("def {}", name),
                reason: format!("program name {} is already used by {}", program, other),
                span: Some(span.clone()),
            });
        }

        let returns = match return_type {
            Some(ty) => Some(annotation(ty, &format!("return type of {}()", name))?),
            None => None,
        };

        self.current_function = Some(name.to_string());
        let mut declared = Vec::with_capacity(params.len());
        for param in params {
            let hint = param.type_hint.as_ref().ok_or_else(|| CodegenError::MissingValue {
                what: "type annotation".to_string(),
                context: format!("parameter '{}' of {}()", param.name, name),
                span: Some(param.span.clone()),
            })?;
            let ty = annotation(hint, &format!("parameter '{}' of {}()", param.name, name))?;
            let symbol = self.declare(&param.name, ty, &param.span)?;
            declared.push(FunctionParam {
                name: param.name.clone(),
                ty,
                storage: symbol.storage,
                default: param.default.clone(),
            });
        }
        self.current_function = None;

        log::trace!("{}() -> prgm{}", name, program);
        self.functions.insert(
            name.to_string(),
            UserFunction {
                name: name.to_string(),
                params: declared,
                program,
                returns,
                span: span.clone(),
            },
        );
        Ok(())
    }

    fn compile_unit(&mut self, name: String, body: &[Stmt]) -> CodegenResult<TiProgram> {
        self.lines.clear();
        self.uses_complex = self
            .current_function
            .as_ref()
            .and_then(|f| self.functions.get(f))
            .is_some_and(|f| f.params.iter().any(|p| p.ty.is_complex()));

        self.compile_block(body)?;

        let mut lines = std::mem::take(&mut self.lines);
        if self.uses_complex {
            lines.insert(0, "a+bi".to_string());
        }
        log::debug!("prgm{}: {} lines", name, lines.len());
        Ok(TiProgram { name, lines })
    }
}

fn annotation(ty: &TypeExpr, context: &str) -> CodegenResult<CrunchType> {
    CrunchType::from_annotation(ty).ok_or_else(|| CodegenError::UndefinedSymbol {
        name: ty.name.clone(),
        context: context.to_string(),
        span: Some(ty.span.clone()),
    })
}

fn single_char(s: &str) -> Option<char> {
    let mut chars = s.chars();
    match (chars.next(), chars.next()) {
        (Some(c), None) => Some(c),
        _ => None,
    }
}
