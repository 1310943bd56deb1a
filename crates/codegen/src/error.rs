// Error handling for code generation
//
// Every failure carries the source span it was raised at (when one exists)
// so the ariadne reports in `error_report` can point into the Python file.

use thiserror::Error;

// Import Span type from parser AST
pub use parser::ast::Span;

/// Code generation error types
#[derive(Debug, Clone, PartialEq, Error)]
pub enum CodegenError {
    /// A calculator variable pool ran dry (reals, strings, lists, matrices)
    #[error("Out of {resource} while allocating '{needed_by}'")]
    ResourceExhausted {
        resource: String,
        needed_by: String,
        span: Option<Span>,
    },

    /// Type mismatch or incompatibility
    #[error("Type error in {context}: expected {expected}, found {found}")]
    TypeError {
        expected: String,
        found: String,
        context: String,
        span: Option<Span>,
    },

    /// Variable or function not found in symbol table
    #[error("Undefined symbol '{name}' in {context}")]
    UndefinedSymbol {
        name: String,
        context: String,
        span: Option<Span>,
    },

    /// Construct that has no calculator translation (e.g., recursion)
    #[error("Invalid operation '{operation}': {reason}")]
    InvalidOperation {
        operation: String,
        reason: String,
        span: Option<Span>,
    },

    /// Missing required value (argument, annotation, return value)
    #[error("Missing {what} in {context}")]
    MissingValue {
        what: String,
        context: String,
        span: Option<Span>,
    },

    /// General error with message
    #[error("{0}")]
    General(String),
}

impl CodegenError {
    /// Get the exit code for this error type
    /// Used by main.rs to return specific exit codes
    pub fn exit_code(&self) -> i32 {
        match self {
            CodegenError::General(_) => 100,
            CodegenError::ResourceExhausted { .. } => 101,
            CodegenError::TypeError { .. } => 102,
            CodegenError::UndefinedSymbol { .. } => 103,
            CodegenError::InvalidOperation { .. } => 104,
            CodegenError::MissingValue { .. } => 105,
        }
    }

    pub fn span(&self) -> Option<&Span> {
        match self {
            CodegenError::ResourceExhausted { span, .. }
            | CodegenError::TypeError { span, .. }
            | CodegenError::UndefinedSymbol { span, .. }
            | CodegenError::InvalidOperation { span, .. }
            | CodegenError::MissingValue { span, .. } => span.as_ref(),
            CodegenError::General(_) => None,
        }
    }

    pub(crate) fn invalid(operation: impl Into<String>, reason: impl Into<String>, span: &Span) -> Self {
        CodegenError::InvalidOperation {
            operation: operation.into(),
            reason: reason.into(),
            span: Some(span.clone()),
        }
    }

    pub(crate) fn mismatch(
        expected: impl ToString,
        found: impl ToString,
        context: impl Into<String>,
        span: &Span,
    ) -> Self {
        CodegenError::TypeError {
            expected: expected.to_string(),
            found: found.to_string(),
            context: context.into(),
            span: Some(span.clone()),
        }
    }
}

/// Convenient Result type for codegen operations
pub type CodegenResult<T> = Result<T, CodegenError>;
