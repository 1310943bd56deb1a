// Test module for parser
//
// Tests are organized by category to cover AST construction, operator
// precedence, error reporting and the post-parse call analysis.

mod analysis_tests;
mod edge_cases;
mod expr_tests;

use crate::ast::{Expr, Program, Stmt, StmtKind};
use crate::parse_source;

pub(crate) fn parse(input: &str) -> Program {
    parse_source(input).unwrap_or_else(|e| panic!("parse failed for {:?}: {:?}", input, e))
}

pub(crate) fn parse_stmt(input: &str) -> Stmt {
    parse(input)
        .statements
        .into_iter()
        .next()
        .expect("No statement")
}

/// Parse a single expression statement and return the expression
pub(crate) fn parse_expr(input: &str) -> Expr {
    match parse_stmt(input).kind {
        StmtKind::Expr(expr) => expr,
        other => panic!("Expected expression statement, got {:?}", other),
    }
}
