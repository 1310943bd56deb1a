/// Call Analysis
///
/// Walks function bodies to find which user functions they call (for
/// recursion detection) and which literal matrix labels a program names.
/// Runs AFTER parsing, before code generation.

use crate::ast::{Expr, ExprKind, Literal, Program, Span, Stmt, StmtKind};
use std::collections::{HashMap, HashSet};

/// Collect every call of a plain identifier in `body`, in source order
pub fn called_names(body: &[Stmt]) -> Vec<(String, Span)> {
    let mut calls = Vec::new();
    for stmt in body {
        visit_stmt(stmt, &mut |expr| {
            if let Some(name) = expr.callee_name() {
                calls.push((name.to_string(), expr.span.clone()));
            }
        });
    }
    calls
}

/// Labels passed as string literals to `Matrix("X")` or `Matrix(name="X")`
/// anywhere in the program
pub fn matrix_labels(program: &Program) -> Vec<String> {
    let mut labels = Vec::new();
    for stmt in &program.statements {
        visit_stmt(stmt, &mut |expr| {
            if expr.callee_name() != Some("Matrix") {
                return;
            }
            if let ExprKind::Call { args, kwargs, .. } = &expr.kind {
                let named = kwargs.iter().find(|(k, _)| k == "name").map(|(_, v)| v);
                if let Some(Expr {
                    kind: ExprKind::Literal(Literal::String(label)),
                    ..
                }) = args.first().or(named)
                {
                    if !labels.contains(label) {
                        labels.push(label.clone());
                    }
                }
            }
        });
    }
    labels
}

/// Find a cycle in the call graph between the given functions.
/// Returns the function where the cycle was closed and the offending call span.
pub fn find_recursion(functions: &HashMap<String, Vec<(String, Span)>>) -> Option<(String, Span)> {
    let mut names: Vec<&String> = functions.keys().collect();
    names.sort();

    let mut done: HashSet<&str> = HashSet::new();
    for name in names {
        let mut path: Vec<&str> = Vec::new();
        if let Some(hit) = dfs(name, functions, &mut path, &mut done) {
            return Some(hit);
        }
    }
    None
}

fn dfs<'a>(
    name: &'a str,
    functions: &'a HashMap<String, Vec<(String, Span)>>,
    path: &mut Vec<&'a str>,
    done: &mut HashSet<&'a str>,
) -> Option<(String, Span)> {
    if done.contains(name) {
        return None;
    }
    path.push(name);

    if let Some(calls) = functions.get(name) {
        for (callee, span) in calls {
            if !functions.contains_key(callee) {
                continue;
            }
            if path.contains(&callee.as_str()) {
                return Some((name.to_string(), span.clone()));
            }
            if let Some(hit) = dfs(callee, functions, path, done) {
                return Some(hit);
            }
        }
    }

    path.pop();
    done.insert(name);
    None
}

/// Recursively visit every expression reachable from a statement
fn visit_stmt(stmt: &Stmt, f: &mut dyn FnMut(&Expr)) {
    match &stmt.kind {
        StmtKind::VariableDecl { value, .. } => {
            if let Some(value) = value {
                visit_expr(value, f);
            }
        }

        StmtKind::Assignment { target, value } => {
            visit_expr(target, f);
            visit_expr(value, f);
        }

        StmtKind::If { condition, then_block, else_block } => {
            visit_expr(condition, f);
            for s in then_block {
                visit_stmt(s, f);
            }
            if let Some(else_b) = else_block {
                for s in else_b {
                    visit_stmt(s, f);
                }
            }
        }

        StmtKind::While { condition, body } => {
            visit_expr(condition, f);
            for s in body {
                visit_stmt(s, f);
            }
        }

        StmtKind::For { iterable, body, .. } => {
            visit_expr(iterable, f);
            for s in body {
                visit_stmt(s, f);
            }
        }

        StmtKind::FunctionDef { params, body, .. } => {
            for param in params {
                if let Some(default) = &param.default {
                    visit_expr(default, f);
                }
            }
            for s in body {
                visit_stmt(s, f);
            }
        }

        StmtKind::Return { value } => {
            if let Some(value) = value {
                visit_expr(value, f);
            }
        }

        StmtKind::Expr(expr) => visit_expr(expr, f),

        StmtKind::Import { .. } | StmtKind::Pass => {}
    }
}

fn visit_expr(expr: &Expr, f: &mut dyn FnMut(&Expr)) {
    f(expr);
    match &expr.kind {
        ExprKind::Binary { lhs, rhs, .. } => {
            visit_expr(lhs, f);
            visit_expr(rhs, f);
        }
        ExprKind::Unary { expr, .. } => visit_expr(expr, f),
        ExprKind::List(items) => {
            for item in items {
                visit_expr(item, f);
            }
        }
        ExprKind::Index { target, index } => {
            visit_expr(target, f);
            visit_expr(index, f);
        }
        ExprKind::Call { func, args, kwargs } => {
            visit_expr(func, f);
            for arg in args {
                visit_expr(arg, f);
            }
            for (_, value) in kwargs {
                visit_expr(value, f);
            }
        }
        ExprKind::Attribute { target, .. } => visit_expr(target, f),
        ExprKind::Literal(_) | ExprKind::Identifier(_) => {}
    }
}
