// Call Analysis Tests

use super::parse;
use crate::ast::StmtKind;
use crate::call_analysis::{called_names, find_recursion, matrix_labels};
use indoc::indoc;
use std::collections::HashMap;

fn call_graph(src: &str) -> HashMap<String, Vec<(String, crate::ast::Span)>> {
    parse(src)
        .statements
        .into_iter()
        .filter_map(|stmt| match stmt.kind {
            StmtKind::FunctionDef { name, body, .. } => Some((name, called_names(&body))),
            _ => None,
        })
        .collect()
}

#[test]
fn test_called_names_in_order() {
    let program = parse(indoc! {"
        x = f(1)
        if g(x):
            disp(h(2))
    "});
    let names: Vec<String> = called_names(&program.statements)
        .into_iter()
        .map(|(name, _)| name)
        .collect();
    assert_eq!(names, vec!["f", "g", "disp", "h"]);
}

#[test]
fn test_method_calls_are_not_plain_calls() {
    let program = parse("m.inverse()\n");
    assert!(called_names(&program.statements).is_empty());
}

#[test]
fn test_no_recursion() {
    let graph = call_graph(indoc! {"
        def a():
            b()
        def b():
            disp(1)
    "});
    assert_eq!(find_recursion(&graph), None);
}

#[test]
fn test_direct_recursion() {
    let graph = call_graph(indoc! {"
        def fact(n):
            return n * fact(n - 1)
    "});
    let (name, _) = find_recursion(&graph).expect("recursion not found");
    assert_eq!(name, "fact");
}

#[test]
fn test_mutual_recursion() {
    let src = indoc! {"
        def ping(n):
            pong(n)
        def pong(n):
            ping(n)
    "};
    let graph = call_graph(src);
    let (name, span) = find_recursion(&graph).expect("recursion not found");
    assert_eq!(name, "pong");
    assert_eq!(&src[span], "ping(n)");
}

#[test]
fn test_matrix_labels_deduplicated() {
    let program = parse(indoc! {"
        a = Matrix(\"A\")
        def f():
            b = Matrix(\"C\")
            c = Matrix(\"A\")
    "});
    assert_eq!(matrix_labels(&program), vec!["A".to_string(), "C".to_string()]);
}

#[test]
fn test_matrix_labels_by_keyword() {
    let program = parse(indoc! {"
        x = [[1, 2], [3, 4]]
        m = Matrix(name=\"A\")
    "});
    assert_eq!(matrix_labels(&program), vec!["A".to_string()]);
}
