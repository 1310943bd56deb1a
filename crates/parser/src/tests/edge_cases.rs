// Edge Cases

use super::{parse, parse_expr, parse_stmt};
use crate::ast::{ExprKind, Literal, StmtKind};
use indoc::indoc;

#[test]
fn test_empty_source() {
    assert!(parse("").statements.is_empty());
}

#[test]
fn test_only_comments_and_blank_lines() {
    let src = "# header\n\n   \n# more\n";
    assert!(parse(src).statements.is_empty());
}

#[test]
fn test_missing_trailing_newline() {
    assert_eq!(parse("disp(1)").statements.len(), 1);
}

#[test]
fn test_list_spanning_lines() {
    let src = indoc! {"
        data = [
            1, 2,
            3,
        ]
        disp(data)
    "};
    let program = parse(src);
    assert_eq!(program.statements.len(), 2);
}

#[test]
fn test_call_spanning_lines() {
    let src = indoc! {"
        out = normal_cdf(
            0, 1,
            mean=0, std=1)
    "};
    assert!(matches!(parse_stmt(src).kind, StmtKind::Assignment { .. }));
}

#[test]
fn test_deeply_nested_parentheses() {
    assert_eq!(parse_expr("((((7))))").kind, ExprKind::Literal(Literal::Int(7)));
}

#[test]
fn test_trailing_comment_after_statement() {
    match parse_stmt("x = 3  # three\n").kind {
        StmtKind::Assignment { value, .. } => {
            assert_eq!(value.kind, ExprKind::Literal(Literal::Int(3)));
        }
        other => panic!("Expected assignment, got {:?}", other),
    }
}

#[test]
fn test_keyword_prefix_is_identifier() {
    // `format` and `index` start with keywords but lex as identifiers
    match parse_expr("format + index + iffy").kind {
        ExprKind::Binary { .. } => {}
        other => panic!("Expected binary, got {:?}", other),
    }
}

#[test]
fn test_complex_expression_literal() {
    match parse_expr("3 + 4j").kind {
        ExprKind::Binary { rhs, .. } => {
            assert_eq!(rhs.kind, ExprKind::Literal(Literal::Imaginary(4.0)));
        }
        other => panic!("Expected binary, got {:?}", other),
    }
}

#[test]
fn test_string_with_escapes() {
    assert_eq!(
        parse_expr("'it\\'s'").kind,
        ExprKind::Literal(Literal::String("it's".to_string()))
    );
}

#[test]
fn test_statement_spans_cover_the_line() {
    let src = "x = 1\ny = 22\n";
    let program = parse(src);
    assert_eq!(program.statements[1].span, 6..12);
}
