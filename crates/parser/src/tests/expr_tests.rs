// Expression Parsing Tests

use super::parse_expr;
use crate::ast::{BinaryOp, ExprKind, Literal, UnaryOp};
use pretty_assertions::assert_eq;

// ==================== LITERAL TESTS ====================

#[test]
fn test_int_literal() {
    assert_eq!(parse_expr("42").kind, ExprKind::Literal(Literal::Int(42)));
}

#[test]
fn test_float_literal() {
    assert_eq!(parse_expr("2.5").kind, ExprKind::Literal(Literal::Float(2.5)));
    assert_eq!(parse_expr(".5").kind, ExprKind::Literal(Literal::Float(0.5)));
}

#[test]
fn test_imaginary_literal() {
    assert_eq!(parse_expr("3j").kind, ExprKind::Literal(Literal::Imaginary(3.0)));
}

#[test]
fn test_string_literal() {
    assert_eq!(
        parse_expr("\"HI\"").kind,
        ExprKind::Literal(Literal::String("HI".to_string()))
    );
}

#[test]
fn test_bool_and_none() {
    assert_eq!(parse_expr("True").kind, ExprKind::Literal(Literal::Bool(true)));
    assert_eq!(parse_expr("False").kind, ExprKind::Literal(Literal::Bool(false)));
    assert_eq!(parse_expr("None").kind, ExprKind::Literal(Literal::None));
}

// ==================== COMPOUND TESTS ====================

#[test]
fn test_list_literal() {
    match parse_expr("[1, 2, 3,]").kind {
        ExprKind::List(items) => assert_eq!(items.len(), 3),
        other => panic!("Expected list, got {:?}", other),
    }
}

#[test]
fn test_nested_list_literal() {
    match parse_expr("[[1, 2], [3, 4]]").kind {
        ExprKind::List(rows) => {
            assert_eq!(rows.len(), 2);
            assert!(matches!(&rows[0].kind, ExprKind::List(r) if r.len() == 2));
        }
        other => panic!("Expected list, got {:?}", other),
    }
}

#[test]
fn test_empty_list() {
    assert_eq!(parse_expr("[]").kind, ExprKind::List(vec![]));
}

#[test]
fn test_call_no_args() {
    match parse_expr("clr_home()").kind {
        ExprKind::Call { func, args, kwargs } => {
            assert_eq!(func.kind, ExprKind::Identifier("clr_home".to_string()));
            assert!(args.is_empty());
            assert!(kwargs.is_empty());
        }
        other => panic!("Expected call, got {:?}", other),
    }
}

#[test]
fn test_call_with_keyword_args() {
    match parse_expr("normal_cdf(0, 1, mean=5, std=2)").kind {
        ExprKind::Call { args, kwargs, .. } => {
            assert_eq!(args.len(), 2);
            assert_eq!(kwargs.len(), 2);
            assert_eq!(kwargs[0].0, "mean");
            assert_eq!(kwargs[1].1.kind, ExprKind::Literal(Literal::Int(2)));
        }
        other => panic!("Expected call, got {:?}", other),
    }
}

#[test]
fn test_method_call() {
    match parse_expr("m.get_element(1, 2)").kind {
        ExprKind::Call { func, args, .. } => {
            assert_eq!(args.len(), 2);
            match func.kind {
                ExprKind::Attribute { target, name } => {
                    assert_eq!(name, "get_element");
                    assert_eq!(target.kind, ExprKind::Identifier("m".to_string()));
                }
                other => panic!("Expected attribute, got {:?}", other),
            }
        }
        other => panic!("Expected call, got {:?}", other),
    }
}

#[test]
fn test_attribute_access() {
    match parse_expr("c.real").kind {
        ExprKind::Attribute { name, .. } => assert_eq!(name, "real"),
        other => panic!("Expected attribute, got {:?}", other),
    }
}

#[test]
fn test_index() {
    match parse_expr("scores[i + 1]").kind {
        ExprKind::Index { target, index } => {
            assert_eq!(target.kind, ExprKind::Identifier("scores".to_string()));
            assert!(matches!(index.kind, ExprKind::Binary { op: BinaryOp::Add, .. }));
        }
        other => panic!("Expected index, got {:?}", other),
    }
}

#[test]
fn test_chained_postfix() {
    // Matrix("A").inverse() is a call on an attribute of a call
    match parse_expr("Matrix(\"A\").inverse()").kind {
        ExprKind::Call { func, .. } => {
            assert!(matches!(func.kind, ExprKind::Attribute { .. }));
        }
        other => panic!("Expected call, got {:?}", other),
    }
}

#[test]
fn test_unary_not() {
    match parse_expr("not done").kind {
        ExprKind::Unary { op, .. } => assert_eq!(op, UnaryOp::Not),
        other => panic!("Expected unary, got {:?}", other),
    }
}

#[test]
fn test_unary_plus_and_minus() {
    match parse_expr("-+x").kind {
        ExprKind::Unary { op: UnaryOp::Negate, expr } => {
            assert!(matches!(expr.kind, ExprKind::Unary { op: UnaryOp::Plus, .. }));
        }
        other => panic!("Expected unary, got {:?}", other),
    }
}

#[test]
fn test_expression_spans() {
    let expr = parse_expr("a + bc");
    assert_eq!(expr.span, 0..6);
}
