// Matrix Codegen Tests

use super::{compile_err, lines};
use crate::CodegenError;
use indoc::indoc;
use pretty_assertions::assert_eq;

#[test]
fn test_matrix_binding_emits_nothing() {
    assert!(lines("m = Matrix(\"A\")\n").is_empty());
}

#[test]
fn test_matrix_label_must_be_a_to_j() {
    match compile_err("m = Matrix(\"K\")\n") {
        CodegenError::InvalidOperation { operation, .. } => assert_eq!(operation, "Matrix()"),
        other => panic!("Expected InvalidOperation, got {:?}", other),
    }
    assert!(matches!(compile_err("m = Matrix(\"AB\")\n"), CodegenError::InvalidOperation { .. }));
}

#[test]
fn test_set_and_get_element() {
    let src = indoc! {"
        m = Matrix(\"A\")
        m.set_element(1, 2, 5)
        x = m.get_element(1, 2)
    "};
    assert_eq!(lines(src), vec!["5→[A](1,2)", "[A](1,2)→A"]);
}

#[test]
fn test_element_indexing_is_zero_based() {
    let src = indoc! {"
        m = Matrix(\"C\")
        m[0][1] = 3
        y = m[1][0]
    "};
    assert_eq!(lines(src), vec!["3→[C](1,2)", "[C](2,1)→A"]);
}

#[test]
fn test_element_methods_need_a_matrix_variable() {
    match compile_err("d = identity(3).get_element(1, 1)\n") {
        CodegenError::InvalidOperation { operation, span, .. } => {
            assert_eq!(operation, "Matrix.get_element");
            assert_eq!(span, Some(4..15));
        }
        other => panic!("Expected InvalidOperation, got {:?}", other),
    }
    assert!(matches!(
        compile_err("rref(identity(2)).set_element(1, 1, 5)\n"),
        CodegenError::InvalidOperation { .. }
    ));
    assert_eq!(lines("d = det(identity(3))\n"), vec!["det(identity(3))→A"]);
}

#[test]
fn test_row_indexing_rejected() {
    let src = indoc! {"
        m = Matrix(\"A\")
        r = m[0]
    "};
    assert!(matches!(compile_err(src), CodegenError::InvalidOperation { .. }));
}

#[test]
fn test_matrix_literal() {
    assert_eq!(lines("m = [[1, 2], [3, 4]]\n"), vec!["[[1,2][3,4]]→[A]"]);
}

#[test]
fn test_literal_skips_named_labels() {
    let src = indoc! {"
        m = [[1, 2], [3, 4]]
        a = Matrix(\"A\")
    "};
    assert_eq!(lines(src), vec!["[[1,2][3,4]]→[B]"]);
}

#[test]
fn test_literal_skips_keyword_labels() {
    let src = indoc! {"
        x = [[1, 2], [3, 4]]
        m = Matrix(name=\"A\")
        m.set_element(1, 1, 9)
        disp(x)
    "};
    assert_eq!(lines(src), vec!["[[1,2][3,4]]→[B]", "9→[A](1,1)", "Disp [B]"]);
}

#[test]
fn test_ragged_matrix_literal() {
    assert!(matches!(
        compile_err("m = [[1, 2], [3]]\n"),
        CodegenError::InvalidOperation { .. }
    ));
}

#[test]
fn test_matrix_functions() {
    let src = indoc! {"
        m = Matrix(\"A\")
        d = det(m)
        t = transpose(m)
        r = rref(m)
    "};
    assert_eq!(lines(src), vec!["det([A])→A", "[A]ᵀ→[B]", "rref([A])→[C]"]);
}

#[test]
fn test_matrix_methods() {
    let src = indoc! {"
        m = Matrix(\"A\")
        n = m.inverse()
        d = m.determinant()
        dims = m.dimensions()
        s = m.name
    "};
    assert_eq!(
        lines(src),
        vec!["[A]⁻¹→[B]", "det([A])→A", "dim([A])→∟DIMS", "\"A\"→Str1"]
    );
}

#[test]
fn test_trace_needs_a_matrix_variable() {
    let src = indoc! {"
        m = Matrix(\"A\")
        t = trace(m)
    "};
    assert_eq!(lines(src), vec!["sum(seq([A](θ,θ),θ,1,min(dim([A]))))→A"]);
    assert!(matches!(
        compile_err("t = trace([[1, 2], [3, 4]])\n"),
        CodegenError::InvalidOperation { .. }
    ));
}

#[test]
fn test_matrix_arithmetic() {
    let src = indoc! {"
        a = Matrix(\"A\")
        b = Matrix(\"B\")
        p = a * b
        q = a * 2
    "};
    assert_eq!(lines(src), vec!["[A]*[B]→[C]", "[A]*2→[D]"]);
}

#[test]
fn test_matrix_plus_number_rejected() {
    let src = indoc! {"
        a = Matrix(\"A\")
        p = a + 1
    "};
    assert!(matches!(compile_err(src), CodegenError::TypeError { .. }));
}

#[test]
fn test_unknown_matrix_method() {
    let src = indoc! {"
        m = Matrix(\"A\")
        m.resize(2, 2)
    "};
    match compile_err(src) {
        CodegenError::UndefinedSymbol { name, .. } => assert_eq!(name, "Matrix.resize"),
        other => panic!("Expected UndefinedSymbol, got {:?}", other),
    }
}

#[test]
fn test_rebinding_matrix_to_number_rejected() {
    let src = indoc! {"
        x = 1
        x = Matrix(\"A\")
    "};
    assert!(matches!(compile_err(src), CodegenError::TypeError { .. }));
}
