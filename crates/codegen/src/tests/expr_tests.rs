// Expression Codegen Tests

use super::{compile_err, lines};
use crate::CodegenError;
use indoc::indoc;
use pretty_assertions::assert_eq;

#[test]
fn test_constant_folding() {
    assert_eq!(lines("x = 1 + 2 * 3\n"), vec!["7→A"]);
    assert_eq!(lines("x = 10 / 4\n"), vec!["2.5→A"]);
    assert_eq!(lines("x = 2 ** 10\n"), vec!["1024→A"]);
}

#[test]
fn test_parentheses_only_where_needed() {
    let src = indoc! {"
        x = 5
        y = (x + 1) * 2
        z = x + 1 * 2
    "};
    assert_eq!(lines(src), vec!["5→A", "(A+1)*2→B", "A+2→C"]);
}

#[test]
fn test_right_operand_grouping() {
    let src = indoc! {"
        x = 5
        y = x - (x - 1)
        z = x / (x * 2)
    "};
    assert_eq!(lines(src), vec!["5→A", "A-(A-1)→B", "A/(A*2)→C"]);
}

#[test]
fn test_power_is_right_associative() {
    let src = indoc! {"
        x = 2
        y = 3
        z = x ** y ** x
    "};
    assert_eq!(lines(src), vec!["2→A", "3→B", "A^(B^A)→C"]);
}

#[test]
fn test_negation_and_power() {
    let src = indoc! {"
        x = 2
        a = -x ** 2
        b = (-x) ** 2
    "};
    assert_eq!(lines(src), vec!["2→A", "⁻A^2→B", "(⁻A)^2→C"]);
}

#[test]
fn test_floor_division_and_modulo() {
    let src = indoc! {"
        x = 7
        a = x // 2
        b = x % 3
    "};
    assert_eq!(lines(src), vec!["7→A", "int(A/2)→B", "remainder(A,3)→C"]);
}

#[test]
fn test_floor_division_folding_is_limited_to_non_negative() {
    assert_eq!(lines("x = 7 // 2\n"), vec!["3→A"]);
    assert_eq!(lines("x = 7 % 3\n"), vec!["1→A"]);
    assert_eq!(lines("x = -7 // 2\n"), vec!["int(⁻7/2)→A"]);
}

#[test]
fn test_comparisons_and_logic() {
    let src = indoc! {"
        x = 5
        a = x > 1 and x < 10
        b = x != 3 or x >= 8
        c = not x == 1
    "};
    assert_eq!(
        lines(src),
        vec!["5→A", "A>1 and A<10→B", "A≠3 or A≥8→C", "not(A=1)→D"]
    );
}

#[test]
fn test_booleans() {
    assert_eq!(lines("t = True\nf = False\n"), vec!["1→A", "0→B"]);
    assert_eq!(lines("t = not True\n"), vec!["0→A"]);
}

#[test]
fn test_number_formatting() {
    assert_eq!(lines("x = 0.00001\n"), vec!["1ᴇ⁻5→A"]);
    assert_eq!(lines("x = 12345678901\n"), vec!["1.2345678901ᴇ10→A"]);
    assert_eq!(lines("x = -2.5\n"), vec!["⁻2.5→A"]);
}

#[test]
fn test_number_out_of_range() {
    assert!(matches!(compile_err("x = 1e100\n"), CodegenError::InvalidOperation { .. }));
}

#[test]
fn test_folded_result_out_of_range() {
    match compile_err("x = 10.0 ** 99 * 100\n") {
        CodegenError::InvalidOperation { reason, span, .. } => {
            assert!(reason.contains("1ᴇ100"));
            assert_eq!(span, Some(4..20));
        }
        other => panic!("Expected InvalidOperation, got {:?}", other),
    }
    assert!(matches!(compile_err("x = 10 ** 400\n"), CodegenError::InvalidOperation { .. }));
    assert_eq!(lines("x = 10.0 ** 99 * 9\n"), vec!["9ᴇ99→A"]);
}

#[test]
fn test_division_by_constant_zero() {
    match compile_err("x = 1 / 0\n") {
        CodegenError::InvalidOperation { reason, .. } => assert_eq!(reason, "division by zero"),
        other => panic!("Expected InvalidOperation, got {:?}", other),
    }
    assert!(matches!(compile_err("y = 3\nx = y % 0\n"), CodegenError::InvalidOperation { .. }));
}

#[test]
fn test_strings() {
    assert_eq!(lines("s = \"HELLO\"\n"), vec!["\"HELLO\"→Str1"]);
    assert_eq!(lines("s = \"AB\" + \"CD\"\n"), vec!["\"AB\"+\"CD\"→Str1"]);
}

#[test]
fn test_string_with_quote_rejected() {
    assert!(matches!(
        compile_err("s = 'say \"hi\"'\n"),
        CodegenError::InvalidOperation { .. }
    ));
}

#[test]
fn test_none_has_no_value() {
    assert!(matches!(compile_err("x = None\n"), CodegenError::InvalidOperation { .. }));
}

#[test]
fn test_list_literals() {
    assert_eq!(lines("lst = [1, 2, 3]\n"), vec!["{1,2,3}→∟LST"]);
    assert_eq!(lines("lst = [1, 2.5]\n"), vec!["{1,2.5}→∟LST"]);
}

#[test]
fn test_list_arithmetic_is_elementwise() {
    let src = indoc! {"
        lst = [1, 2, 3]
        dbl = lst * 2
    "};
    assert_eq!(lines(src), vec!["{1,2,3}→∟LST", "∟LST*2→∟DBL"]);
}

#[test]
fn test_list_indexing() {
    let src = indoc! {"
        lst = [4, 5, 6]
        i = 1
        a = lst[0]
        b = lst[i]
        c = lst[-1]
        d = lst[-2]
    "};
    assert_eq!(
        lines(src),
        vec![
            "{4,5,6}→∟LST",
            "1→A",
            "∟LST(1)→B",
            "∟LST(A+1)→C",
            "∟LST(dim(∟LST))→D",
            "∟LST(dim(∟LST)-1)→E",
        ]
    );
}

#[test]
fn test_huge_negative_index_rejected() {
    let src = indoc! {"
        xs = [1, 2, 3]
        y = xs[-(2 ** 63)]
    "};
    match compile_err(src) {
        CodegenError::InvalidOperation { operation, span, .. } => {
            assert_eq!(operation, "list index");
            assert_eq!(span, Some(22..31));
        }
        other => panic!("Expected InvalidOperation, got {:?}", other),
    }
}

#[test]
fn test_index_must_be_int() {
    let src = indoc! {"
        lst = [4, 5, 6]
        a = lst[0.5]
    "};
    assert!(matches!(compile_err(src), CodegenError::TypeError { .. }));
}

#[test]
fn test_index_literal_list_rejected() {
    assert!(matches!(compile_err("a = [1, 2][0]\n"), CodegenError::InvalidOperation { .. }));
}

#[test]
fn test_empty_list_needs_annotation() {
    assert!(matches!(compile_err("lst = []\n"), CodegenError::MissingValue { .. }));
}

#[test]
fn test_undefined_variable() {
    match compile_err("y = z + 1\n") {
        CodegenError::UndefinedSymbol { name, context, span } => {
            assert_eq!(name, "z");
            assert_eq!(context, "program TEST");
            assert_eq!(span, Some(4..5));
        }
        other => panic!("Expected UndefinedSymbol, got {:?}", other),
    }
}

#[test]
fn test_function_name_is_not_a_value() {
    assert!(matches!(compile_err("x = sqrt\n"), CodegenError::InvalidOperation { .. }));
}

#[test]
fn test_mixed_operand_types() {
    let src = indoc! {"
        s = \"A\"
        x = s + 1
    "};
    assert!(matches!(compile_err(src), CodegenError::TypeError { .. }));

    let src = indoc! {"
        m = [[1, 2], [3, 4]]
        x = m + 1
    "};
    assert!(matches!(compile_err(src), CodegenError::TypeError { .. }));
}
