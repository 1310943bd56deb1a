// Codegen Error Tests

use super::compile_err;
use crate::{render_codegen_error, CodegenError};
use pretty_assertions::assert_eq;

#[test]
fn test_exit_codes() {
    let cases = [
        (CodegenError::General("boom".to_string()), 100),
        (
            CodegenError::ResourceExhausted {
                resource: "real variables (A-Z)".to_string(),
                needed_by: "x".to_string(),
                span: None,
            },
            101,
        ),
        (
            CodegenError::TypeError {
                expected: "int".to_string(),
                found: "str".to_string(),
                context: "test".to_string(),
                span: None,
            },
            102,
        ),
        (
            CodegenError::UndefinedSymbol {
                name: "x".to_string(),
                context: "test".to_string(),
                span: None,
            },
            103,
        ),
        (
            CodegenError::InvalidOperation {
                operation: "op".to_string(),
                reason: "why".to_string(),
                span: None,
            },
            104,
        ),
        (
            CodegenError::MissingValue {
                what: "value".to_string(),
                context: "test".to_string(),
                span: None,
            },
            105,
        ),
    ];
    for (error, code) in cases {
        assert_eq!(error.exit_code(), code, "{:?}", error);
    }
}

#[test]
fn test_real_variables_run_out() {
    let source: String = (0..27).map(|i| format!("v{} = {}\n", i, i)).collect();
    match compile_err(&source) {
        CodegenError::ResourceExhausted { needed_by, .. } => assert_eq!(needed_by, "v26"),
        other => panic!("Expected ResourceExhausted, got {:?}", other),
    }
}

#[test]
fn test_string_variables_run_out() {
    let source: String = (0..11).map(|i| format!("s{} = \"X\"\n", i)).collect();
    assert!(matches!(compile_err(&source), CodegenError::ResourceExhausted { .. }));
}

#[test]
fn test_matrices_run_out() {
    let source: String = (0..11).map(|i| format!("m{} = [[{}]]\n", i, i)).collect();
    assert!(matches!(compile_err(&source), CodegenError::ResourceExhausted { .. }));
}

#[test]
fn test_errors_carry_spans() {
    let error = compile_err("x = 1\ny = x + q\n");
    assert_eq!(error.span(), Some(&(14..15)));
}

#[test]
fn test_rendered_report() {
    let source = "y = z + 1\n";
    let error = compile_err(source);
    let report = render_codegen_error("test.py", source, &error);
    assert!(report.contains("E103"), "{}", report);
    assert!(report.contains("Undefined symbol 'z'"), "{}", report);
    assert!(report.contains("test.py"), "{}", report);
}

#[test]
fn test_rendered_report_without_span() {
    let error = CodegenError::General("internal failure".to_string());
    let report = render_codegen_error("test.py", "", &error);
    assert!(report.contains("E100"));
    assert!(report.contains("internal failure"));
}

#[test]
fn test_display_messages() {
    let error = compile_err("x = 1 / 0\n");
    assert!(error.to_string().contains("division by zero"), "{}", error);
}
