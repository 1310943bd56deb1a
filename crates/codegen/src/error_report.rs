// Error reporting with Ariadne for codegen
//
// Renders code generation errors against the source file (E100-E105).

use crate::CodegenError;
use ariadne::{Color, Config, Label, Report, ReportKind, Source};
use std::ops::Range;

type SpanRef<'a> = (&'a str, Range<usize>);

fn build_report<'a>(filename: &'a str, error: &CodegenError, color: bool) -> Report<'a, SpanRef<'a>> {
    let (code, message, help, label) = match error {
        CodegenError::ResourceExhausted { resource, needed_by, .. } => (
            "E101",
            format!("Out of {}", resource),
            format!("'{}' needs a slot but every one is taken; reuse variables or split the program", needed_by),
            format!("no free slot for '{}'", needed_by),
        ),
        CodegenError::TypeError { expected, found, context, .. } => (
            "E102",
            format!("Type Error in {}", context),
            format!("Expected type '{}', but found '{}'", expected, found),
            format!("This expression has type '{}', not '{}'", found, expected),
        ),
        CodegenError::UndefinedSymbol { name, context, .. } => (
            "E103",
            format!("Undefined symbol '{}'", name),
            format!("Symbol '{}' is not defined in {}", name, context),
            format!("'{}' used here but not defined", name),
        ),
        CodegenError::InvalidOperation { operation, reason, .. } => (
            "E104",
            format!("Invalid operation: {}", operation),
            reason.clone(),
            format!("'{}' cannot be used here", operation),
        ),
        CodegenError::MissingValue { what, context, .. } => (
            "E105",
            format!("Missing {}", what),
            format!("{} required in {}", what, context),
            format!("Missing {} here", what),
        ),
        CodegenError::General(msg) => ("E100", msg.clone(), String::new(), String::new()),
    };

    let span = error.span().cloned();
    let offset = span.as_ref().map(|s| s.start).unwrap_or(0);
    let report = Report::build(ReportKind::Error, filename, offset)
        .with_config(Config::default().with_color(color))
        .with_code(code)
        .with_message(message);

    let report = if help.is_empty() { report } else { report.with_help(help) };

    let report = if let Some(span) = span {
        report.with_label(
            Label::new((filename, span))
                .with_message(label)
                .with_color(Color::Red),
        )
    } else {
        report
    };

    report.finish()
}

/// Print a codegen error to stderr
pub fn report_codegen_error(filename: &str, source: &str, error: &CodegenError) -> std::io::Result<()> {
    build_report(filename, error, true).eprint((filename, Source::from(source)))
}

/// Render a codegen error without colors
pub fn render_codegen_error(filename: &str, source: &str, error: &CodegenError) -> String {
    let mut out = Vec::new();
    // Writing into a Vec cannot fail
    let _ = build_report(filename, error, false).write((filename, Source::from(source)), &mut out);
    String::from_utf8_lossy(&out).into_owned()
}
