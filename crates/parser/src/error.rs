// Error reporting with Ariadne
//
// Lexer and parser failures rendered against the source file.

use ariadne::{Color, Config, Label, Report, ReportKind, Source};
use chumsky::error::{Simple, SimpleReason};
use lexer::token::Token;
use lexer::LexError;
use std::ops::Range;

/// Type alias for Chumsky parser errors
pub type ParseError = Simple<Token>;

type SpanRef<'a> = (&'a str, Range<usize>);

fn lex_report<'a>(filename: &'a str, error: &LexError, color: bool) -> Report<'a, SpanRef<'a>> {
    let span = error.span();
    let help = match error {
        LexError::InvalidCharacter { .. } => "remove the character or put it inside a string",
        LexError::TabIndentation { .. } => "indent with spaces",
        LexError::InconsistentDedent { .. } => "dedent to the column of an enclosing block",
        LexError::UnexpectedIndent { .. } => "only lines after a ':' may be indented further",
        LexError::UnbalancedBracket { .. } => "check that every '(' and '[' is closed in order",
    };

    Report::build(ReportKind::Error, filename, span.start)
        .with_config(Config::default().with_color(color))
        .with_code("E000")
        .with_message("Syntax Error")
        .with_label(
            Label::new((filename, span))
                .with_message(error.to_string())
                .with_color(Color::Red),
        )
        .with_help(help)
        .finish()
}

fn parse_report<'a>(filename: &'a str, error: &ParseError, color: bool) -> Report<'a, SpanRef<'a>> {
    let span = error.span();
    let msg = match error.reason() {
        SimpleReason::Custom(msg) => msg.clone(),
        SimpleReason::Unclosed { delimiter, .. } => format!("unclosed {}", delimiter),
        SimpleReason::Unexpected => match error.found() {
            Some(found) => format!("unexpected {}", format_found(found)),
            None => "unexpected end of input".to_string(),
        },
    };

    let report = Report::build(ReportKind::Error, filename, span.start)
        .with_config(Config::default().with_color(color))
        .with_code("E001")
        .with_message("Parse Error")
        .with_label(
            Label::new((filename, span))
                .with_message(msg)
                .with_color(Color::Red),
        );

    // Add expected tokens if available (limit to 5 to avoid overwhelming output)
    let report = if error.expected().len() > 0 {
        let mut expected: Vec<String> = error.expected().map(format_expected).collect();
        expected.sort();
        expected.dedup();

        let help_msg = if expected.len() > 5 {
            format!("Expected one of: {}, ...", expected[..5].join(", "))
        } else {
            format!("Expected: {}", expected.join(", "))
        };

        report.with_help(help_msg)
    } else {
        report
    };

    report.finish()
}

/// Print a lexer error to stderr
pub fn report_lex_error(filename: &str, source: &str, error: &LexError) -> std::io::Result<()> {
    lex_report(filename, error, true).eprint((filename, Source::from(source)))
}

/// Converts Chumsky errors to Ariadne reports on stderr
pub fn report_errors(filename: &str, source: &str, errors: &[ParseError]) -> std::io::Result<()> {
    for error in errors {
        parse_report(filename, error, true).eprint((filename, Source::from(source)))?;
    }
    Ok(())
}

/// Render parse errors without colors, for snapshots and tests
pub fn render_errors(filename: &str, source: &str, errors: &[ParseError]) -> String {
    let mut out = Vec::new();
    for error in errors {
        // Writing into a Vec cannot fail
        let _ = parse_report(filename, error, false).write((filename, Source::from(source)), &mut out);
    }
    String::from_utf8_lossy(&out).into_owned()
}

/// Render a lexer error without colors
pub fn render_lex_error(filename: &str, source: &str, error: &LexError) -> String {
    let mut out = Vec::new();
    let _ = lex_report(filename, error, false).write((filename, Source::from(source)), &mut out);
    String::from_utf8_lossy(&out).into_owned()
}

fn format_found(token: &Token) -> String {
    match token {
        Token::Newline => "end of line".to_string(),
        Token::Indent => "indent".to_string(),
        Token::Dedent => "dedent".to_string(),
        Token::Identifier(name) => format!("identifier '{}'", name),
        Token::String(_) => "string".to_string(),
        other => format!("'{}'", other),
    }
}

/// Format expected token for human-readable output
fn format_expected(token: &Option<Token>) -> String {
    match token {
        Some(Token::Identifier(_)) => "identifier".to_string(),
        Some(Token::Int(_)) => "integer".to_string(),
        Some(Token::Float(_)) => "float".to_string(),
        Some(Token::Imaginary(_)) => "imaginary literal".to_string(),
        Some(Token::String(_)) => "string".to_string(),
        Some(Token::Newline) => "end of line".to_string(),
        Some(Token::Indent) => "indented block".to_string(),
        Some(Token::Dedent) => "dedent".to_string(),
        Some(
            t @ (Token::Def
            | Token::Return
            | Token::If
            | Token::Elif
            | Token::Else
            | Token::While
            | Token::For
            | Token::In
            | Token::Pass
            | Token::And
            | Token::Or
            | Token::Not
            | Token::From
            | Token::Import),
        ) => format!("keyword '{}'", t),
        Some(t) => format!("'{}'", t),
        None => "end of input".to_string(),
    }
}
