pub mod ast;
pub mod call_analysis;
pub mod error;
pub mod parser;

use ast::Program;
use lexer::LexError;

/// Everything that can stop a source file from becoming an AST
#[derive(Debug)]
pub enum FrontendError {
    Lex(LexError),
    Parse(Vec<error::ParseError>),
}

/// Lex, lay out and parse a whole source file
pub fn parse_source(source: &str) -> Result<Program, FrontendError> {
    let tokens = lexer::tokenize(source).map_err(FrontendError::Lex)?;
    let program = parser::parse_tokens(tokens, source.len()).map_err(FrontendError::Parse)?;
    log::debug!("parsed {} top-level statements", program.statements.len());
    Ok(program)
}

/// Report a frontend failure on stderr with Ariadne
pub fn report_frontend_error(filename: &str, source: &str, error: &FrontendError) -> std::io::Result<()> {
    match error {
        FrontendError::Lex(e) => error::report_lex_error(filename, source, e),
        FrontendError::Parse(errors) => error::report_errors(filename, source, errors),
    }
}

#[cfg(test)]
mod tests;
