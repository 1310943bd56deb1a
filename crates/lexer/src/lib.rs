pub mod error;
pub mod layout;
pub mod token;

use logos::Logos;
use std::ops::Range;
use token::Token;

pub use error::LexError;

pub type Span = Range<usize>;
pub type Spanned = (Token, Span);

/// Tokenize a source string and return a Vec of tokens, without layout
pub fn lex(source: &str) -> Vec<Token> {
    Token::lexer(source)
        .filter_map(|t| t.ok())
        .collect()
}

/// Tokenize a whole source file into spanned tokens with Indent/Dedent/Newline layout
pub fn tokenize(source: &str) -> Result<Vec<Spanned>, LexError> {
    let mut raw = Vec::new();
    let mut lexer = Token::lexer(source);

    while let Some(result) = lexer.next() {
        match result {
            Ok(token) => raw.push((token, lexer.span())),
            Err(()) => {
                return Err(LexError::InvalidCharacter {
                    found: lexer.slice().to_string(),
                    span: lexer.span(),
                })
            }
        }
    }

    log::debug!("lexed {} raw tokens", raw.len());
    layout::apply(source, raw)
}

#[cfg(test)]
mod tests;
