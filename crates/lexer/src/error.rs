use crate::Span;
use thiserror::Error;

/// Errors raised while turning source text into layout tokens
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum LexError {
    #[error("unexpected character '{found}'")]
    InvalidCharacter { found: String, span: Span },

    #[error("tabs are not allowed in indentation")]
    TabIndentation { span: Span },

    #[error("unindent does not match any outer indentation level")]
    InconsistentDedent { span: Span },

    #[error("unexpected indent")]
    UnexpectedIndent { span: Span },

    #[error("unbalanced '{found}'")]
    UnbalancedBracket { found: char, span: Span },
}

impl LexError {
    pub fn span(&self) -> Span {
        match self {
            LexError::InvalidCharacter { span, .. }
            | LexError::TabIndentation { span }
            | LexError::InconsistentDedent { span }
            | LexError::UnexpectedIndent { span }
            | LexError::UnbalancedBracket { span, .. } => span.clone(),
        }
    }
}
