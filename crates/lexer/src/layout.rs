// Indentation layout
//
// Python blocks are delimited by indentation. This pass turns the flat logos
// stream into one where every logical line ends in `Newline` and block
// boundaries are explicit `Indent` / `Dedent` tokens, so the grammar can stay
// context free.

use crate::error::LexError;
use crate::token::Token;
use crate::{Span, Spanned};

pub fn apply(source: &str, raw: Vec<Spanned>) -> Result<Vec<Spanned>, LexError> {
    let mut out: Vec<Spanned> = Vec::with_capacity(raw.len() + 8);
    let mut levels: Vec<usize> = vec![0];
    let mut open: Vec<(char, Span)> = Vec::new();
    let mut at_line_start = true;

    for (token, span) in raw {
        if token == Token::Newline {
            // Newlines inside brackets join physical lines; blank lines are dropped
            if open.is_empty() && !at_line_start {
                out.push((Token::Newline, span));
                at_line_start = true;
            }
            continue;
        }

        if at_line_start {
            let (line_start, width) = indentation(source, span.start)?;
            let current = levels.last().copied().unwrap_or(0);

            if width > current {
                if !ends_with_colon(&out) {
                    return Err(LexError::UnexpectedIndent {
                        span: line_start..span.start,
                    });
                }
                levels.push(width);
                out.push((Token::Indent, span.start..span.start));
            } else if width < current {
                while levels.last().copied().unwrap_or(0) > width {
                    levels.pop();
                    out.push((Token::Dedent, span.start..span.start));
                }
                if levels.last().copied().unwrap_or(0) != width {
                    return Err(LexError::InconsistentDedent {
                        span: line_start..span.start,
                    });
                }
            }
            at_line_start = false;
        }

        match token {
            Token::LParen => open.push(('(', span.clone())),
            Token::LBracket => open.push(('[', span.clone())),
            Token::RParen => close(&mut open, '(', ')', &span)?,
            Token::RBracket => close(&mut open, '[', ']', &span)?,
            _ => {}
        }

        out.push((token, span));
    }

    if let Some((found, span)) = open.pop() {
        return Err(LexError::UnbalancedBracket { found, span });
    }

    let end = source.len();
    if !at_line_start {
        out.push((Token::Newline, end..end));
    }
    while levels.len() > 1 {
        levels.pop();
        out.push((Token::Dedent, end..end));
    }

    log::trace!("layout produced {} tokens", out.len());
    Ok(out)
}

/// Width of the indentation before `pos` and the offset where its line starts.
fn indentation(source: &str, pos: usize) -> Result<(usize, usize), LexError> {
    let line_start = source[..pos].rfind('\n').map_or(0, |i| i + 1);
    let prefix = &source[line_start..pos];

    if let Some(tab) = prefix.find('\t') {
        let at = line_start + tab;
        return Err(LexError::TabIndentation { span: at..at + 1 });
    }

    Ok((line_start, prefix.chars().count()))
}

// The previous logical line must have opened a block for an indent to be legal
fn ends_with_colon(out: &[Spanned]) -> bool {
    out.len() >= 2 && out[out.len() - 2].0 == Token::Colon
}

fn close(open: &mut Vec<(char, Span)>, expected: char, found: char, span: &Span) -> Result<(), LexError> {
    match open.pop() {
        Some((c, _)) if c == expected => Ok(()),
        _ => Err(LexError::UnbalancedBracket {
            found,
            span: span.clone(),
        }),
    }
}
