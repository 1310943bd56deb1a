// String Literal Tests
//
// Both quote styles, escapes and unterminated strings.

use crate::token::Token;
use logos::Logos;

fn single(input: &str) -> Result<Token, ()> {
    let mut lexer = Token::lexer(input);
    lexer.next().expect("no token")
}

#[test]
fn test_double_quoted() {
    assert_eq!(single("\"HELLO\""), Ok(Token::String("HELLO".to_string())));
}

#[test]
fn test_single_quoted() {
    assert_eq!(single("'A'"), Ok(Token::String("A".to_string())));
}

#[test]
fn test_empty_string() {
    assert_eq!(single("\"\""), Ok(Token::String(String::new())));
}

#[test]
fn test_escaped_quote() {
    assert_eq!(
        single(r#""SAY \"HI\"""#),
        Ok(Token::String("SAY \"HI\"".to_string()))
    );
}

#[test]
fn test_escape_sequences() {
    assert_eq!(
        single(r#""A\tB\nC\\""#),
        Ok(Token::String("A\tB\nC\\".to_string()))
    );
}

#[test]
fn test_unknown_escape_kept() {
    assert_eq!(single(r#""\q""#), Ok(Token::String("\\q".to_string())));
}

#[test]
fn test_other_quote_inside() {
    assert_eq!(single("\"IT'S\""), Ok(Token::String("IT'S".to_string())));
}

#[test]
fn test_hash_inside_string_is_not_comment() {
    assert_eq!(single("\"#1\""), Ok(Token::String("#1".to_string())));
}

#[test]
fn test_unterminated_string_is_error() {
    let tokens: Vec<_> = Token::lexer("\"OOPS").collect();
    assert!(tokens.contains(&Err(())));
}
