// Number Literal Tests
//
// Integers, floats in all their spellings, and imaginary literals.

use crate::token::Token;
use logos::Logos;

fn single(input: &str) -> Token {
    let mut lexer = Token::lexer(input);
    let token = lexer.next().expect("no token").expect("lex error");
    assert_eq!(lexer.next(), None, "Expected a single token for {}", input);
    token
}

#[test]
fn test_integer() {
    assert_eq!(single("42"), Token::Int(42));
    assert_eq!(single("0"), Token::Int(0));
}

#[test]
fn test_integer_overflow_is_error() {
    let mut lexer = Token::lexer("99999999999999999999");
    assert_eq!(lexer.next(), Some(Err(())));
}

#[test]
fn test_float_with_fraction() {
    assert_eq!(single("3.14"), Token::Float("3.14".to_string()));
}

#[test]
fn test_float_leading_dot() {
    assert_eq!(single(".5"), Token::Float(".5".to_string()));
}

#[test]
fn test_float_trailing_dot() {
    assert_eq!(single("2."), Token::Float("2.".to_string()));
}

#[test]
fn test_float_exponent() {
    assert_eq!(single("1e3"), Token::Float("1e3".to_string()));
    assert_eq!(single("2.5E-4"), Token::Float("2.5E-4".to_string()));
}

#[test]
fn test_imaginary_integer() {
    assert_eq!(single("2j"), Token::Imaginary("2".to_string()));
}

#[test]
fn test_imaginary_float() {
    assert_eq!(single("1.5j"), Token::Imaginary("1.5".to_string()));
    assert_eq!(single("3J"), Token::Imaginary("3".to_string()));
}

#[test]
fn test_negative_number_is_two_tokens() {
    let tokens: Vec<_> = Token::lexer("-7").collect();
    assert_eq!(tokens, vec![Ok(Token::Minus), Ok(Token::Int(7))]);
}

#[test]
fn test_number_then_identifier() {
    let tokens: Vec<_> = Token::lexer("2 x").collect();
    assert_eq!(
        tokens,
        vec![Ok(Token::Int(2)), Ok(Token::Identifier("x".to_string()))]
    );
}
