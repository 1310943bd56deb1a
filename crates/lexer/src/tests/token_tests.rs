// Token Recognition Tests
//
// Keywords, operators, delimiters and identifiers.

use crate::token::Token;
use logos::Logos;

// Helper function to tokenize input and return all tokens
fn tokenize(input: &str) -> Vec<Result<Token, ()>> {
    Token::lexer(input).collect()
}

// Helper function to tokenize and assert single token
fn assert_single_token(input: &str, expected: Token) {
    let mut lexer = Token::lexer(input);
    let token = lexer.next();
    assert_eq!(token, Some(Ok(expected)), "Failed to match token for input: {}", input);
    assert_eq!(lexer.next(), None, "Expected single token, found more");
}

// ==================== KEYWORD TESTS ====================

#[test]
fn test_keyword_def() {
    assert_single_token("def", Token::Def);
}

#[test]
fn test_keyword_return() {
    assert_single_token("return", Token::Return);
}

#[test]
fn test_keyword_conditionals() {
    assert_single_token("if", Token::If);
    assert_single_token("elif", Token::Elif);
    assert_single_token("else", Token::Else);
}

#[test]
fn test_keyword_loops() {
    assert_single_token("while", Token::While);
    assert_single_token("for", Token::For);
    assert_single_token("in", Token::In);
}

#[test]
fn test_keyword_logic() {
    assert_single_token("and", Token::And);
    assert_single_token("or", Token::Or);
    assert_single_token("not", Token::Not);
}

#[test]
fn test_keyword_constants() {
    assert_single_token("True", Token::True);
    assert_single_token("False", Token::False);
    assert_single_token("None", Token::None);
}

#[test]
fn test_keyword_imports() {
    assert_single_token("from", Token::From);
    assert_single_token("import", Token::Import);
    assert_single_token("pass", Token::Pass);
}

#[test]
fn test_lowercase_true_is_identifier() {
    assert_single_token("true", Token::Identifier("true".to_string()));
}

#[test]
fn test_keyword_prefix_is_identifier() {
    assert_single_token("define", Token::Identifier("define".to_string()));
    assert_single_token("iffy", Token::Identifier("iffy".to_string()));
    assert_single_token("order", Token::Identifier("order".to_string()));
}

// ==================== IDENTIFIER TESTS ====================

#[test]
fn test_identifier_snake_case() {
    assert_single_token("rand_int", Token::Identifier("rand_int".to_string()));
}

#[test]
fn test_identifier_class_names() {
    assert_single_token("Matrix", Token::Identifier("Matrix".to_string()));
    assert_single_token("Complex", Token::Identifier("Complex".to_string()));
}

#[test]
fn test_identifier_leading_underscore() {
    assert_single_token("_tmp2", Token::Identifier("_tmp2".to_string()));
}

// ==================== OPERATOR TESTS ====================

#[test]
fn test_arithmetic_operators() {
    assert_single_token("+", Token::Plus);
    assert_single_token("-", Token::Minus);
    assert_single_token("*", Token::Star);
    assert_single_token("/", Token::Slash);
    assert_single_token("%", Token::Percent);
    assert_single_token("**", Token::Pow);
    assert_single_token("//", Token::DoubleSlash);
}

#[test]
fn test_compound_assignment_operators() {
    assert_single_token("+=", Token::PlusEq);
    assert_single_token("-=", Token::MinusEq);
    assert_single_token("*=", Token::StarEq);
    assert_single_token("/=", Token::SlashEq);
    assert_single_token("%=", Token::PercentEq);
}

#[test]
fn test_comparison_operators() {
    assert_single_token("==", Token::DoubleEq);
    assert_single_token("!=", Token::NotEq);
    assert_single_token("<", Token::Lt);
    assert_single_token(">", Token::Gt);
    assert_single_token("<=", Token::LtEq);
    assert_single_token(">=", Token::GtEq);
}

#[test]
fn test_arrow_and_assign() {
    assert_single_token("->", Token::Arrow);
    assert_single_token("=", Token::Eq);
}

#[test]
fn test_delimiters() {
    let tokens = tokenize("( ) [ ] , : .");
    assert_eq!(
        tokens,
        vec![
            Ok(Token::LParen),
            Ok(Token::RParen),
            Ok(Token::LBracket),
            Ok(Token::RBracket),
            Ok(Token::Comma),
            Ok(Token::Colon),
            Ok(Token::Dot),
        ]
    );
}

#[test]
fn test_bang_alone_is_error() {
    let tokens = tokenize("!");
    assert_eq!(tokens, vec![Err(())]);
}

// ==================== SEQUENCE TESTS ====================

#[test]
fn test_function_header() {
    let tokens = tokenize("def area(r: float) -> float:");
    assert_eq!(
        tokens,
        vec![
            Ok(Token::Def),
            Ok(Token::Identifier("area".to_string())),
            Ok(Token::LParen),
            Ok(Token::Identifier("r".to_string())),
            Ok(Token::Colon),
            Ok(Token::Identifier("float".to_string())),
            Ok(Token::RParen),
            Ok(Token::Arrow),
            Ok(Token::Identifier("float".to_string())),
            Ok(Token::Colon),
        ]
    );
}

#[test]
fn test_method_call_sequence() {
    let tokens = tokenize("m.set_element(1, 2, x)");
    assert_eq!(tokens[0], Ok(Token::Identifier("m".to_string())));
    assert_eq!(tokens[1], Ok(Token::Dot));
    assert_eq!(tokens[2], Ok(Token::Identifier("set_element".to_string())));
    assert_eq!(tokens.len(), 10);
}

#[test]
fn test_comment_line_yields_no_token() {
    let tokens = tokenize("# header comment\nx");
    assert_eq!(tokens, vec![Ok(Token::Newline), Ok(Token::Identifier("x".to_string()))]);
}

#[test]
fn test_comment_is_skipped() {
    let tokens = tokenize("x = 1  # store one");
    assert_eq!(
        tokens,
        vec![
            Ok(Token::Identifier("x".to_string())),
            Ok(Token::Eq),
            Ok(Token::Int(1)),
        ]
    );
}

#[test]
fn test_newline_token() {
    let tokens = tokenize("a\nb\r\nc");
    assert_eq!(tokens.len(), 5);
    assert_eq!(tokens[1], Ok(Token::Newline));
    assert_eq!(tokens[3], Ok(Token::Newline));
}

#[test]
fn test_display_round_trips_operators() {
    assert_eq!(Token::Pow.to_string(), "**");
    assert_eq!(Token::DoubleSlash.to_string(), "//");
    assert_eq!(Token::Arrow.to_string(), "->");
    assert_eq!(Token::Imaginary("2".to_string()).to_string(), "2j");
}
