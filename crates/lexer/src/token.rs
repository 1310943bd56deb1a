use logos::{Lexer, Logos};
use std::fmt;

#[derive(Logos, Debug, PartialEq, Eq, Hash, Clone)]
#[logos(skip r"[ \t\f]+")] // Spaces and tabs between tokens; indentation is measured from spans
pub enum Token {
    // --- Keywords ---
    #[token("def")]
    Def,

    #[token("return")]
    Return,

    #[token("if")]
    If,

    #[token("elif")]
    Elif,

    #[token("else")]
    Else,

    #[token("while")]
    While,

    #[token("for")]
    For,

    #[token("in")]
    In,

    #[token("pass")]
    Pass,

    #[token("and")]
    And,

    #[token("or")]
    Or,

    #[token("not")]
    Not,

    #[token("True")]
    True,

    #[token("False")]
    False,

    #[token("None")]
    None,

    #[token("from")]
    From,

    #[token("import")]
    Import,

    // --- Literals ---

    // Identifiers: variable names, functions, type names (ex: "scores", "Matrix")
    #[regex(r"[a-zA-Z_][a-zA-Z0-9_]*", |lex| lex.slice().to_string())]
    Identifier(String),

    // Integers (ex: 42, 100)
    #[regex(r"[0-9]+", |lex| lex.slice().parse::<i64>().ok())]
    Int(i64),

    // Floats keep their source text so the token stays hashable (ex: 3.14, .5, 2., 1e3)
    #[regex(r"[0-9]+\.[0-9]*([eE][+-]?[0-9]+)?", |lex| lex.slice().to_string())]
    #[regex(r"\.[0-9]+([eE][+-]?[0-9]+)?", |lex| lex.slice().to_string())]
    #[regex(r"[0-9]+[eE][+-]?[0-9]+", |lex| lex.slice().to_string())]
    Float(String),

    // Imaginary literals without the trailing 'j' (ex: 2j -> "2")
    #[regex(r"([0-9]+(\.[0-9]*)?|\.[0-9]+)([eE][+-]?[0-9]+)?[jJ]", |lex| {
        let slice = lex.slice();
        slice[..slice.len() - 1].to_string()
    })]
    Imaginary(String),

    // Strings, unescaped (ex: "Hello" or 'Hello')
    #[regex(r#""([^"\\\r\n]|\\.)*""#, unescape)]
    #[regex(r#"'([^'\\\r\n]|\\.)*'"#, unescape)]
    String(String),

    // --- Operators ---
    #[token("=")]
    Eq,

    #[token("==")]
    DoubleEq,

    #[token("!=")]
    NotEq,

    #[token("+")]
    Plus,

    #[token("+=")]
    PlusEq,

    #[token("-")]
    Minus,

    #[token("-=")]
    MinusEq,

    #[token("*")]
    Star,

    #[token("*=")]
    StarEq,

    #[token("**")]
    Pow,

    #[token("/")]
    Slash,

    #[token("/=")]
    SlashEq,

    #[token("//")]
    DoubleSlash,

    #[token("%")]
    Percent,

    #[token("%=")]
    PercentEq,

    #[token(">")]
    Gt,

    #[token("<")]
    Lt,

    #[token(">=")]
    GtEq,

    #[token("<=")]
    LtEq,

    #[token("->")]
    Arrow, // Function return (def f() -> int)

    #[token(".")]
    Dot,

    #[token(",")]
    Comma,

    #[token(":")]
    Colon,

    // --- Delimiters ---
    #[token("(")]
    LParen,

    #[token(")")]
    RParen,

    #[token("[")]
    LBracket, // List literal, index, generic type

    #[token("]")]
    RBracket,

    // --- Layout ---
    #[regex(r"\r?\n")]
    Newline,

    // Comments run to the end of the line
    #[regex(r"#[^\r\n]*", logos::skip, allow_greedy = true)]
    Comment,

    // Produced by the layout pass, never by logos
    Indent,
    Dedent,
}

fn unescape(lex: &mut Lexer<Token>) -> Option<String> {
    let slice = lex.slice();
    let inner = &slice[1..slice.len() - 1];
    let mut out = String::with_capacity(inner.len());
    let mut chars = inner.chars();

    while let Some(ch) = chars.next() {
        if ch != '\\' {
            out.push(ch);
            continue;
        }
        match chars.next() {
            Some('n') => out.push('\n'),
            Some('t') => out.push('\t'),
            Some('\\') => out.push('\\'),
            Some('"') => out.push('"'),
            Some('\'') => out.push('\''),
            Some(other) => {
                out.push('\\');
                out.push(other);
            }
            None => out.push('\\'),
        }
    }

    Some(out)
}

impl fmt::Display for Token {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            Token::Def => write!(f, "def"),
            Token::Return => write!(f, "return"),
            Token::If => write!(f, "if"),
            Token::Elif => write!(f, "elif"),
            Token::Else => write!(f, "else"),
            Token::While => write!(f, "while"),
            Token::For => write!(f, "for"),
            Token::In => write!(f, "in"),
            Token::Pass => write!(f, "pass"),
            Token::And => write!(f, "and"),
            Token::Or => write!(f, "or"),
            Token::Not => write!(f, "not"),
            Token::True => write!(f, "True"),
            Token::False => write!(f, "False"),
            Token::None => write!(f, "None"),
            Token::From => write!(f, "from"),
            Token::Import => write!(f, "import"),
            Token::Identifier(name) => write!(f, "{}", name),
            Token::Int(n) => write!(f, "{}", n),
            Token::Float(s) => write!(f, "{}", s),
            Token::Imaginary(s) => write!(f, "{}j", s),
            Token::String(s) => write!(f, "{:?}", s),
            Token::Eq => write!(f, "="),
            Token::DoubleEq => write!(f, "=="),
            Token::NotEq => write!(f, "!="),
            Token::Plus => write!(f, "+"),
            Token::PlusEq => write!(f, "+="),
            Token::Minus => write!(f, "-"),
            Token::MinusEq => write!(f, "-="),
            Token::Star => write!(f, "*"),
            Token::StarEq => write!(f, "*="),
            Token::Pow => write!(f, "**"),
            Token::Slash => write!(f, "/"),
            Token::SlashEq => write!(f, "/="),
            Token::DoubleSlash => write!(f, "//"),
            Token::Percent => write!(f, "%"),
            Token::PercentEq => write!(f, "%="),
            Token::Gt => write!(f, ">"),
            Token::Lt => write!(f, "<"),
            Token::GtEq => write!(f, ">="),
            Token::LtEq => write!(f, "<="),
            Token::Arrow => write!(f, "->"),
            Token::Dot => write!(f, "."),
            Token::Comma => write!(f, ","),
            Token::Colon => write!(f, ":"),
            Token::LParen => write!(f, "("),
            Token::RParen => write!(f, ")"),
            Token::LBracket => write!(f, "["),
            Token::RBracket => write!(f, "]"),
            Token::Newline => write!(f, "newline"),
            Token::Comment => write!(f, "comment"),
            Token::Indent => write!(f, "indent"),
            Token::Dedent => write!(f, "dedent"),
        }
    }
}
