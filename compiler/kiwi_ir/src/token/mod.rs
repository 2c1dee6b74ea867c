//! Tokens produced by the lexer.

mod name;
mod stream;

use std::fmt;

use kiwi_value::Value;

use crate::TokenSpan;

pub use name::TokenName;
pub use stream::TokenStream;

/// Syntax category of a token.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub enum TokenType {
    Identifier,
    Keyword,
    Operator,
    /// A literal carrying its payload in [`Token::value`].
    Literal,
    /// A double-quoted or raw string; the payload is a string value.
    String,
    Comment,
    Comma,
    Colon,
    /// `::`
    Qualifier,
    Dot,
    /// `..`
    Range,
    LParen,
    RParen,
    LBracket,
    RBracket,
    LBrace,
    RBrace,
    /// `if`, `elsif`, `else`, `end`, `case`
    Conditional,
    /// A type name such as `integer` or `List`.
    Typename,
    /// `with`
    Lambda,
    /// Input the lexer could not make sense of.
    Error,
    Eof,
}

impl TokenType {
    pub fn describe(self) -> &'static str {
        match self {
            TokenType::Identifier => "identifier",
            TokenType::Keyword => "keyword",
            TokenType::Operator => "operator",
            TokenType::Literal => "literal",
            TokenType::String => "string",
            TokenType::Comment => "comment",
            TokenType::Comma => "`,`",
            TokenType::Colon => "`:`",
            TokenType::Qualifier => "`::`",
            TokenType::Dot => "`.`",
            TokenType::Range => "`..`",
            TokenType::LParen => "`(`",
            TokenType::RParen => "`)`",
            TokenType::LBracket => "`[`",
            TokenType::RBracket => "`]`",
            TokenType::LBrace => "`{`",
            TokenType::RBrace => "`}`",
            TokenType::Conditional => "conditional",
            TokenType::Typename => "type name",
            TokenType::Lambda => "`with`",
            TokenType::Error => "invalid token",
            TokenType::Eof => "end of file",
        }
    }
}

/// A lexeme with its category, name, location and literal payload.
///
/// `name` is [`TokenName::Default`] when the category says it all;
/// `value` is `Value::default()` (integer 0) for non-literals.
#[derive(Clone, Debug, PartialEq)]
pub struct Token {
    pub token_type: TokenType,
    pub name: TokenName,
    pub span: TokenSpan,
    pub text: String,
    pub value: Value,
}

impl Token {
    pub fn new(token_type: TokenType, name: TokenName, span: TokenSpan, text: impl Into<String>) -> Self {
        Token {
            token_type,
            name,
            span,
            text: text.into(),
            value: Value::default(),
        }
    }

    /// A literal token of type `token_type` (`Literal` or `String`).
    pub fn literal(token_type: TokenType, span: TokenSpan, text: impl Into<String>, value: Value) -> Self {
        Token {
            token_type,
            name: TokenName::Default,
            span,
            text: text.into(),
            value,
        }
    }

    /// A string literal whose text is also its payload.
    pub fn string(span: TokenSpan, text: impl Into<String>) -> Self {
        let text = text.into();
        let value = Value::string(text.clone());
        Token::literal(TokenType::String, span, text, value)
    }

    pub fn eof(span: TokenSpan) -> Self {
        Token::new(TokenType::Eof, TokenName::Default, span, "")
    }

    pub fn error(span: TokenSpan, text: impl Into<String>) -> Self {
        Token::new(TokenType::Error, TokenName::Default, span, text)
    }

    #[inline]
    pub fn is_eof(&self) -> bool {
        self.token_type == TokenType::Eof
    }

    #[inline]
    pub fn is(&self, token_type: TokenType) -> bool {
        self.token_type == token_type
    }

    #[inline]
    pub fn is_name(&self, name: TokenName) -> bool {
        self.name == name
    }
}

impl fmt::Display for Token {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.token_type {
            TokenType::Eof => f.write_str("end of file"),
            TokenType::String => write!(f, "\"{}\"", self.text),
            _ => write!(f, "`{}`", self.text),
        }
    }
}
