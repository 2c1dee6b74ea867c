//! The error taxonomy.

use std::fmt;

use kiwi_ir::Token;
use kiwi_value::{ValueError, ValueErrorKind};
use thiserror::Error;

/// Result alias for fallible front-end operations.
pub type KiwiResult<T> = Result<T, KiwiError>;

/// Category of an error. Closed: every failure maps to one of these.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum ErrorKind {
    Syntax,
    TokenStream,
    /// Input ended mid-construct. A REPL treats it as "keep reading".
    UnexpectedEndOfFile,
    Conversion,
    DivideByZero,
    Index,
    Type,
    Range,
}

impl ErrorKind {
    /// The user-facing name, e.g. `SyntaxError`.
    pub fn name(self) -> &'static str {
        match self {
            ErrorKind::Syntax => "SyntaxError",
            ErrorKind::TokenStream => "TokenStreamError",
            ErrorKind::UnexpectedEndOfFile => "UnexpectedEndOfFileError",
            ErrorKind::Conversion => "ConversionError",
            ErrorKind::DivideByZero => "DivideByZeroError",
            ErrorKind::Index => "IndexError",
            ErrorKind::Type => "TypeError",
            ErrorKind::Range => "RangeError",
        }
    }

    /// Unexpected end of input is a kind of syntax error.
    pub fn is_syntax(self) -> bool {
        matches!(self, ErrorKind::Syntax | ErrorKind::UnexpectedEndOfFile)
    }
}

impl fmt::Display for ErrorKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl From<ValueErrorKind> for ErrorKind {
    fn from(kind: ValueErrorKind) -> Self {
        match kind {
            ValueErrorKind::Syntax => ErrorKind::Syntax,
            ValueErrorKind::Conversion => ErrorKind::Conversion,
            ValueErrorKind::DivideByZero => ErrorKind::DivideByZero,
            ValueErrorKind::Index => ErrorKind::Index,
            ValueErrorKind::Type => ErrorKind::Type,
            ValueErrorKind::Range => ErrorKind::Range,
        }
    }
}

/// An error tied to the token it was raised at.
#[derive(Clone, Debug, PartialEq, Error)]
#[error("{kind}: {message}")]
pub struct KiwiError {
    pub kind: ErrorKind,
    pub message: String,
    pub token: Token,
}

impl KiwiError {
    pub fn new(kind: ErrorKind, token: &Token, message: impl Into<String>) -> Self {
        KiwiError {
            kind,
            message: message.into(),
            token: token.clone(),
        }
    }

    pub fn syntax(token: &Token, message: impl Into<String>) -> Self {
        Self::new(ErrorKind::Syntax, token, message)
    }

    pub fn token_stream(token: &Token, message: impl Into<String>) -> Self {
        Self::new(ErrorKind::TokenStream, token, message)
    }

    pub fn unexpected_eof(token: &Token) -> Self {
        Self::new(ErrorKind::UnexpectedEndOfFile, token, "Unexpected end of file.")
    }

    pub fn conversion(token: &Token, message: impl Into<String>) -> Self {
        Self::new(ErrorKind::Conversion, token, message)
    }

    pub fn divide_by_zero(token: &Token) -> Self {
        Self::new(ErrorKind::DivideByZero, token, "Attempted to divide by zero.")
    }

    pub fn index(token: &Token, message: impl Into<String>) -> Self {
        Self::new(ErrorKind::Index, token, message)
    }

    pub fn type_error(token: &Token, message: impl Into<String>) -> Self {
        Self::new(ErrorKind::Type, token, message)
    }

    pub fn range(token: &Token, message: impl Into<String>) -> Self {
        Self::new(ErrorKind::Range, token, message)
    }

    /// Attach a location to a failed value operation.
    pub fn from_value_error(token: &Token, error: ValueError) -> Self {
        KiwiError {
            kind: error.kind.into(),
            message: error.message,
            token: token.clone(),
        }
    }

    /// True when input ended mid-construct.
    #[inline]
    pub fn is_unexpected_eof(&self) -> bool {
        self.kind == ErrorKind::UnexpectedEndOfFile
    }
}
