//! Low-level character cursor for Kiwi source.
//!
//! [`Cursor`] walks raw bytes as UTF-8 characters with one character of
//! lookahead, tracking 1-based line and column. It never fails: bytes
//! that do not form valid UTF-8 come back one at a time as the character
//! with the same code point (Latin-1), so the lexer above can still
//! produce a localized error token.

mod cursor;

pub use cursor::{Cursor, Position};
