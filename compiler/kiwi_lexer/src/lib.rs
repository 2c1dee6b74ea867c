//! Lexer for Kiwi.
//!
//! Turns source bytes into a [`TokenStream`](kiwi_ir::TokenStream):
//! keywords and type names, numeric literals in four bases, three kinds
//! of string literal, comments, and operators. Interpolated strings are
//! rewritten into `"text" + (expr) + "text"` token sequences, so the
//! parser never sees `${...}`.
//!
//! Malformed input never aborts lexing. It becomes an
//! [`Error`](kiwi_ir::TokenType::Error) token the parser reports with a
//! location.
//!
//! Identifiers that name runtime builtins are tagged through a
//! [`BuiltinLookup`], the seam to the runtime's builtin tables.

mod builtins;
mod keywords;
mod lexer;

pub use builtins::{BuiltinLookup, BuiltinRegistry};
pub use lexer::{tokenize, Lexer};
