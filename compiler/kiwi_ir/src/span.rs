//! Source locations.

use std::fmt;

use crate::FileId;

/// Where a token starts: file, 1-based line, 1-based column.
///
/// The file is an index into the [`FileRegistry`](crate::FileRegistry);
/// [`FileId::STDIN`] marks standard input.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub struct TokenSpan {
    pub file: FileId,
    pub line: u32,
    pub column: u32,
}

impl TokenSpan {
    #[inline]
    pub const fn new(file: FileId, line: u32, column: u32) -> Self {
        TokenSpan { file, line, column }
    }

    /// Line 1, column 1 of `file`.
    #[inline]
    pub const fn start_of(file: FileId) -> Self {
        TokenSpan::new(file, 1, 1)
    }
}

impl Default for TokenSpan {
    fn default() -> Self {
        TokenSpan::start_of(FileId::STDIN)
    }
}

impl fmt::Display for TokenSpan {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}:{}", self.line, self.column)
    }
}

#[cfg(test)]
mod tests;
