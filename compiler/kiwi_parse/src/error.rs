//! Parser failure type.

use kiwi_diagnostic::KiwiError;

/// Why a parse function gave up.
#[derive(Clone, Debug, PartialEq)]
pub(crate) enum ParseFailure {
    /// A real error, reported to the caller.
    Error(KiwiError),
    /// The statement names a package no stream has defined yet. The
    /// collection driver parks the stream until one does.
    Requires(String),
}

impl From<KiwiError> for ParseFailure {
    fn from(error: KiwiError) -> Self {
        ParseFailure::Error(error)
    }
}

pub(crate) type ParseResult<T> = Result<T, ParseFailure>;
