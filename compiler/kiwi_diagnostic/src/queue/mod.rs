//! Collecting sink.

use rustc_hash::FxHashSet;

use kiwi_ir::TokenSpan;

use crate::{DiagnosticSink, ErrorKind, KiwiError};

/// Collects reported errors, dropping exact repeats.
///
/// Two errors are repeats when kind, message and span all match; the
/// multi-stream driver can report the same failure twice when a stream
/// is resumed and fails again at the same place.
#[derive(Clone, Debug, Default)]
pub struct DiagnosticQueue {
    errors: Vec<KiwiError>,
    seen: FxHashSet<(ErrorKind, String, TokenSpan)>,
}

impl DiagnosticQueue {
    pub fn new() -> Self {
        Self::default()
    }

    /// Queue `error`. Returns `false` if it was a repeat.
    pub fn add(&mut self, error: KiwiError) -> bool {
        let key = (error.kind, error.message.clone(), error.token.span);
        if !self.seen.insert(key) {
            return false;
        }
        self.errors.push(error);
        true
    }

    pub fn has_errors(&self) -> bool {
        !self.errors.is_empty()
    }

    pub fn error_count(&self) -> usize {
        self.errors.len()
    }

    /// Queued errors in report order.
    pub fn errors(&self) -> &[KiwiError] {
        &self.errors
    }

    /// Take every queued error, ordered by file, line and column.
    pub fn flush(&mut self) -> Vec<KiwiError> {
        let mut errors = std::mem::take(&mut self.errors);
        self.seen.clear();
        errors.sort_by_key(|e| (e.token.span.file, e.token.span.line, e.token.span.column));
        errors
    }
}

impl DiagnosticSink for DiagnosticQueue {
    fn report(&mut self, error: &KiwiError) {
        self.add(error.clone());
    }
}
