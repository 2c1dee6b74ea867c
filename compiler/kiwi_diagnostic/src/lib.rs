//! Diagnostics for the Kiwi front end.
//!
//! - [`ErrorKind`]: the closed taxonomy every reported error belongs to
//! - [`KiwiError`]: an error with its message and originating token
//! - [`DiagnosticSink`]: where the parser reports errors it recovers from
//! - [`DiagnosticQueue`]: a collecting, deduplicating sink
//! - [`TerminalEmitter`]: caret-style rendering against the file registry

mod emitter;
mod error;
mod queue;

pub use emitter::{ColorMode, TerminalEmitter};
pub use error::{ErrorKind, KiwiError, KiwiResult};
pub use queue::DiagnosticQueue;

/// Receives errors the front end reports instead of propagating.
///
/// The multi-stream parse driver catches a failing stream's error,
/// reports it here and moves on.
pub trait DiagnosticSink {
    fn report(&mut self, error: &KiwiError);
}

impl<S: DiagnosticSink + ?Sized> DiagnosticSink for &mut S {
    fn report(&mut self, error: &KiwiError) {
        (**self).report(error);
    }
}

/// A sink that drops everything.
#[derive(Clone, Copy, Debug, Default)]
pub struct NullSink;

impl DiagnosticSink for NullSink {
    fn report(&mut self, _error: &KiwiError) {}
}
