//! Command handlers for the `kiwi` CLI.
//!
//! Handlers write to the streams they are given and return a
//! [`CommandError`] instead of exiting, so `main` owns the process exit
//! code and tests can capture output.

mod check;
mod debug;

use std::io::{self, Write};

use kiwi_diagnostic::{ColorMode, TerminalEmitter};
use thiserror::Error;

use crate::{Session, SourceError};

pub use check::check_files;
pub use debug::{lex_file, parse_files};

#[derive(Debug, Error)]
pub enum CommandError {
    #[error(transparent)]
    Source(#[from] SourceError),
    #[error("cannot write output: {0}")]
    Output(#[from] io::Error),
    /// Diagnostics were already written; this only sets the exit code.
    #[error("aborting after {count} error(s)")]
    Failed { count: usize },
}

/// An emitter on standard error. `Auto` colors only a terminal.
pub fn stderr_emitter(session: &Session, color: ColorMode) -> TerminalEmitter<io::Stderr> {
    let is_tty = io::IsTerminal::is_terminal(&io::stderr());
    TerminalEmitter::with_color_mode(io::stderr(), session.files().clone(), color, is_tty)
}

/// The value of a `--color=<when>` flag.
pub fn parse_color_mode(when: &str) -> Option<ColorMode> {
    match when {
        "always" => Some(ColorMode::Always),
        "auto" => Some(ColorMode::Auto),
        "never" => Some(ColorMode::Never),
        _ => None,
    }
}

/// Write every collected diagnostic, then fail if the parse did.
fn report<E: Write>(
    diagnostics: &mut TerminalEmitter<E>,
    queue: &kiwi_diagnostic::DiagnosticQueue,
    had_error: bool,
) -> Result<(), CommandError> {
    diagnostics.emit_all(queue.errors())?;
    if had_error || queue.has_errors() {
        return Err(CommandError::Failed {
            count: queue.error_count().max(1),
        });
    }
    Ok(())
}
