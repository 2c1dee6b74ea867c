//! The `check` command: parse without output, reporting diagnostics.

use std::io::Write;

use kiwi_diagnostic::TerminalEmitter;
use kiwi_parse::ParserOptions;

use super::{report, CommandError};
use crate::Session;

/// Parse `paths` as one program. On success writes a one-line summary
/// to `out`; diagnostics go to `diagnostics` either way.
pub fn check_files<E: Write>(
    session: &Session,
    paths: &[String],
    out: &mut impl Write,
    diagnostics: &mut TerminalEmitter<E>,
) -> Result<(), CommandError> {
    let (output, queue) = session.parse(paths, ParserOptions::default())?;
    report(diagnostics, &queue, output.had_error)?;

    let statements = output.program.statements().len();
    writeln!(out, "OK: {} ({statements} statements)", paths.join(", "))?;
    Ok(())
}
