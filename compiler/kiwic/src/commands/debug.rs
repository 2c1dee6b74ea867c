//! Debug commands: `lex` and `parse` for inspecting front-end output.

use std::io::Write;

use kiwi_diagnostic::TerminalEmitter;
use kiwi_ir::Token;
use kiwi_parse::ParserOptions;

use super::{report, CommandError};
use crate::Session;

/// Write every token of `path`, comments included, one per line.
pub fn lex_file(session: &Session, path: &str, out: &mut impl Write) -> Result<(), CommandError> {
    for token in session.tokens(path)? {
        writeln!(out, "{}", describe(&token))?;
    }
    out.flush()?;
    Ok(())
}

/// `line:column type name "text"`. Text is escaped so a multi-line
/// comment still takes one line.
fn describe(token: &Token) -> String {
    format!(
        "{}:{} {} {:?} {:?}",
        token.span.line,
        token.span.column,
        token.token_type.describe(),
        token.name,
        token.text
    )
}

/// Parse `paths` as one program and write its tree in debug form.
///
/// The tree is written even when parsing failed, holding whatever was
/// parsed before each error.
pub fn parse_files<E: Write>(
    session: &Session,
    paths: &[String],
    out: &mut impl Write,
    diagnostics: &mut TerminalEmitter<E>,
) -> Result<(), CommandError> {
    let options = ParserOptions {
        entry_point: true,
        ..ParserOptions::default()
    };
    let (output, queue) = session.parse(paths, options)?;
    writeln!(out, "{:#?}", output.program)?;
    out.flush()?;
    report(diagnostics, &queue, output.had_error)
}
