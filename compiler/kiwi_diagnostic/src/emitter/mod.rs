//! Terminal Emitter
//!
//! Renders an error as its kind and message, the file position, the
//! offending source line and a caret under the column:
//!
//! ```text
//! SyntaxError: Expected `)` but found end of file.
//!   --> demo.kiwi:3:13
//!    |
//!  3 | println (1 + 2
//!    |             ^
//! ```

use std::io::{self, Write};

use kiwi_ir::SharedFileRegistry;

use crate::{DiagnosticSink, KiwiError};

mod colors {
    pub const ERROR: &str = "\x1b[1;31m";
    pub const SECONDARY: &str = "\x1b[1;34m";
    pub const RESET: &str = "\x1b[0m";
}

/// Color output mode for the terminal emitter.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum ColorMode {
    /// Color when writing to a terminal.
    Auto,
    Always,
    #[default]
    Never,
}

impl ColorMode {
    pub fn should_use_colors(self, is_tty: bool) -> bool {
        match self {
            ColorMode::Auto => is_tty,
            ColorMode::Always => true,
            ColorMode::Never => false,
        }
    }
}

pub struct TerminalEmitter<W: Write> {
    writer: W,
    files: SharedFileRegistry,
    colors: bool,
}

impl<W: Write> TerminalEmitter<W> {
    pub fn new(writer: W, files: SharedFileRegistry) -> Self {
        TerminalEmitter {
            writer,
            files,
            colors: false,
        }
    }

    pub fn with_color_mode(writer: W, files: SharedFileRegistry, mode: ColorMode, is_tty: bool) -> Self {
        TerminalEmitter {
            writer,
            files,
            colors: mode.should_use_colors(is_tty),
        }
    }

    fn paint(&self, color: &'static str, text: &str) -> String {
        if self.colors {
            format!("{color}{text}{}", colors::RESET)
        } else {
            text.to_string()
        }
    }

    /// Write one error.
    pub fn emit(&mut self, error: &KiwiError) -> io::Result<()> {
        let span = error.token.span;
        let heading = self.paint(colors::ERROR, error.kind.name());
        writeln!(self.writer, "{heading}: {}", error.message)?;

        let path = self
            .files
            .path(span.file)
            .unwrap_or_else(|| "<unknown>".to_string());
        let arrow = self.paint(colors::SECONDARY, "-->");
        writeln!(self.writer, "  {arrow} {path}:{}:{}", span.line, span.column)?;

        if let Some(line) = self.files.line(span.file, span.line) {
            let number = span.line.to_string();
            let gutter = " ".repeat(number.len());
            let bar = self.paint(colors::SECONDARY, "|");
            let caret_pad: String = line
                .chars()
                .take(span.column.saturating_sub(1) as usize)
                .map(|c| if c == '\t' { '\t' } else { ' ' })
                .collect();
            writeln!(self.writer, " {gutter} {bar}")?;
            writeln!(self.writer, " {number} {bar} {line}")?;
            writeln!(
                self.writer,
                " {gutter} {bar} {caret_pad}{}",
                self.paint(colors::ERROR, "^")
            )?;
        }
        Ok(())
    }

    pub fn emit_all(&mut self, errors: &[KiwiError]) -> io::Result<()> {
        for error in errors {
            self.emit(error)?;
        }
        self.writer.flush()
    }

    pub fn into_inner(self) -> W {
        self.writer
    }
}

impl<W: Write> DiagnosticSink for TerminalEmitter<W> {
    fn report(&mut self, error: &KiwiError) {
        // Nowhere left to report a failure to write a report.
        let _ = self.emit(error);
    }
}
