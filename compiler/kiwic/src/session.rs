//! One driver invocation: the registries every file shares.

use std::io;

use kiwi_diagnostic::DiagnosticQueue;
use kiwi_ir::{FileId, FileRegistry, Node, NodeKind, SharedFileRegistry, Token, TokenStream};
use kiwi_lexer::{BuiltinRegistry, Lexer};
use kiwi_parse::{ParseOutput, Parser, ParserOptions};
use kiwi_types::{SharedTypeRegistry, TypeRegistry};
use thiserror::Error;
use tracing::{debug, info_span};

/// Path that names standard input.
pub const STDIN_PATH: &str = "-";

/// A source that could not be read.
#[derive(Debug, Error)]
#[error("{}", read_message(.path, .source))]
pub struct SourceError {
    pub path: String,
    #[source]
    pub source: io::Error,
}

fn read_message(path: &str, error: &io::Error) -> String {
    match error.kind() {
        io::ErrorKind::NotFound => format!("cannot find file '{path}'"),
        io::ErrorKind::PermissionDenied => format!("permission denied reading '{path}'"),
        io::ErrorKind::InvalidData => format!("'{path}' could not be decoded"),
        _ => format!("error reading '{path}': {error}"),
    }
}

pub struct Session {
    files: SharedFileRegistry,
    types: SharedTypeRegistry,
    builtins: BuiltinRegistry,
}

impl Default for Session {
    fn default() -> Self {
        Self::new()
    }
}

impl Session {
    pub fn new() -> Self {
        Session {
            files: FileRegistry::shared(),
            types: TypeRegistry::shared(),
            builtins: BuiltinRegistry::standard(),
        }
    }

    pub fn files(&self) -> &SharedFileRegistry {
        &self.files
    }

    pub fn types(&self) -> &SharedTypeRegistry {
        &self.types
    }

    /// Every token of `path` (`-` for standard input), comments included.
    pub fn tokens(&self, path: &str) -> Result<Vec<Token>, SourceError> {
        Ok(self.lexer(path)?.tokens())
    }

    pub fn lex(&self, path: &str) -> Result<TokenStream, SourceError> {
        Ok(self.lexer(path)?.tokenize())
    }

    fn lexer(&self, path: &str) -> Result<Lexer<'_>, SourceError> {
        let wrap = |source| SourceError {
            path: path.to_string(),
            source,
        };
        if path == STDIN_PATH {
            let lexer = Lexer::from_reader(FileId::STDIN, io::stdin().lock(), &self.builtins).map_err(wrap)?;
            self.files
                .set_stdin_source(&String::from_utf8_lossy(lexer.source()));
            Ok(lexer)
        } else {
            Lexer::from_path(&self.files, path, &self.builtins).map_err(wrap)
        }
    }

    /// Lex `source` as if it had been read from `path`.
    pub fn lex_source(&self, path: &str, source: &str) -> TokenStream {
        let file = self.files.register_source(path, source);
        Lexer::from_source(file, source, &self.builtins).tokenize()
    }

    /// Parse every path as one collection.
    ///
    /// All files are read before parsing starts, so a missing file stops
    /// the run without partial output.
    pub fn parse(
        &self,
        paths: &[String],
        options: ParserOptions,
    ) -> Result<(ParseOutput, DiagnosticQueue), SourceError> {
        let streams = paths
            .iter()
            .map(|path| self.lex(path))
            .collect::<Result<Vec<_>, _>>()?;
        Ok(self.parse_streams(streams, options))
    }

    pub fn parse_streams(
        &self,
        streams: Vec<TokenStream>,
        options: ParserOptions,
    ) -> (ParseOutput, DiagnosticQueue) {
        let _span = info_span!("parse", streams = streams.len()).entered();
        // Rethrow is a REPL mode; the driver always collects.
        let options = ParserOptions {
            rethrow: false,
            ..options
        };
        let mut queue = DiagnosticQueue::new();
        let result = Parser::new(self.types.clone(), options, &mut queue).parse_collection(streams);
        let output = match result {
            Ok(output) => output,
            // Only rethrow mode returns Err; the error is queued like any other.
            Err(error) => {
                let program = Node::new(
                    error.token.clone(),
                    NodeKind::Program {
                        statements: Vec::new(),
                        is_entry_point: options.entry_point,
                    },
                );
                queue.add(error);
                ParseOutput {
                    program,
                    had_error: true,
                }
            }
        };
        debug!(had_error = output.had_error, errors = queue.error_count(), "parsed collection");
        (output, queue)
    }
}
