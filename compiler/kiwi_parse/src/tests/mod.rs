//! Parser tests.
//!
//! - `expressions`: precedence, postfix chains, literals
//! - `statements`: declarations, control flow and name mangling
//! - `collection`: multi-stream parsing, error reporting and rethrow

#![allow(clippy::unwrap_used, clippy::expect_used)]

mod statements;

use kiwi_diagnostic::DiagnosticQueue;
use kiwi_ir::{FileId, Node, TokenStream};
use kiwi_lexer::{tokenize, BuiltinRegistry};
use kiwi_types::{SharedTypeRegistry, TypeRegistry};

use crate::{ParseOutput, Parser, ParserOptions};

fn lex(file: i32, source: &str) -> TokenStream {
    tokenize(FileId::new(file), source, &BuiltinRegistry::standard())
}

/// Parse `source` with default options, returning the output and every
/// reported diagnostic.
fn parse_source(source: &str) -> (ParseOutput, DiagnosticQueue) {
    parse_with(TypeRegistry::shared(), ParserOptions::default(), vec![lex(0, source)])
}

fn parse_with(
    types: SharedTypeRegistry,
    options: ParserOptions,
    streams: Vec<TokenStream>,
) -> (ParseOutput, DiagnosticQueue) {
    let mut queue = DiagnosticQueue::new();
    let output = Parser::new(types, options, &mut queue)
        .parse_collection(streams)
        .expect("only rethrow mode returns Err");
    (output, queue)
}

/// Statements of `source`, which must parse cleanly.
fn statements(source: &str) -> Vec<Node> {
    let (output, queue) = parse_source(source);
    assert!(!output.had_error, "unexpected errors: {:?}", queue.errors());
    output.program.statements().to_vec()
}

/// The only statement of `source`.
fn single(source: &str) -> Node {
    let mut statements = statements(source);
    assert_eq!(statements.len(), 1, "expected one statement: {statements:#?}");
    statements.remove(0)
}
