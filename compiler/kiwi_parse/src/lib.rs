//! Recursive descent parser for Kiwi.
//!
//! Builds a [`Node`] tree from one or more [`TokenStream`]s. Scoped
//! bindings are renamed as they are parsed (see the `scope` module), so
//! the tree carries lexical scoping in its identifier text.
//!
//! # Entry points
//!
//! - [`Parser::parse`]: one stream
//! - [`Parser::parse_collection`]: several streams against one program,
//!   in any order with respect to the packages they define
//!
//! Errors are reported to a [`DiagnosticSink`] and the failing stream is
//! abandoned; [`ParseOutput::had_error`] tells the caller whether the
//! tree is usable. With [`ParserOptions::rethrow`] the first error is
//! returned instead.

mod collection;
mod error;
mod grammar;
mod scope;

use kiwi_diagnostic::{DiagnosticSink, KiwiError, KiwiResult};
use kiwi_ir::{Node, Token, TokenName, TokenStream, TokenType, TypeId};
use kiwi_types::SharedTypeRegistry;
use rustc_hash::FxHashSet;

use error::{ParseFailure, ParseResult};
use scope::Scopes;

/// Parser switches.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct ParserOptions {
    /// Return the first error instead of reporting it. A REPL uses this
    /// to tell incomplete input from a real mistake.
    pub rethrow: bool,
    /// The program is the main script rather than a library.
    pub entry_point: bool,
    /// Park streams that use a package before any stream defines it.
    pub resolve_packages: bool,
}

impl Default for ParserOptions {
    fn default() -> Self {
        ParserOptions {
            rethrow: false,
            entry_point: false,
            resolve_packages: true,
        }
    }
}

/// The parsed program.
#[derive(Clone, Debug, PartialEq)]
pub struct ParseOutput {
    /// A `Program` node.
    pub program: Node,
    /// Some stream failed; `program` holds what parsed before the error.
    pub had_error: bool,
}

/// Parser state.
pub struct Parser<'s> {
    stream: TokenStream,
    types: SharedTypeRegistry,
    options: ParserOptions,
    scopes: Scopes,
    /// Structs whose bodies are being parsed, innermost last.
    struct_stack: Vec<String>,
    structs: FxHashSet<String>,
    packages: FxHashSet<String>,
    /// Packages finished since the collection driver last looked.
    defined_packages: Vec<String>,
    sink: &'s mut dyn DiagnosticSink,
}

/// Parser state to return to when a statement stalls.
struct Checkpoint {
    position: usize,
    scopes: Scopes,
    struct_stack: Vec<String>,
    structs: FxHashSet<String>,
    packages: FxHashSet<String>,
}

impl<'s> Parser<'s> {
    pub fn new(types: SharedTypeRegistry, options: ParserOptions, sink: &'s mut dyn DiagnosticSink) -> Self {
        Parser {
            stream: TokenStream::new(Vec::new()),
            types,
            options,
            scopes: Scopes::default(),
            struct_stack: Vec::new(),
            structs: FxHashSet::default(),
            packages: FxHashSet::default(),
            defined_packages: Vec::new(),
            sink,
        }
    }

    pub fn options(&self) -> ParserOptions {
        self.options
    }

    /// Parse a single stream.
    ///
    /// Returns `Err` only in rethrow mode.
    pub fn parse(&mut self, stream: TokenStream) -> KiwiResult<ParseOutput> {
        self.parse_collection(vec![stream])
    }

    // Cursor

    #[inline]
    fn current(&self) -> &Token {
        self.stream.current()
    }

    #[inline]
    fn peek(&self) -> &Token {
        self.stream.peek()
    }

    #[inline]
    fn check(&self, token_type: TokenType) -> bool {
        self.current().is(token_type)
    }

    #[inline]
    fn check_name(&self, name: TokenName) -> bool {
        self.current().is_name(name)
    }

    /// Consume the current token and return it.
    fn advance(&mut self) -> Token {
        let token = self.current().clone();
        self.stream.next();
        token
    }

    fn eat(&mut self, token_type: TokenType) -> bool {
        if self.check(token_type) {
            self.stream.next();
            true
        } else {
            false
        }
    }

    fn eat_name(&mut self, name: TokenName) -> bool {
        if self.check_name(name) {
            self.stream.next();
            true
        } else {
            false
        }
    }

    fn expect(&mut self, token_type: TokenType) -> ParseResult<Token> {
        if self.check(token_type) {
            Ok(self.advance())
        } else {
            Err(self.unexpected(token_type.describe()))
        }
    }

    fn expect_name(&mut self, name: TokenName, what: &str) -> ParseResult<Token> {
        if self.check_name(name) {
            Ok(self.advance())
        } else {
            Err(self.unexpected(what))
        }
    }

    fn expect_identifier(&mut self) -> ParseResult<Token> {
        self.expect(TokenType::Identifier)
    }

    /// The current token starts on the same line as `token`.
    fn same_line_as(&self, token: &Token) -> bool {
        let current = self.current();
        !current.is_eof() && current.span.file == token.span.file && current.span.line == token.span.line
    }

    // Errors

    /// A syntax error at the current token. At end of input the error
    /// points at the last real token and is an unexpected-EOF error.
    fn error(&mut self, message: impl Into<String>) -> ParseFailure {
        if self.current().is_eof() {
            self.stream.rewind();
            return KiwiError::unexpected_eof(self.current()).into();
        }
        KiwiError::syntax(self.current(), message).into()
    }

    fn unexpected(&mut self, expected: &str) -> ParseFailure {
        let message = format!("Expected {expected} but found {}.", self.current());
        self.error(message)
    }

    // Type hints

    /// A type name after `:`.
    fn parse_type_name(&mut self) -> ParseResult<TypeId> {
        let token = self.current().clone();
        match token.token_type {
            TokenType::Typename => {
                self.stream.next();
                Ok(self.types.get_type(&token.text.to_lowercase()))
            }
            TokenType::Identifier => {
                self.stream.next();
                Ok(self.types.get_type_strict(&token, &token.text)?)
            }
            _ => Err(self.unexpected("a type name")),
        }
    }

    /// An optional `: type` suffix; `any` when absent.
    fn parse_type_hint(&mut self) -> ParseResult<TypeId> {
        if self.eat(TokenType::Colon) {
            self.parse_type_name()
        } else {
            Ok(TypeId::ANY)
        }
    }

    // Stalls

    fn checkpoint(&self) -> Checkpoint {
        Checkpoint {
            position: self.stream.position(),
            scopes: self.scopes.clone(),
            struct_stack: self.struct_stack.clone(),
            structs: self.structs.clone(),
            packages: self.packages.clone(),
        }
    }

    fn restore(&mut self, checkpoint: Checkpoint) {
        self.stream.set_position(checkpoint.position);
        self.scopes.restore(checkpoint.scopes);
        self.struct_stack = checkpoint.struct_stack;
        self.structs = checkpoint.structs;
        self.packages = checkpoint.packages;
        self.defined_packages.clear();
    }

    /// Stall unless a package named by a prefix of `segments` is known.
    ///
    /// `a::b::c` is satisfied by a package `a::b` or `a` (or a struct
    /// `a`); otherwise it requires `a::b`.
    fn require_package(&self, segments: &[String]) -> ParseResult<()> {
        if !self.options.resolve_packages || segments.len() < 2 {
            return Ok(());
        }
        let prefix_count = segments.len() - 1;
        for len in (1..=prefix_count).rev() {
            let prefix = segments[..len].join("::");
            if self.packages.contains(&prefix) || self.structs.contains(&prefix) {
                return Ok(());
            }
        }
        Err(ParseFailure::Requires(segments[..prefix_count].join("::")))
    }
}

#[cfg(test)]
mod tests;
