//! The lexer proper.
//!
//! [`Lexer`] owns the source bytes; a `Scanner` borrows them and walks a
//! [`Cursor`], producing one token per call to `next_token`.

mod interpolate;
mod number;
mod operator;
mod string;

use std::io::Read;
use std::path::Path;

use kiwi_ir::{FileId, FileRegistry, Token, TokenName, TokenSpan, TokenStream, TokenType};
use kiwi_lexer_core::{Cursor, Position};
use tracing::debug;

use crate::{keywords, BuiltinLookup};

/// Source text bound to a file id, ready to tokenize.
pub struct Lexer<'b> {
    source: Vec<u8>,
    file: FileId,
    builtins: &'b dyn BuiltinLookup,
}

impl<'b> Lexer<'b> {
    pub fn from_source(file: FileId, source: &str, builtins: &'b dyn BuiltinLookup) -> Self {
        Lexer {
            source: source.as_bytes().to_vec(),
            file,
            builtins,
        }
    }

    /// Read `path` eagerly and register it with `files`.
    pub fn from_path(
        files: &FileRegistry,
        path: impl AsRef<Path>,
        builtins: &'b dyn BuiltinLookup,
    ) -> std::io::Result<Self> {
        let path = path.as_ref();
        let source = std::fs::read(path)?;
        let file = files.register(&path.to_string_lossy());
        Ok(Lexer {
            source,
            file,
            builtins,
        })
    }

    /// Buffer all of `reader`, e.g. standard input, before lexing.
    pub fn from_reader(
        file: FileId,
        mut reader: impl Read,
        builtins: &'b dyn BuiltinLookup,
    ) -> std::io::Result<Self> {
        let mut source = Vec::new();
        reader.read_to_end(&mut source)?;
        Ok(Lexer {
            source,
            file,
            builtins,
        })
    }

    pub fn file(&self) -> FileId {
        self.file
    }

    pub fn source(&self) -> &[u8] {
        &self.source
    }

    /// Every token, comments included, ending with exactly one EOF.
    pub fn tokens(&self) -> Vec<Token> {
        let tokens = Scanner::new(&self.source, self.file, self.builtins, Position::default()).run();
        debug!(file = ?self.file, tokens = tokens.len(), "lexed stream");
        tokens
    }

    pub fn tokenize(&self) -> TokenStream {
        TokenStream::new(self.tokens())
    }
}

/// Lex `source` in one call.
pub fn tokenize(file: FileId, source: &str, builtins: &dyn BuiltinLookup) -> TokenStream {
    Lexer::from_source(file, source, builtins).tokenize()
}

struct Scanner<'a> {
    cursor: Cursor<'a>,
    file: FileId,
    builtins: &'a dyn BuiltinLookup,
    tokens: Vec<Token>,
}

impl<'a> Scanner<'a> {
    fn new(source: &'a [u8], file: FileId, builtins: &'a dyn BuiltinLookup, start: Position) -> Self {
        Scanner {
            cursor: Cursor::with_position(source, start),
            file,
            builtins,
            tokens: Vec::new(),
        }
    }

    fn run(mut self) -> Vec<Token> {
        loop {
            self.cursor.eat_whitespace();
            // Raw strings are also `String` tokens but never interpolate.
            let quoted = self.cursor.peek() == Some('"');
            let token = self.next_token();
            let eof = token.is_eof();
            if quoted && token.is(TokenType::String) && token.text.contains("${") {
                self.splice(token);
            } else {
                self.tokens.push(token);
            }
            if eof {
                return self.tokens;
            }
        }
    }

    fn span(&self) -> TokenSpan {
        let Position { line, column } = self.cursor.position();
        TokenSpan::new(self.file, line, column)
    }

    fn next_token(&mut self) -> Token {
        self.cursor.eat_whitespace();
        let span = self.span();
        let Some(c) = self.cursor.peek() else {
            return Token::eof(span);
        };
        match c {
            'b' if matches!(self.cursor.peek_byte_at(1), Some(b'"' | b'\'')) => {
                self.byte_string(span)
            }
            c if c.is_alphabetic() || c == '_' => self.identifier(span),
            c if c.is_ascii_digit() => self.number(span),
            '"' => self.string(span),
            '\'' => self.raw_string(span),
            '#' => {
                self.cursor.next_char();
                let text = self.cursor.eat_line();
                Token::new(TokenType::Comment, TokenName::Default, span, text)
            }
            '/' if self.cursor.peek_byte_at(1) == Some(b'#') => self.block_comment(span),
            '@' => self.single(span, TokenType::Keyword, TokenName::This),
            ',' => self.single(span, TokenType::Comma, TokenName::Default),
            '(' => self.single(span, TokenType::LParen, TokenName::Default),
            ')' => self.single(span, TokenType::RParen, TokenName::Default),
            '[' => self.single(span, TokenType::LBracket, TokenName::Default),
            ']' => self.single(span, TokenType::RBracket, TokenName::Default),
            '{' => self.single(span, TokenType::LBrace, TokenName::Default),
            '}' => self.single(span, TokenType::RBrace, TokenName::Default),
            ':' => {
                self.cursor.next_char();
                if self.cursor.eat(':') {
                    Token::new(TokenType::Qualifier, TokenName::Default, span, "::")
                } else {
                    Token::new(TokenType::Colon, TokenName::Default, span, ":")
                }
            }
            '.' => {
                self.cursor.next_char();
                if self.cursor.eat('.') {
                    Token::new(TokenType::Range, TokenName::Default, span, "..")
                } else {
                    Token::new(TokenType::Dot, TokenName::Default, span, ".")
                }
            }
            c if operator::is_operator_char(c) => self.operator(span),
            c => {
                self.cursor.next_char();
                Token::error(span, c.to_string())
            }
        }
    }

    /// Consume one character as a token of its own.
    fn single(&mut self, span: TokenSpan, token_type: TokenType, name: TokenName) -> Token {
        let text = self.cursor.next_char().map(String::from).unwrap_or_default();
        Token::new(token_type, name, span, text)
    }

    fn identifier(&mut self, span: TokenSpan) -> Token {
        let text = self.cursor.eat_while(|c| c.is_alphanumeric() || c == '_');
        if let Some(value) = keywords::literal(&text) {
            return Token::literal(TokenType::Literal, span, text, value);
        }
        if let Some((token_type, name)) = keywords::lookup(&text) {
            return Token::new(token_type, name, span, text);
        }
        if let Some(table) = self.builtins.lookup_function(&text) {
            return Token::new(TokenType::Identifier, TokenName::BuiltinFunction(table), span, text);
        }
        if let Some(table) = self.builtins.lookup_method(&text) {
            return Token::new(TokenType::Identifier, TokenName::BuiltinMethod(table), span, text);
        }
        Token::new(TokenType::Identifier, TokenName::Default, span, text)
    }

    /// `/# ... #/`, which may span lines.
    fn block_comment(&mut self, span: TokenSpan) -> Token {
        self.cursor.next_char();
        self.cursor.next_char();
        match self.cursor.eat_until_sequence(b"#/") {
            Some(text) => Token::new(TokenType::Comment, TokenName::Default, span, text),
            None => Token::error(span, "/#"),
        }
    }
}

#[cfg(test)]
mod tests;
