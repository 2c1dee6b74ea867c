//! Cursor over a lexed token sequence.
//!
//! Comments stay in the sequence (token dumps show them) but the cursor
//! steps over them, so the parser never sees one. Reading past the end
//! yields the end-of-file token again and again.

use crate::{Token, TokenSpan, TokenType};

#[derive(Clone, Debug)]
pub struct TokenStream {
    tokens: Vec<Token>,
    /// Always in `0..=tokens.len()`.
    position: usize,
    /// Returned for every read past the end.
    eof: Token,
}

impl TokenStream {
    /// Wrap `tokens`, positioned at the first non-comment token.
    pub fn new(tokens: Vec<Token>) -> Self {
        let eof = match tokens.last() {
            Some(last) if last.is_eof() => last.clone(),
            Some(last) => Token::eof(last.span),
            None => Token::eof(TokenSpan::default()),
        };
        let mut stream = TokenStream {
            tokens,
            position: 0,
            eof,
        };
        stream.position = stream.skip_comments(0);
        stream
    }

    /// First index at or after `index` that is not a comment.
    fn skip_comments(&self, mut index: usize) -> usize {
        while index < self.tokens.len() && self.tokens[index].is(TokenType::Comment) {
            index += 1;
        }
        index.min(self.tokens.len())
    }

    /// The token under the cursor.
    #[inline]
    pub fn current(&self) -> &Token {
        self.at(self.position)
    }

    /// The raw token at `index`, comments included.
    #[inline]
    pub fn at(&self, index: usize) -> &Token {
        self.tokens.get(index).unwrap_or(&self.eof)
    }

    /// The next non-comment token after the cursor.
    #[inline]
    pub fn peek(&self) -> &Token {
        self.peek_at(1)
    }

    /// The `offset`-th non-comment token after the cursor; `peek_at(0)`
    /// is the current token.
    pub fn peek_at(&self, offset: usize) -> &Token {
        let mut index = self.position;
        for _ in 0..offset {
            if index >= self.tokens.len() {
                break;
            }
            index = self.skip_comments(index + 1);
        }
        self.at(index)
    }

    /// Advance past the current token and any comments after it.
    pub fn next(&mut self) -> &Token {
        if self.position < self.tokens.len() {
            self.position = self.skip_comments(self.position + 1);
        }
        self.current()
    }

    /// Step back to the previous non-comment token. A no-op at the start.
    pub fn rewind(&mut self) {
        let mut index = self.position;
        while index > 0 {
            index -= 1;
            if !self.tokens[index].is(TokenType::Comment) {
                self.position = index;
                return;
            }
        }
    }

    #[inline]
    pub fn position(&self) -> usize {
        self.position
    }

    /// Move the cursor; positions past the end are clamped.
    pub fn set_position(&mut self, position: usize) {
        self.position = position.min(self.tokens.len());
    }

    #[inline]
    pub fn is_at_end(&self) -> bool {
        self.current().is_eof()
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.tokens.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.tokens.is_empty()
    }

    /// Every token, comments included.
    pub fn tokens(&self) -> &[Token] {
        &self.tokens
    }
}
