//! String interpolation.
//!
//! `"a${x}b"` is emitted as `"a" + ( x ) + "b"`. Each `${...}` body is
//! lexed by a nested scanner over the same file, positioned at the
//! string's start. A string that opens with an interpolation gets an
//! empty string literal in front, so the sum stays a string.

use kiwi_ir::{Token, TokenName, TokenSpan, TokenType};
use kiwi_lexer_core::Position;
use tracing::trace;

use super::Scanner;

#[derive(Debug, PartialEq)]
enum Part {
    Text(String),
    Code(String),
}

impl Scanner<'_> {
    pub(super) fn splice(&mut self, token: Token) {
        let span = token.span;
        let parts = split(&token.text);
        trace!(parts = parts.len(), line = span.line, "splicing interpolated string");

        let mut wrote_any = false;
        for part in parts {
            match part {
                Part::Text(text) => {
                    if wrote_any {
                        self.tokens.push(punct(span, TokenType::Operator, TokenName::Add, "+"));
                    }
                    self.tokens.push(Token::string(span, text));
                }
                Part::Code(source) => {
                    let start = Position {
                        line: span.line,
                        column: span.column,
                    };
                    let mut inner = Scanner::new(source.as_bytes(), self.file, self.builtins, start).run();
                    inner.retain(|t| !t.is_eof() && !t.is(TokenType::Comment));
                    if inner.is_empty() {
                        continue;
                    }
                    if !wrote_any {
                        self.tokens.push(Token::string(span, ""));
                    }
                    self.tokens.push(punct(span, TokenType::Operator, TokenName::Add, "+"));
                    self.tokens.push(punct(span, TokenType::LParen, TokenName::Default, "("));
                    self.tokens.extend(inner);
                    self.tokens.push(punct(span, TokenType::RParen, TokenName::Default, ")"));
                }
            }
            wrote_any = true;
        }
        if !wrote_any {
            self.tokens.push(Token::string(span, ""));
        }
    }
}

fn punct(span: TokenSpan, token_type: TokenType, name: TokenName, text: &str) -> Token {
    Token::new(token_type, name, span, text)
}

/// Cut `text` into literal fragments and `${...}` bodies.
///
/// Braces nest inside a body. Empty bodies vanish; an unclosed `${`
/// is kept as literal text.
fn split(text: &str) -> Vec<Part> {
    let mut parts = Vec::new();
    let mut literal = String::new();
    let mut rest = text;
    while let Some(open) = rest.find("${") {
        literal.push_str(&rest[..open]);
        let body_start = open + 2;
        let Some(close) = matching_brace(&rest[body_start..]) else {
            literal.push_str(&rest[open..]);
            rest = "";
            break;
        };
        let body = &rest[body_start..body_start + close];
        if !body.trim().is_empty() {
            if !literal.is_empty() {
                parts.push(Part::Text(std::mem::take(&mut literal)));
            }
            parts.push(Part::Code(body.to_string()));
        }
        rest = &rest[body_start + close + 1..];
    }
    literal.push_str(rest);
    if !literal.is_empty() {
        parts.push(Part::Text(literal));
    }
    parts
}

/// Byte index of the `}` closing a body that starts at depth 1.
fn matching_brace(body: &str) -> Option<usize> {
    let mut depth = 1usize;
    for (index, c) in body.char_indices() {
        match c {
            '{' => depth += 1,
            '}' => {
                depth -= 1;
                if depth == 0 {
                    return Some(index);
                }
            }
            _ => {}
        }
    }
    None
}
