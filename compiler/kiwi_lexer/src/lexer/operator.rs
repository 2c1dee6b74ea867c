//! Operator spellings.
//!
//! Operator characters are taken greedily, up to three of them (four
//! only for `>>>=`), and the result must be a spelling in the operator
//! table. `??` is complete on its own and never extends.

use kiwi_ir::{Token, TokenName, TokenSpan, TokenType};

use super::Scanner;

const OPERATOR_CHARS: &str = "!+-*/%=<>|&^~?";

pub(super) fn is_operator_char(c: char) -> bool {
    OPERATOR_CHARS.contains(c)
}

impl Scanner<'_> {
    pub(super) fn operator(&mut self, span: TokenSpan) -> Token {
        let mut text = String::new();
        text.extend(self.cursor.next_char());

        if text == "?" && self.cursor.eat('?') {
            text.push('?');
        } else {
            while text.len() < 3 {
                match self.cursor.peek() {
                    Some(c) if is_operator_char(c) => {
                        self.cursor.next_char();
                        text.push(c);
                    }
                    _ => break,
                }
            }
            if text == ">>>" && self.cursor.eat('=') {
                text.push('=');
            }
        }

        match TokenName::from_operator(&text) {
            Some(name) => Token::new(TokenType::Operator, name, span, text),
            None => Token::error(span, text),
        }
    }
}
