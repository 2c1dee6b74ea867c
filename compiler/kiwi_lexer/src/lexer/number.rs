//! Numeric literals.
//!
//! `0x`, `0b` and `0o` prefixes select a radix; anything else is decimal
//! with at most one `.` and one exponent. A malformed literal is consumed
//! whole and returned as an error token.

use kiwi_ir::{Token, TokenSpan, TokenType};
use kiwi_value::Value;

use super::Scanner;

impl Scanner<'_> {
    pub(super) fn number(&mut self, span: TokenSpan) -> Token {
        if self.cursor.peek_byte() == Some(b'0') {
            let radix = match self.cursor.peek_byte_at(1) {
                Some(b'x' | b'X') => Some(16),
                Some(b'b' | b'B') => Some(2),
                Some(b'o' | b'O') => Some(8),
                _ => None,
            };
            if let Some(radix) = radix {
                return self.radix_number(span, radix);
            }
        }
        self.decimal(span)
    }

    fn radix_number(&mut self, span: TokenSpan, radix: u32) -> Token {
        let mut text = String::new();
        text.extend(self.cursor.next_char());
        text.extend(self.cursor.next_char());
        let digits = self.cursor.eat_while(|c| c.is_ascii_alphanumeric() || c == '_');
        text.push_str(&digits);

        let cleaned: String = digits.chars().filter(|&c| c != '_').collect();
        // Literals up to 64 bits wide keep their bit pattern: 0xFFFFFFFFFFFFFFFF is -1.
        #[allow(clippy::cast_possible_wrap)]
        let value = u64::from_str_radix(&cleaned, radix).map(|n| n as i64);
        match value {
            Ok(n) => Token::literal(TokenType::Literal, span, text, Value::Integer(n)),
            Err(_) => Token::error(span, text),
        }
    }

    fn decimal(&mut self, span: TokenSpan) -> Token {
        let mut text = String::new();
        let mut dots = 0;
        let mut exponents = 0;
        loop {
            match self.cursor.peek() {
                Some(c) if c.is_ascii_digit() => {
                    self.cursor.next_char();
                    text.push(c);
                }
                Some('.') => {
                    // `1..5` is a range and `1.size()` a method call, not a fraction.
                    if !self.cursor.peek_byte_at(1).is_some_and(|b| b.is_ascii_digit()) {
                        break;
                    }
                    self.cursor.next_char();
                    text.push('.');
                    dots += 1;
                }
                Some(e @ ('e' | 'E')) if self.exponent_follows() => {
                    self.cursor.next_char();
                    text.push(e);
                    if let Some(sign @ ('+' | '-')) = self.cursor.peek() {
                        self.cursor.next_char();
                        text.push(sign);
                    }
                    exponents += 1;
                }
                _ => break,
            }
        }

        if dots > 1 || exponents > 1 || (exponents == 1 && dot_after_exponent(&text)) {
            return Token::error(span, text);
        }
        let value = if dots == 0 && exponents == 0 {
            text.parse::<i64>().ok().map(Value::Integer)
        } else {
            text.parse::<f64>().ok().map(Value::Float)
        };
        match value {
            Some(value) => Token::literal(TokenType::Literal, span, text, value),
            None => Token::error(span, text),
        }
    }

    /// Whether the `e` under the cursor starts an exponent (`e5`, `e-5`).
    fn exponent_follows(&self) -> bool {
        match self.cursor.peek_byte_at(1) {
            Some(b) if b.is_ascii_digit() => true,
            Some(b'+' | b'-') => self.cursor.peek_byte_at(2).is_some_and(|b| b.is_ascii_digit()),
            _ => false,
        }
    }
}

fn dot_after_exponent(text: &str) -> bool {
    match (text.find(['e', 'E']), text.find('.')) {
        (Some(e), Some(dot)) => dot > e,
        _ => false,
    }
}
