//! String, raw string and byte string literals.

use kiwi_ir::{Token, TokenSpan, TokenType};
use kiwi_value::Value;

use super::Scanner;

const SURROGATE_HIGH: std::ops::RangeInclusive<u32> = 0xD800..=0xDBFF;
const SURROGATE_LOW: std::ops::RangeInclusive<u32> = 0xDC00..=0xDFFF;

impl Scanner<'_> {
    /// `"..."` with escapes. Unknown escapes are kept as written.
    pub(super) fn string(&mut self, span: TokenSpan) -> Token {
        self.cursor.next_char();
        let mut text = String::new();
        loop {
            match self.cursor.next_char() {
                None => return Token::error(span, format!("\"{text}")),
                Some('"') => return Token::string(span, text),
                Some('\\') => {
                    if !self.escape(&mut text) {
                        return Token::error(span, format!("\"{text}\\"));
                    }
                }
                Some(c) => text.push(c),
            }
        }
    }

    /// Cook the escape after a backslash into `text`. False at end of input.
    fn escape(&mut self, text: &mut String) -> bool {
        let Some(c) = self.cursor.next_char() else {
            return false;
        };
        match c {
            'n' => text.push('\n'),
            'r' => text.push('\r'),
            't' => text.push('\t'),
            'b' => text.push('\u{08}'),
            'f' => text.push('\u{0C}'),
            '\\' => text.push('\\'),
            '"' => text.push('"'),
            'u' | 'U' => match self.unicode_escape(c) {
                Some(ch) => text.push(ch),
                None => {
                    text.push('\\');
                    text.push(c);
                }
            },
            other => {
                text.push('\\');
                text.push(other);
            }
        }
        true
    }

    /// The character named by `\uXXXX` or `\UXXXXXXXX`, with the leading
    /// backslash and letter already consumed. A high surrogate combines
    /// with an immediately following low-surrogate escape.
    ///
    /// Consumes nothing when the digits do not name a character.
    fn unicode_escape(&mut self, letter: char) -> Option<char> {
        let saved = self.cursor;
        let Some(code) = self.hex_digits(hex_width(letter)) else {
            self.cursor = saved;
            return None;
        };
        if SURROGATE_HIGH.contains(&code) {
            let before_low = self.cursor;
            if let Some(low) = self.low_surrogate() {
                let combined = 0x10000 + ((code - 0xD800) << 10) + (low - 0xDC00);
                if let Some(ch) = char::from_u32(combined) {
                    return Some(ch);
                }
            }
            self.cursor = before_low;
        }
        let ch = char::from_u32(code);
        if ch.is_none() {
            self.cursor = saved;
        }
        ch
    }

    fn low_surrogate(&mut self) -> Option<u32> {
        if self.cursor.peek_byte() != Some(b'\\') {
            return None;
        }
        self.cursor.next_char();
        let letter = self.cursor.next_char().filter(|c| matches!(c, 'u' | 'U'))?;
        self.hex_digits(hex_width(letter))
            .filter(|code| SURROGATE_LOW.contains(code))
    }

    /// Exactly `count` hex digits as a number.
    fn hex_digits(&mut self, count: usize) -> Option<u32> {
        let mut code: u32 = 0;
        for _ in 0..count {
            let digit = self.cursor.peek()?.to_digit(16)?;
            self.cursor.next_char();
            code = code.checked_mul(16)?.checked_add(digit)?;
        }
        Some(code)
    }

    /// `'...'`, taken as written apart from `\'`.
    pub(super) fn raw_string(&mut self, span: TokenSpan) -> Token {
        self.cursor.next_char();
        let mut text = String::new();
        loop {
            match self.cursor.next_char() {
                None => return Token::error(span, format!("'{text}")),
                Some('\'') => return Token::string(span, text),
                Some('\\') if self.cursor.peek() == Some('\'') => {
                    self.cursor.next_char();
                    text.push('\'');
                }
                Some(c) => text.push(c),
            }
        }
    }

    /// `b"..."` or `b'...'`: ASCII text becoming a list of byte values.
    pub(super) fn byte_string(&mut self, span: TokenSpan) -> Token {
        let start = self.cursor.offset();
        self.cursor.next_char();
        let quote = self.cursor.next_char();

        let mut bytes = Vec::new();
        let mut valid = true;
        loop {
            let Some(c) = self.cursor.next_char() else {
                return Token::error(span, self.cursor.text_since(start));
            };
            if Some(c) == quote {
                break;
            }
            if c != '\\' {
                match u8::try_from(c) {
                    Ok(byte) if c.is_ascii() => bytes.push(byte),
                    _ => valid = false,
                }
                continue;
            }
            let Some(escaped) = self.cursor.next_char() else {
                return Token::error(span, self.cursor.text_since(start));
            };
            match escaped {
                'n' => bytes.push(b'\n'),
                'r' => bytes.push(b'\r'),
                't' => bytes.push(b'\t'),
                '\\' => bytes.push(b'\\'),
                '"' => bytes.push(b'"'),
                '\'' => bytes.push(b'\''),
                'x' | 'X' => match self.hex_digits(2).and_then(|b| u8::try_from(b).ok()) {
                    Some(byte) => bytes.push(byte),
                    None => valid = false,
                },
                other => match u8::try_from(other) {
                    Ok(byte) if other.is_ascii() => bytes.extend([b'\\', byte]),
                    _ => valid = false,
                },
            }
        }

        let lexeme = self.cursor.text_since(start);
        if valid {
            Token::literal(TokenType::Literal, span, lexeme, Value::bytes(&bytes))
        } else {
            Token::error(span, lexeme)
        }
    }
}

fn hex_width(letter: char) -> usize {
    if letter == 'U' {
        8
    } else {
        4
    }
}
