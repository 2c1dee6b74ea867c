//! Character cursor over a byte slice.
//!
//! `\r\n`, `\r` and `\n` are all read as a single `'\n'` and count as
//! one line break.

/// A 1-based line and column.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct Position {
    pub line: u32,
    pub column: u32,
}

impl Default for Position {
    fn default() -> Self {
        Position { line: 1, column: 1 }
    }
}

/// Cursor over source bytes.
///
/// The cursor is [`Copy`], so a snapshot for backtracking is a plain
/// assignment.
#[derive(Clone, Copy, Debug)]
pub struct Cursor<'a> {
    bytes: &'a [u8],
    pos: usize,
    position: Position,
}

impl<'a> Cursor<'a> {
    pub fn new(bytes: &'a [u8]) -> Self {
        Cursor {
            bytes,
            pos: 0,
            position: Position::default(),
        }
    }

    /// A cursor whose first character sits at `start`, for text cut out
    /// of a larger source.
    pub fn with_position(bytes: &'a [u8], start: Position) -> Self {
        Cursor {
            bytes,
            pos: 0,
            position: start,
        }
    }

    /// Line and column of the next character.
    #[inline]
    pub fn position(&self) -> Position {
        self.position
    }

    /// Byte offset of the next character.
    #[inline]
    pub fn offset(&self) -> usize {
        self.pos
    }

    #[inline]
    pub fn is_eof(&self) -> bool {
        self.pos >= self.bytes.len()
    }

    /// The next byte, without consuming it.
    #[inline]
    pub fn peek_byte(&self) -> Option<u8> {
        self.bytes.get(self.pos).copied()
    }

    /// The byte `n` positions ahead of the next one.
    #[inline]
    pub fn peek_byte_at(&self, n: usize) -> Option<u8> {
        self.bytes.get(self.pos + n).copied()
    }

    /// The next character, without consuming it.
    pub fn peek(&self) -> Option<char> {
        decode(&self.bytes[self.pos.min(self.bytes.len())..]).map(|(c, _)| c)
    }

    /// Consume and return the next character.
    pub fn next_char(&mut self) -> Option<char> {
        let (c, width) = decode(&self.bytes[self.pos..])?;
        self.pos += width;
        if c == '\r' {
            if self.peek_byte() == Some(b'\n') {
                self.pos += 1;
            }
            self.newline();
            return Some('\n');
        }
        if c == '\n' {
            self.newline();
        } else {
            self.position.column += 1;
        }
        Some(c)
    }

    /// Consume the next character if it is `expected`.
    pub fn eat(&mut self, expected: char) -> bool {
        if self.peek() == Some(expected) {
            self.next_char();
            true
        } else {
            false
        }
    }

    #[inline]
    fn newline(&mut self) {
        self.position.line += 1;
        self.position.column = 1;
    }

    /// Skip spaces, tabs and line breaks.
    pub fn eat_whitespace(&mut self) {
        while let Some(b) = self.peek_byte() {
            if matches!(b, b' ' | b'\t' | b'\n' | b'\r' | 0x0B | 0x0C) {
                self.next_char();
            } else {
                break;
            }
        }
    }

    /// Consume characters while `pred` holds, returning them.
    pub fn eat_while(&mut self, mut pred: impl FnMut(char) -> bool) -> String {
        let mut out = String::new();
        while let Some(c) = self.peek() {
            if !pred(c) {
                break;
            }
            self.next_char();
            out.push(c);
        }
        out
    }

    /// Consume the rest of the current line, excluding the line break.
    pub fn eat_line(&mut self) -> String {
        let rest = &self.bytes[self.pos..];
        let end = memchr::memchr2(b'\n', b'\r', rest).unwrap_or(rest.len());
        let text = lossy(&rest[..end]);
        self.pos += end;
        self.position.column += count_chars(&text);
        text
    }

    /// Consume up to and including `terminator`, returning what came
    /// before it. Without a terminator, consume everything and return
    /// `None`.
    pub fn eat_until_sequence(&mut self, terminator: &[u8]) -> Option<String> {
        let rest = &self.bytes[self.pos..];
        match memchr::memmem::find(rest, terminator) {
            Some(end) => {
                let text = lossy(&rest[..end]);
                self.skip_bytes(end + terminator.len());
                Some(text)
            }
            None => {
                self.skip_bytes(rest.len());
                None
            }
        }
    }

    /// Source text from byte offset `start` up to the cursor.
    pub fn text_since(&self, start: usize) -> String {
        lossy(self.bytes.get(start..self.pos).unwrap_or_default())
    }

    /// Advance `n` bytes, keeping line and column in step.
    fn skip_bytes(&mut self, n: usize) {
        let target = (self.pos + n).min(self.bytes.len());
        while self.pos < target {
            self.next_char();
        }
    }
}

#[allow(clippy::cast_possible_truncation)]
fn count_chars(text: &str) -> u32 {
    text.chars().count().min(u32::MAX as usize) as u32
}

/// Decode text, mapping each invalid byte to the Latin-1 character of the
/// same value.
fn lossy(bytes: &[u8]) -> String {
    let mut out = String::with_capacity(bytes.len());
    let mut rest = bytes;
    while let Some((c, width)) = decode(rest) {
        out.push(c);
        rest = &rest[width..];
    }
    out
}

/// Decode one character from the front of `bytes`.
///
/// Returns the character and how many bytes it used. A malformed or
/// truncated sequence yields its first byte as a Latin-1 character.
fn decode(bytes: &[u8]) -> Option<(char, usize)> {
    let &lead = bytes.first()?;
    let width = match lead {
        0x00..=0x7F => return Some((char::from(lead), 1)),
        0xC2..=0xDF => 2,
        0xE0..=0xEF => 3,
        0xF0..=0xF4 => 4,
        _ => return Some((char::from(lead), 1)),
    };
    bytes
        .get(..width)
        .and_then(|seq| std::str::from_utf8(seq).ok())
        .and_then(|s| s.chars().next())
        .map_or(Some((char::from(lead), 1)), |c| Some((c, width)))
}
