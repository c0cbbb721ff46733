use crate::errors::{CssResult, SyntaxError};
use regex::Regex;
use std::fmt::{Debug, Formatter};

pub const CHAR_LF: char = '\u{000A}';
pub const CHAR_CR: char = '\u{000D}';

/// Location holds the position of a character, token or node in the source
#[derive(Clone, Copy, PartialEq, Eq)]
pub struct Location {
    /// Line number, starting with 1
    pub line: usize,
    /// Column number, starting with 1
    pub column: usize,
    /// Byte offset into the normalized input, starting with 0
    pub offset: usize,
}

impl Default for Location {
    /// Default to line 1, column 1
    fn default() -> Self {
        Self::new(1, 1, 0)
    }
}

impl Location {
    /// Create a new Location
    pub fn new(line: usize, column: usize, offset: usize) -> Self {
        Self { line, column, offset }
    }
}

impl Debug for Location {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(f, "({}:{})", self.line, self.column)
    }
}

/// Character cursor over a piece of CSS source.
///
/// Any CRLF pair, as well as a CR without a pairing LF, is read as a single LF. The reader keeps a
/// single bookmark that can be set with [`Reader::mark`] and restored with [`Reader::reset`].
pub struct Reader {
    input: String,
    /// Byte position of the next character
    pos: usize,
    line: usize,
    column: usize,
    bookmark: Option<(usize, usize, usize)>,
}

impl Reader {
    pub fn new(input: &str) -> Self {
        Self {
            input: normalize_newlines(input),
            pos: 0,
            line: 1,
            column: 1,
            bookmark: None,
        }
    }

    /// Location of the next character that will be read
    pub fn location(&self) -> Location {
        Location::new(self.line, self.column, self.pos)
    }

    pub fn line(&self) -> usize {
        self.line
    }

    pub fn column(&self) -> usize {
        self.column
    }

    pub fn eof(&self) -> bool {
        self.pos >= self.input.len()
    }

    fn remaining(&self) -> &str {
        &self.input[self.pos..]
    }

    /// Returns the n-th upcoming character without consuming it. `peek(1)` is the character
    /// the next `read()` returns.
    pub fn peek(&self, n: usize) -> Option<char> {
        if n == 0 {
            return None;
        }
        self.remaining().chars().nth(n - 1)
    }

    /// Consumes and returns the next character
    pub fn read(&mut self) -> Option<char> {
        let ch = self.remaining().chars().next()?;
        self.pos += ch.len_utf8();

        if ch == CHAR_LF {
            self.line += 1;
            self.column = 1;
        } else {
            self.column += 1;
        }

        Some(ch)
    }

    /// Bookmarks the current position, replacing any earlier bookmark
    pub fn mark(&mut self) {
        self.bookmark = Some((self.pos, self.line, self.column));
    }

    /// Returns to the bookmarked position and clears the bookmark. Without a bookmark this does nothing.
    pub fn reset(&mut self) {
        if let Some((pos, line, column)) = self.bookmark.take() {
            self.pos = pos;
            self.line = line;
            self.column = column;
        }
    }

    /// Reads characters as long as the predicate holds. Returns an empty string when the first
    /// character already fails.
    pub fn read_while<F>(&mut self, pred: F) -> String
    where
        F: Fn(char) -> bool,
    {
        let mut buffer = String::new();

        while let Some(ch) = self.peek(1) {
            if !pred(ch) {
                break;
            }
            buffer.push(ch);
            self.read();
        }

        buffer
    }

    /// Reads up to and including the first occurrence of `pattern`. When the end of the input is
    /// reached first, everything has been consumed and an error is returned.
    pub fn read_to(&mut self, pattern: &str) -> CssResult<String> {
        let start = self.location();

        match self.remaining().find(pattern) {
            Some(idx) => Ok(self.read_count_bytes(idx + pattern.len())),
            None => {
                self.read_count_bytes(self.remaining().len());
                Err(SyntaxError::new(
                    &format!(
                        "Expected '{}' at line {}, col {}.",
                        pattern, start.line, start.column
                    ),
                    start,
                ))
            }
        }
    }

    /// Consumes the literal when the input continues with it
    pub fn read_match(&mut self, literal: &str) -> Option<String> {
        if literal.is_empty() || !self.remaining().starts_with(literal) {
            return None;
        }
        Some(self.read_count_bytes(literal.len()))
    }

    /// Consumes the text matched by `re` when the match starts at the current position. The
    /// pattern should be anchored with `^`.
    pub fn read_match_regex(&mut self, re: &Regex) -> Option<String> {
        let m = re.find(self.remaining())?;
        if m.start() != 0 || m.is_empty() {
            return None;
        }
        let len = m.end();
        Some(self.read_count_bytes(len))
    }

    /// Reads at most `count` characters
    pub fn read_count(&mut self, count: usize) -> String {
        let mut buffer = String::new();
        for _ in 0..count {
            match self.read() {
                Some(ch) => buffer.push(ch),
                None => break,
            }
        }
        buffer
    }

    fn read_count_bytes(&mut self, len: usize) -> String {
        let end = self.pos + len;
        let mut buffer = String::with_capacity(len);
        while self.pos < end {
            match self.read() {
                Some(ch) => buffer.push(ch),
                None => break,
            }
        }
        buffer
    }
}

/// Replaces CRLF pairs and lone CRs with LF, the way the reader sees its input
pub fn normalize_newlines(input: &str) -> String {
    let mut out = String::with_capacity(input.len());
    let mut chars = input.chars().peekable();

    while let Some(ch) = chars.next() {
        if ch == CHAR_CR {
            if chars.peek() == Some(&CHAR_LF) {
                chars.next();
            }
            out.push(CHAR_LF);
        } else {
            out.push(ch);
        }
    }

    out
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn read_tracks_line_and_column() {
        let mut reader = Reader::new("ab\ncd");
        assert_eq!(reader.location(), Location::new(1, 1, 0));
        assert_eq!(reader.read(), Some('a'));
        assert_eq!(reader.read(), Some('b'));
        assert_eq!(reader.location(), Location::new(1, 3, 2));
        assert_eq!(reader.read(), Some('\n'));
        assert_eq!(reader.location(), Location::new(2, 1, 3));
        assert_eq!(reader.read(), Some('c'));
        assert_eq!(reader.read(), Some('d'));
        assert_eq!(reader.read(), None);
        assert_eq!(reader.peek(1), None);
        assert!(reader.eof());
    }

    #[test]
    fn newlines_are_normalized() {
        let mut reader = Reader::new("a\r\nb\rc");
        assert_eq!(reader.read_count(10), "a\nb\nc");
        assert_eq!(reader.line(), 3);
        assert_eq!(reader.column(), 2);
    }

    #[test]
    fn peek_does_not_consume() {
        let mut reader = Reader::new("xyz");
        assert_eq!(reader.peek(1), Some('x'));
        assert_eq!(reader.peek(3), Some('z'));
        assert_eq!(reader.peek(4), None);
        assert_eq!(reader.read(), Some('x'));
    }

    #[test]
    fn mark_and_reset() {
        let mut reader = Reader::new("one\ntwo three");
        reader.read_count(5);
        reader.mark();
        let at_mark = reader.location();
        let first = reader.read_count(6);

        reader.reset();
        assert_eq!(reader.location(), at_mark);
        assert_eq!(reader.read_count(6), first);

        // a second reset without a new mark is a no-op
        let after = reader.location();
        reader.reset();
        assert_eq!(reader.location(), after);
    }

    #[test]
    fn read_while_and_to() {
        let mut reader = Reader::new("abc123 */rest");
        assert_eq!(reader.read_while(|c| c.is_ascii_alphabetic()), "abc");
        assert_eq!(reader.read_while(|c| c == 'q'), "");
        assert_eq!(reader.read_to("*/").unwrap(), "123 */");
        assert_eq!(reader.read_count(10), "rest");

        let mut reader = Reader::new("no end here");
        let err = reader.read_to("*/").unwrap_err();
        assert_eq!(err.message, "Expected '*/' at line 1, col 1.");
        assert!(reader.eof());
    }

    #[test]
    fn read_match_literal_and_regex() {
        let mut reader = Reader::new("important;");
        assert_eq!(reader.read_match("imx"), None);
        assert_eq!(reader.location().offset, 0);
        assert_eq!(reader.read_match("import"), Some("import".to_string()));

        let re = Regex::new("^[a-z]+").unwrap();
        assert_eq!(reader.read_match_regex(&re), Some("ant".to_string()));
        assert_eq!(reader.read_match_regex(&re), None);
        assert_eq!(reader.read(), Some(';'));
    }
}
