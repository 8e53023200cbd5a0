//! Read position over an immutable source buffer
//!
//! The cursor is the only mutable state of a scan. Each sub-scanner takes
//! it by `&mut`, consumes what it matches and leaves `current` on the first
//! character it did not accept.

use crate::error::SourceLocation;

/// Position of a scan within `source`.
///
/// Invariant: `start <= current <= source.len()`.
#[derive(Debug, Clone, Copy)]
pub struct Cursor<'src> {
    source: &'src [char],
    filename: Option<&'src str>,
    /// First character of the lexeme being scanned
    start: usize,
    /// Next unread character
    current: usize,
    line: usize,
    column: usize,
    start_line: usize,
    start_column: usize,
}

impl<'src> Cursor<'src> {
    pub fn new(source: &'src [char], filename: Option<&'src str>) -> Self {
        Self {
            source,
            filename,
            start: 0,
            current: 0,
            line: 1,
            column: 1,
            start_line: 1,
            start_column: 1,
        }
    }

    /// Mark the next unread character as the start of a new lexeme
    pub fn begin_lexeme(&mut self) {
        self.start = self.current;
        self.start_line = self.line;
        self.start_column = self.column;
    }

    pub fn is_at_end(&self) -> bool {
        self.current >= self.source.len()
    }

    /// Consume one character. Every newline consumed, by any sub-scanner,
    /// moves the cursor to the next line.
    pub fn advance(&mut self) -> char {
        let c = self.source[self.current];
        self.current += 1;
        if c == '\n' {
            self.line += 1;
            self.column = 1;
        } else {
            self.column += 1;
        }
        c
    }

    /// Consume the next character only if it is `expected`
    pub fn match_char(&mut self, expected: char) -> bool {
        if self.peek() == Some(expected) {
            self.advance();
            true
        } else {
            false
        }
    }

    pub fn peek(&self) -> Option<char> {
        self.source.get(self.current).copied()
    }

    pub fn peek_next(&self) -> Option<char> {
        self.source.get(self.current + 1).copied()
    }

    /// Consume characters while `pred` holds
    pub fn eat_while(&mut self, mut pred: impl FnMut(char) -> bool) {
        while self.peek().is_some_and(&mut pred) {
            self.advance();
        }
    }

    /// Text of the current lexeme, copied out of the source
    pub fn lexeme(&self) -> String {
        self.source[self.start..self.current].iter().collect()
    }

    /// Text of the current lexeme without its first and last character
    pub fn lexeme_inner(&self) -> String {
        if self.current - self.start < 2 {
            return String::new();
        }
        self.source[self.start + 1..self.current - 1].iter().collect()
    }

    pub fn line(&self) -> usize {
        self.line
    }

    /// Where the current lexeme begins
    pub fn start_location(&self) -> SourceLocation {
        SourceLocation::new(
            self.start_line,
            self.start_column,
            self.filename.map(str::to_string),
        )
    }

    /// Where the next unread character sits
    pub fn current_location(&self) -> SourceLocation {
        SourceLocation::new(self.line, self.column, self.filename.map(str::to_string))
    }
}
