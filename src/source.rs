//! Source buffers and position tracking.

use std::fmt;
use std::fs;
use std::path::Path;

use crate::config::NewlineMode;
use crate::error::Error;

/// A location in the source text.
///
/// `offset` is a byte offset; `column` counts characters, with tabs
/// expanded to the configured tab stop.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct Position {
    pub line: usize,
    pub column: usize,
    pub offset: usize,
}

impl Position {
    /// The position of the first character of any input.
    pub const START: Self = Self {
        line: 1,
        column: 1,
        offset: 0,
    };

    #[must_use]
    pub const fn new(line: usize, column: usize, offset: usize) -> Self {
        Self {
            line,
            column,
            offset,
        }
    }
}

impl Default for Position {
    fn default() -> Self {
        Self::START
    }
}

impl fmt::Display for Position {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}:{}", self.line, self.column)
    }
}

/// A half-open region of source text, `start..end`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct Span {
    pub start: Position,
    pub end: Position,
}

impl Span {
    #[must_use]
    pub const fn new(start: Position, end: Position) -> Self {
        Self { start, end }
    }

    /// An empty span located at `at`.
    #[must_use]
    pub const fn point(at: Position) -> Self {
        Self { start: at, end: at }
    }

    /// The smallest span covering both `self` and `other`.
    #[must_use]
    pub fn merge(self, other: Self) -> Self {
        let start = if other.start.offset < self.start.offset {
            other.start
        } else {
            self.start
        };
        let end = if other.end.offset > self.end.offset {
            other.end
        } else {
            self.end
        };
        Self { start, end }
    }

    #[must_use]
    pub const fn len(self) -> usize {
        self.end.offset - self.start.offset
    }

    #[must_use]
    pub const fn is_empty(self) -> bool {
        self.start.offset == self.end.offset
    }
}

/// Immutable source text with an optional display name.
///
/// A `Source` is only ever borrowed by the lexer, so one buffer can feed
/// any number of concurrent parses.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Source {
    name: Option<String>,
    text: String,
}

impl Source {
    /// Wrap in-memory text.
    #[must_use]
    pub fn new(name: Option<&str>, text: impl Into<String>) -> Self {
        Self {
            name: name.map(str::to_string),
            text: text.into(),
        }
    }

    /// In-memory text with no display name.
    #[must_use]
    pub fn anonymous(text: impl Into<String>) -> Self {
        Self::new(None, text)
    }

    /// Read a UTF-8 file from disk. The path becomes the display name.
    pub fn from_path(path: impl AsRef<Path>) -> Result<Self, Error> {
        let path = path.as_ref();
        let bytes = fs::read(path).map_err(|source| Error::Io {
            path: path.to_path_buf(),
            source,
        })?;
        let text = String::from_utf8(bytes).map_err(|e| Error::Encoding {
            path: path.to_path_buf(),
            offset: e.utf8_error().valid_up_to(),
        })?;
        Ok(Self {
            name: Some(path.display().to_string()),
            text,
        })
    }

    #[must_use]
    pub fn name(&self) -> Option<&str> {
        self.name.as_deref()
    }

    #[must_use]
    pub fn text(&self) -> &str {
        &self.text
    }

    /// The full text of the 1-based `line`, without its terminator. Lines
    /// are counted the same way the lexer counts them under `newline`.
    #[must_use]
    pub fn line_text(&self, line: usize, newline: NewlineMode) -> Option<&str> {
        let index = line.checked_sub(1)?;
        match newline {
            NewlineMode::Lf => self
                .text
                .split('\n')
                .nth(index)
                .map(|l| l.strip_suffix('\r').unwrap_or(l)),
            NewlineMode::Both => {
                let mut rest = self.text.as_str();
                for _ in 0..index {
                    let end = rest.find(['\n', '\r'])?;
                    let width = if rest[end..].starts_with("\r\n") { 2 } else { 1 };
                    rest = &rest[end + width..];
                }
                Some(rest.find(['\n', '\r']).map_or(rest, |end| &rest[..end]))
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn merge_covers_both() {
        let a = Span::new(Position::new(1, 1, 0), Position::new(1, 3, 2));
        let b = Span::new(Position::new(1, 5, 4), Position::new(1, 6, 5));
        let m = a.merge(b);
        assert_eq!(m.start.offset, 0);
        assert_eq!(m.end.offset, 5);
        assert_eq!(b.merge(a), m);
        assert_eq!(m.len(), 5);
    }

    #[test]
    fn line_text_strips_carriage_return() {
        let src = Source::anonymous("let a = 1;\r\nlet b = 2;\n");
        for mode in [NewlineMode::Lf, NewlineMode::Both] {
            assert_eq!(src.line_text(1, mode), Some("let a = 1;"));
            assert_eq!(src.line_text(2, mode), Some("let b = 2;"));
            assert_eq!(src.line_text(3, mode), Some(""));
            assert_eq!(src.line_text(4, mode), None);
            assert_eq!(src.line_text(0, mode), None);
        }
    }

    #[test]
    fn lone_carriage_return_ends_a_line_in_both_mode() {
        let src = Source::anonymous("a;\rb @;\r\nc;");
        assert_eq!(src.line_text(2, NewlineMode::Both), Some("b @;"));
        assert_eq!(src.line_text(3, NewlineMode::Both), Some("c;"));
        assert_eq!(src.line_text(1, NewlineMode::Lf), Some("a;\rb @;"));
        assert_eq!(src.line_text(2, NewlineMode::Lf), Some("c;"));
    }

    #[test]
    fn from_path_missing_file() {
        let err = Source::from_path("/definitely/not/here.nct").unwrap_err();
        assert!(matches!(err, Error::Io { .. }));
    }

    #[test]
    fn position_display() {
        assert_eq!(Position::new(3, 7, 20).to_string(), "3:7");
    }
}
