//! Diagnostics collected while lexing and parsing.
//!
//! Malformed input is never fatal: every problem the lexer or parser
//! finds is appended to a [`Diagnostics`] collector and processing
//! continues.

use std::fmt::{self, Write as _};

use crate::config::Config;
use crate::source::{Position, Source};

/// How serious a diagnostic is.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Severity {
    Error,
    Warning,
}

impl fmt::Display for Severity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Error => write!(f, "error"),
            Self::Warning => write!(f, "warning"),
        }
    }
}

/// Which stage produced a diagnostic.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Category {
    /// Unrecognized characters or malformed literals.
    Lex,
    /// Token sequences the grammar does not accept.
    Syntax,
}

/// A single error or warning with the position it refers to.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Diagnostic {
    pub severity: Severity,
    pub category: Category,
    pub message: String,
    pub position: Position,
}

impl Diagnostic {
    #[must_use]
    pub fn error(category: Category, message: impl Into<String>, position: Position) -> Self {
        Self {
            severity: Severity::Error,
            category,
            message: message.into(),
            position,
        }
    }

    #[must_use]
    pub fn warning(category: Category, message: impl Into<String>, position: Position) -> Self {
        Self {
            severity: Severity::Warning,
            category,
            message: message.into(),
            position,
        }
    }

    #[must_use]
    pub const fn is_error(&self) -> bool {
        matches!(self.severity, Severity::Error)
    }

    /// Render with the file name, the offending line and a caret under
    /// the reported column, using the default configuration.
    #[must_use]
    pub fn render(&self, source: &Source) -> String {
        self.render_with(source, &Config::default())
    }

    /// Render for a source lexed with `config`. Tabs in the echoed line
    /// are expanded so the caret lines up with the reported column.
    #[must_use]
    pub fn render_with(&self, source: &Source, config: &Config) -> String {
        let mut out = String::new();
        let name = source.name().unwrap_or("<input>");
        let _ = writeln!(out, "{name}:{self}");
        if let Some(line) = source.line_text(self.position.line, config.newline) {
            let line = expand_tabs(line, config.tab_width);
            let gutter = self.position.line.to_string();
            let _ = writeln!(out, "{gutter} | {line}");
            let pad = " ".repeat(gutter.len());
            let caret_col = self.position.column.saturating_sub(1);
            let _ = writeln!(out, "{pad} | {}^", " ".repeat(caret_col));
        }
        out
    }
}

fn expand_tabs(line: &str, tab_width: usize) -> String {
    let tab_width = tab_width.max(1);
    let mut out = String::with_capacity(line.len());
    let mut col = 0;
    for ch in line.chars() {
        if ch == '\t' {
            let next = (col / tab_width + 1) * tab_width;
            out.extend(std::iter::repeat_n(' ', next - col));
            col = next;
        } else {
            out.push(ch);
            col += 1;
        }
    }
    out
}

impl fmt::Display for Diagnostic {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}: {}: {}", self.position, self.severity, self.message)
    }
}

/// Append-only sink for one parse invocation.
///
/// Diagnostics come back in the order they were reported. They are never
/// re-sorted by position, since recovery may legitimately revisit earlier
/// input.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Diagnostics {
    items: Vec<Diagnostic>,
    errors: usize,
}

impl Diagnostics {
    #[must_use]
    pub const fn new() -> Self {
        Self {
            items: Vec::new(),
            errors: 0,
        }
    }

    pub fn report(&mut self, diagnostic: Diagnostic) {
        if diagnostic.is_error() {
            self.errors += 1;
        }
        self.items.push(diagnostic);
    }

    pub fn error(&mut self, category: Category, message: impl Into<String>, position: Position) {
        self.report(Diagnostic::error(category, message, position));
    }

    pub fn warning(&mut self, category: Category, message: impl Into<String>, position: Position) {
        self.report(Diagnostic::warning(category, message, position));
    }

    #[must_use]
    pub fn all(&self) -> &[Diagnostic] {
        &self.items
    }

    #[must_use]
    pub const fn has_errors(&self) -> bool {
        self.errors > 0
    }

    #[must_use]
    pub const fn error_count(&self) -> usize {
        self.errors
    }

    #[must_use]
    pub const fn len(&self) -> usize {
        self.items.len()
    }

    #[must_use]
    pub const fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    #[must_use]
    pub fn into_vec(self) -> Vec<Diagnostic> {
        self.items
    }
}
