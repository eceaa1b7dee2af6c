//! The configuration surface recognized by the lexer and parser.

use std::collections::HashSet;

use crate::error::Error;
use crate::token::{Keyword, TokenKind};

/// Which byte sequences end a line.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum NewlineMode {
    /// Only `\n` ends a line; `\r` is ordinary whitespace.
    Lf,
    /// `\n`, `\r\n` and a lone `\r` each end a line.
    #[default]
    Both,
}

/// Lexer and parser settings.
///
/// Built with chained setters and checked by [`Config::validate`]:
///
/// ```
/// use noctern::{Config, NewlineMode};
///
/// let config = Config::new().tab_width(8).newline(NewlineMode::Lf);
/// assert!(config.validate().is_ok());
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Config {
    pub tab_width: usize,
    pub newline: NewlineMode,
    pub max_lookahead: usize,
    pub recovery_sync_tokens: HashSet<TokenKind>,
}

impl Config {
    pub const DEFAULT_TAB_WIDTH: usize = 4;
    pub const MAX_TAB_WIDTH: usize = 16;
    pub const DEFAULT_MAX_LOOKAHEAD: usize = 8;
    /// The parser needs one token beyond the current one.
    pub const MIN_LOOKAHEAD: usize = 2;

    #[must_use]
    pub fn new() -> Self {
        Self {
            tab_width: Self::DEFAULT_TAB_WIDTH,
            newline: NewlineMode::default(),
            max_lookahead: Self::DEFAULT_MAX_LOOKAHEAD,
            recovery_sync_tokens: default_sync_tokens(),
        }
    }

    #[must_use]
    pub const fn tab_width(mut self, width: usize) -> Self {
        self.tab_width = width;
        self
    }

    #[must_use]
    pub const fn newline(mut self, mode: NewlineMode) -> Self {
        self.newline = mode;
        self
    }

    #[must_use]
    pub const fn max_lookahead(mut self, tokens: usize) -> Self {
        self.max_lookahead = tokens;
        self
    }

    /// Replace the set of tokens error recovery stops at. Recovery also
    /// stops at the `}` closing an open block, whether or not it is listed.
    #[must_use]
    pub fn sync_tokens(mut self, kinds: impl IntoIterator<Item = TokenKind>) -> Self {
        self.recovery_sync_tokens = kinds.into_iter().collect();
        self
    }

    /// Add one token kind to the recovery set.
    #[must_use]
    pub fn sync_on(mut self, kind: TokenKind) -> Self {
        self.recovery_sync_tokens.insert(kind);
        self
    }

    /// Check every setting is usable.
    pub fn validate(&self) -> Result<(), Error> {
        if self.tab_width == 0 || self.tab_width > Self::MAX_TAB_WIDTH {
            return Err(Error::InvalidConfig(format!(
                "tab_width must be between 1 and {}, got {}",
                Self::MAX_TAB_WIDTH,
                self.tab_width
            )));
        }
        if self.max_lookahead < Self::MIN_LOOKAHEAD {
            return Err(Error::InvalidConfig(format!(
                "max_lookahead must be at least {}, got {}",
                Self::MIN_LOOKAHEAD,
                self.max_lookahead
            )));
        }
        if self.recovery_sync_tokens.is_empty() {
            return Err(Error::InvalidConfig(
                "recovery_sync_tokens must not be empty".to_string(),
            ));
        }
        if self.recovery_sync_tokens.contains(&TokenKind::EndOfInput) {
            return Err(Error::InvalidConfig(
                "end of input is always a stopping point and cannot be a sync token".to_string(),
            ));
        }
        if let Some(kind) = self
            .recovery_sync_tokens
            .iter()
            .find(|kind| kind.is_trivia())
        {
            return Err(Error::InvalidConfig(format!(
                "{} never reaches the parser and cannot be a sync token",
                kind.describe()
            )));
        }
        Ok(())
    }
}

impl Default for Config {
    fn default() -> Self {
        Self::new()
    }
}

/// Statement terminators, block ends and every declaration keyword.
fn default_sync_tokens() -> HashSet<TokenKind> {
    let mut kinds: HashSet<TokenKind> = Keyword::ALL.into_iter().map(TokenKind::Keyword).collect();
    kinds.insert(TokenKind::Semicolon);
    kinds.insert(TokenKind::RBrace);
    kinds
}
