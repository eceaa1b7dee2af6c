//! Buffered token stream with bounded lookahead and backtracking.
//!
//! The stream pulls tokens from the [`Lexer`] only when the parser asks for
//! them and forgets consumed tokens as soon as no checkpoint needs them, so
//! memory stays proportional to the lookahead window (plus the span of any
//! open speculation), never to the input size.

use std::collections::VecDeque;
use std::sync::Arc;
use std::sync::atomic::{AtomicBool, Ordering};

use tracing::trace;

use crate::diagnostic::Diagnostics;
use crate::error::Error;
use crate::lexer::Lexer;
use crate::source::Position;
use crate::token::{Token, TokenKind};

/// Cooperative cancellation flag shared between a caller and a parse.
///
/// Cloning shares the flag. The token stream polls it every time it pulls
/// a token from the lexer.
#[derive(Debug, Clone, Default)]
pub struct CancellationToken(Arc<AtomicBool>);

impl CancellationToken {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    pub fn cancel(&self) {
        self.0.store(true, Ordering::Relaxed);
    }

    #[must_use]
    pub fn is_cancelled(&self) -> bool {
        self.0.load(Ordering::Relaxed)
    }
}

/// A saved stream position returned by [`TokenStream::checkpoint`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Mark {
    id: u64,
    index: usize,
}

impl Mark {
    /// Index of the token that was current when the mark was taken.
    #[must_use]
    pub const fn index(self) -> usize {
        self.index
    }
}

#[derive(Debug)]
pub struct TokenStream<'src> {
    lexer: Lexer<'src>,
    buffer: VecDeque<Token<'src>>,
    /// Absolute index of `buffer[0]`.
    base: usize,
    /// Absolute index of the current token.
    cursor: usize,
    /// Live marks, oldest first.
    marks: Vec<Mark>,
    next_mark: u64,
    max_lookahead: usize,
    saw_end: bool,
    cancel: Option<CancellationToken>,
    cancelled: bool,
}

impl<'src> TokenStream<'src> {
    #[must_use]
    pub fn new(lexer: Lexer<'src>, max_lookahead: usize) -> Self {
        Self {
            lexer,
            buffer: VecDeque::with_capacity(max_lookahead),
            base: 0,
            cursor: 0,
            marks: Vec::new(),
            next_mark: 0,
            max_lookahead: max_lookahead.max(1),
            saw_end: false,
            cancel: None,
            cancelled: false,
        }
    }

    #[must_use]
    pub fn with_cancellation(mut self, token: CancellationToken) -> Self {
        self.cancel = Some(token);
        self
    }

    /// The token `k` places ahead of the cursor; `peek(0)` is the current
    /// token. Past the end this keeps returning `EndOfInput`.
    ///
    /// # Errors
    ///
    /// Returns `Error::LookaheadExceeded` if `k` is not below the
    /// configured maximum lookahead.
    pub fn peek(&mut self, k: usize) -> Result<Token<'src>, Error> {
        if k >= self.max_lookahead {
            return Err(Error::LookaheadExceeded {
                requested: k,
                max: self.max_lookahead,
            });
        }
        Ok(self.token_at(self.cursor + k))
    }

    /// The current token.
    pub fn current(&mut self) -> Token<'src> {
        self.token_at(self.cursor)
    }

    /// Consume and return the current token. At `EndOfInput` the stream
    /// stays put and returns `EndOfInput` again.
    pub fn advance(&mut self) -> Token<'src> {
        let token = self.current();
        if token.kind != TokenKind::EndOfInput {
            self.cursor += 1;
            self.compact();
        }
        token
    }

    /// Absolute index of the current token; strictly increases with every
    /// non-end `advance`.
    #[must_use]
    pub const fn position(&self) -> usize {
        self.cursor
    }

    /// Remember the current position so it can be restored.
    pub fn checkpoint(&mut self) -> Mark {
        let mark = Mark {
            id: self.next_mark,
            index: self.cursor,
        };
        self.next_mark += 1;
        self.marks.push(mark);
        mark
    }

    /// Rewind to `mark`. Marks taken after it become invalid; `mark`
    /// itself stays live until released.
    ///
    /// # Errors
    ///
    /// Returns `Error::StaleMark` if `mark` was released or invalidated.
    pub fn restore(&mut self, mark: Mark) -> Result<(), Error> {
        let slot = self
            .marks
            .iter()
            .position(|m| m.id == mark.id)
            .ok_or(Error::StaleMark(mark.id))?;
        self.marks.truncate(slot + 1);
        trace!(from = self.cursor, to = mark.index, "restoring checkpoint");
        self.cursor = mark.index;
        Ok(())
    }

    /// Drop `mark` and any later marks, letting the buffer shrink.
    /// Releasing a mark that is already gone does nothing.
    pub fn release(&mut self, mark: Mark) {
        if let Some(slot) = self.marks.iter().position(|m| m.id == mark.id) {
            self.marks.truncate(slot);
            self.compact();
        }
    }

    /// Number of tokens currently held in memory.
    #[must_use]
    pub fn buffered(&self) -> usize {
        self.buffer.len()
    }

    /// Whether the cancellation token fired during this parse.
    #[must_use]
    pub const fn is_cancelled(&self) -> bool {
        self.cancelled
    }

    pub const fn diagnostics_mut(&mut self) -> &mut Diagnostics {
        self.lexer.diagnostics_mut()
    }

    #[must_use]
    pub const fn diagnostics(&self) -> &Diagnostics {
        self.lexer.diagnostics()
    }

    #[must_use]
    pub fn into_diagnostics(self) -> Diagnostics {
        self.lexer.into_diagnostics()
    }

    fn token_at(&mut self, index: usize) -> Token<'src> {
        while !self.saw_end && self.base + self.buffer.len() <= index {
            self.pull();
        }
        self.buffer
            .get(index - self.base)
            .or_else(|| self.buffer.back())
            .copied()
            .unwrap_or_else(|| end_token(Position::START))
    }

    fn pull(&mut self) {
        if self.cancel.as_ref().is_some_and(CancellationToken::is_cancelled) {
            trace!(at = self.base + self.buffer.len(), "parse cancelled");
            self.cancelled = true;
            let at = self.buffer.back().map_or(Position::START, |t| t.end);
            self.push(end_token(at));
            return;
        }
        match self.lexer.next_token() {
            Ok(token) => self.push(token),
            Err(_) => {
                let at = self.buffer.back().map_or(Position::START, |t| t.end);
                self.push(end_token(at));
            }
        }
    }

    fn push(&mut self, token: Token<'src>) {
        if token.kind == TokenKind::EndOfInput {
            self.saw_end = true;
        }
        self.buffer.push_back(token);
    }

    /// Forget tokens no mark and not the cursor can reach again.
    fn compact(&mut self) {
        let keep_from = self
            .marks
            .first()
            .map_or(self.cursor, |m| m.index.min(self.cursor));
        while self.base < keep_from && !self.buffer.is_empty() {
            self.buffer.pop_front();
            self.base += 1;
        }
    }
}

const fn end_token<'src>(at: Position) -> Token<'src> {
    Token {
        kind: TokenKind::EndOfInput,
        lexeme: "",
        start: at,
        end: at,
    }
}
