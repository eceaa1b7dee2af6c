use std::io;
use std::path::PathBuf;

/// Hard failures: misuse of the API or trouble loading input.
///
/// Malformed source text never produces one of these. It is reported
/// through [`Diagnostic`](crate::Diagnostic)s instead.
#[derive(Debug, thiserror::Error)]
pub enum Error {
    /// `next_token` was called again after `EndOfInput` was returned.
    #[error("lexer input is exhausted: end of input was already returned")]
    ExhaustedInput,
    /// A configuration value is outside its accepted range.
    #[error("invalid configuration: {0}")]
    InvalidConfig(String),
    /// `peek` asked further ahead than the configured window.
    #[error("lookahead {requested} exceeds the configured maximum of {max}")]
    LookaheadExceeded { requested: usize, max: usize },
    /// A checkpoint mark was restored after being released or invalidated.
    #[error("checkpoint mark {0} is no longer valid")]
    StaleMark(u64),
    /// The parse was cancelled through its cancellation token.
    #[error("parse cancelled")]
    Cancelled,
    /// The source file could not be read.
    #[error("{}: {source}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: io::Error,
    },
    /// The source file is not valid UTF-8.
    #[error("{}: source is not valid UTF-8 (invalid byte at offset {offset})", path.display())]
    Encoding { path: PathBuf, offset: usize },
}
