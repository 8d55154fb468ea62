//! Command parsing error types.

/// Reasons an inbound command cannot be turned into a search query.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, derive_more::Display)]
pub enum ParseErrorKind {
    /// The message is empty or does not start with the configured keyword.
    #[display("{} keyword not in message", _0)]
    KeywordMissing(String),
}

/// Parse error with location tracking.
///
/// # Examples
///
/// ```
/// use croupier_error::{ParseError, ParseErrorKind};
///
/// let err = ParseError::new(ParseErrorKind::KeywordMissing("post".to_string()));
/// assert_eq!(err.kind.to_string(), "post keyword not in message");
/// ```
#[derive(Debug, Clone, derive_more::Display, derive_more::Error)]
#[display("Parse Error: {} at line {} in {}", kind, line, file)]
pub struct ParseError {
    /// The kind of error that occurred
    pub kind: ParseErrorKind,
    /// Line number where error was created
    pub line: u32,
    /// File where error was created
    pub file: &'static str,
}

impl ParseError {
    /// Create a new parse error with automatic location tracking.
    #[track_caller]
    pub fn new(kind: ParseErrorKind) -> Self {
        let location = std::panic::Location::caller();
        Self {
            kind,
            line: location.line(),
            file: location.file(),
        }
    }

    /// Human-readable guidance for the sender of the message.
    pub fn guidance(&self) -> String {
        self.kind.to_string()
    }
}
