//! Top-level error wrapper types.

#[cfg(feature = "database")]
use crate::DatabaseError;
use crate::{ConfigError, HttpError, ParseError, SocialError, StorageError};

/// Every error condition the Croupier crates can raise.
///
/// # Examples
///
/// ```
/// use croupier_error::{CroupierError, HttpError};
///
/// let http_err = HttpError::new("Connection failed");
/// let err: CroupierError = http_err.into();
/// assert!(format!("{}", err).contains("HTTP Error"));
/// ```
#[derive(Debug, derive_more::From, derive_more::Display, derive_more::Error)]
pub enum CroupierErrorKind {
    /// HTTP transport error
    #[from(HttpError)]
    Http(HttpError),
    /// Configuration error
    #[from(ConfigError)]
    Config(ConfigError),
    /// Command parsing error
    #[from(ParseError)]
    Parse(ParseError),
    /// Storage backend error
    #[from(StorageError)]
    Storage(StorageError),
    /// Image host or messenger error
    #[from(SocialError)]
    Social(SocialError),
    /// Ledger database error
    #[cfg(feature = "database")]
    #[from(DatabaseError)]
    Database(DatabaseError),
}

/// Croupier error with kind discrimination.
///
/// # Examples
///
/// ```
/// use croupier_error::{ConfigError, CroupierErrorKind, CroupierResult};
///
/// fn might_fail() -> CroupierResult<()> {
///     Err(ConfigError::new("Missing keyword"))?
/// }
///
/// let err = might_fail().unwrap_err();
/// assert!(matches!(err.kind(), CroupierErrorKind::Config(_)));
/// ```
#[derive(Debug, derive_more::Display, derive_more::Error)]
#[display("Croupier Error: {}", _0)]
pub struct CroupierError(Box<CroupierErrorKind>);

impl CroupierError {
    /// Create a new error from a kind.
    pub fn new(kind: CroupierErrorKind) -> Self {
        Self(Box::new(kind))
    }

    /// Get the error kind.
    pub fn kind(&self) -> &CroupierErrorKind {
        &self.0
    }
}

// Generic From implementation for any type that converts to CroupierErrorKind
impl<T> From<T> for CroupierError
where
    T: Into<CroupierErrorKind>,
{
    fn from(err: T) -> Self {
        Self::new(err.into())
    }
}

/// Result type for Croupier operations.
pub type CroupierResult<T> = std::result::Result<T, CroupierError>;
