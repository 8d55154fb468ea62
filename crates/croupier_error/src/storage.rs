//! Storage backend error types.

/// Kinds of storage backend errors.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, derive_more::Display)]
pub enum StorageErrorKind {
    /// The provider could not be reached or returned a failure status
    #[display("Storage unavailable: {}", _0)]
    Unavailable(String),
    /// A provider call exceeded the configured timeout
    #[display("Storage call timed out after {}s: {}", _1, _0)]
    Timeout(String, u64),
    /// The configured folder could not be resolved
    #[display("Folder not found: {}", _0)]
    FolderNotFound(String),
    /// The provider answered with a body we could not interpret
    #[display("Invalid provider response: {}", _0)]
    InvalidResponse(String),
    /// The item cannot be fetched by this backend
    #[display("Unsupported item: {}", _0)]
    UnsupportedItem(String),
}

/// Storage error with location tracking.
///
/// # Examples
///
/// ```
/// use croupier_error::{StorageError, StorageErrorKind};
///
/// let err = StorageError::new(StorageErrorKind::FolderNotFound("/pics".to_string()));
/// assert!(format!("{}", err).contains("Folder not found"));
/// ```
#[derive(Debug, Clone, derive_more::Display, derive_more::Error)]
#[display("Storage Error: {} at line {} in {}", kind, line, file)]
pub struct StorageError {
    /// The kind of error that occurred
    pub kind: StorageErrorKind,
    /// Line number where error was created
    pub line: u32,
    /// File where error was created
    pub file: &'static str,
}

impl StorageError {
    /// Create a new storage error with automatic location tracking.
    #[track_caller]
    pub fn new(kind: StorageErrorKind) -> Self {
        let location = std::panic::Location::caller();
        Self {
            kind,
            line: location.line(),
            file: location.file(),
        }
    }
}
