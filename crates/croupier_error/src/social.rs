//! Image hosting and messaging error types.

/// Failures talking to the image host or the messaging service.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, derive_more::Display)]
pub enum SocialErrorKind {
    /// Downloading a temporary link before upload failed
    #[display("Download failed: {}", _0)]
    Download(String),
    /// The image host rejected the upload or could not be reached
    #[display("Upload failed: {}", _0)]
    Upload(String),
    /// The messaging service rejected the post or could not be reached
    #[display("Post failed: {}", _0)]
    Post(String),
    /// A response body did not have the expected shape
    #[display("Invalid response: {}", _0)]
    InvalidResponse(String),
}

/// Social error with location tracking.
#[derive(Debug, Clone, derive_more::Display, derive_more::Error)]
#[display("Social Error: {} at line {} in {}", kind, line, file)]
pub struct SocialError {
    /// The kind of error that occurred
    pub kind: SocialErrorKind,
    /// Line number where error was created
    pub line: u32,
    /// File where error was created
    pub file: &'static str,
}

impl SocialError {
    /// Create a new social error with automatic location tracking.
    ///
    /// # Examples
    ///
    /// ```
    /// use croupier_error::{SocialError, SocialErrorKind};
    ///
    /// let err = SocialError::new(SocialErrorKind::Upload("status 500".to_string()));
    /// assert!(format!("{}", err).contains("Upload failed"));
    /// ```
    #[track_caller]
    pub fn new(kind: SocialErrorKind) -> Self {
        let location = std::panic::Location::caller();
        Self {
            kind,
            line: location.line(),
            file: location.file(),
        }
    }
}
