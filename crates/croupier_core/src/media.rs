//! Listed media items and materialized image content.

use derive_getters::Getters;
use serde::{Deserialize, Serialize};

/// Backend-specific handle used to fetch an item after it has been listed.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ItemLocator {
    /// Path understood by a path-addressed store (Dropbox)
    Path(String),
    /// Opaque file id understood by an id-addressed store (Google Drive)
    FileId {
        /// Provider file id
        id: String,
        /// MIME type reported by the provider
        mime_type: String,
    },
}

/// One image found in the configured folder.
///
/// Created per listing call and never persisted. `key` is the stable,
/// lowercase path string the ledger uses to remember when the item was shown.
///
/// # Examples
///
/// ```
/// use croupier_core::{ItemLocator, MediaItem};
///
/// let item = MediaItem::new(
///     "Dog1.png",
///     "/pics/dog1.png",
///     ItemLocator::Path("/pics/dog1.png".to_string()),
/// );
/// assert!(item.name_contains("dog"));
/// assert!(!item.name_contains("cat"));
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Hash, Getters, Serialize, Deserialize)]
pub struct MediaItem {
    name: String,
    key: String,
    locator: ItemLocator,
}

impl MediaItem {
    /// Creates a media item.
    pub fn new(name: impl Into<String>, key: impl Into<String>, locator: ItemLocator) -> Self {
        Self {
            name: name.into(),
            key: key.into(),
            locator,
        }
    }

    /// Case-insensitive substring test against the item name.
    pub fn name_contains(&self, token: &str) -> bool {
        self.name.to_lowercase().contains(&token.to_lowercase())
    }
}

/// An item's content ready to hand to the image host.
#[derive(Debug, Clone, PartialEq, Eq, derive_more::Display)]
pub enum Materialized {
    /// Raw image bytes downloaded from the backend
    #[display("{} bytes", data.len())]
    Bytes {
        /// Image content
        data: Vec<u8>,
        /// MIME type, when the backend knows it
        mime_type: Option<String>,
    },
    /// Short-lived link the image host can download from
    #[display("{}", _0)]
    Link(String),
}
