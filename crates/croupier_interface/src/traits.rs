//! Collaborator traits used by the posting pipeline.

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use croupier_core::{Materialized, MediaItem, PostPayload};
use croupier_error::CroupierResult;
use std::collections::HashMap;

/// A remote folder of images.
///
/// Implementations must drain provider pagination in [`list`](Self::list) and
/// give every item a ledger key that is stable across listings.
#[async_trait]
pub trait StorageBackend: Send + Sync {
    /// List every image directly inside `folder_path` (non-recursive).
    ///
    /// An empty folder yields an empty vector, not an error.
    async fn list(&self, folder_path: &str) -> CroupierResult<Vec<MediaItem>>;

    /// Materialize a listed item as bytes or as a temporary link.
    async fn fetch(&self, item: &MediaItem) -> CroupierResult<Materialized>;

    /// Provider name (e.g., "dropbox", "gdrive").
    fn provider_name(&self) -> &'static str;
}

/// Persistent record of when each item was last selected.
#[async_trait]
pub trait LedgerStore: Send + Sync {
    /// Timestamp of the last selection of `path`, if any.
    async fn get(&self, path: &str) -> CroupierResult<Option<DateTime<Utc>>>;

    /// Record that `path` was selected at `posted_at`.
    ///
    /// Creates the record on first selection. An existing record keeps the
    /// later of its stored timestamp and `posted_at`.
    async fn upsert(&self, path: &str, posted_at: DateTime<Utc>) -> CroupierResult<()>;

    /// Timestamps for many paths at once. Paths without a record are absent.
    async fn get_many(&self, paths: &[String]) -> CroupierResult<HashMap<String, DateTime<Utc>>> {
        let mut found = HashMap::with_capacity(paths.len());
        for path in paths {
            if let Some(posted_at) = self.get(path).await? {
                found.insert(path.clone(), posted_at);
            }
        }
        Ok(found)
    }
}

/// Image hosting service that turns content into a public URL.
#[async_trait]
pub trait ImageHost: Send + Sync {
    /// Upload bytes, or the content behind a link, and return the hosted URL.
    async fn upload(&self, content: &Materialized) -> CroupierResult<String>;
}

/// Chat service that delivers a bot message.
#[async_trait]
pub trait Messenger: Send + Sync {
    /// Send `payload`.
    async fn send(&self, payload: &PostPayload) -> CroupierResult<()>;
}
