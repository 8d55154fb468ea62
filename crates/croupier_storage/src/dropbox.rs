//! Dropbox folder backend.

use crate::DropboxConfig;
use crate::timeout::{bounded, check_status, unavailable};
use async_trait::async_trait;
use croupier_core::{ItemLocator, Materialized, MediaItem};
use croupier_error::{CroupierResult, StorageError, StorageErrorKind};
use croupier_interface::StorageBackend;
use reqwest::Client;
use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};
use std::time::Duration;
use tracing::{debug, info, instrument};

#[derive(Debug, Serialize)]
struct ListFolderArg<'a> {
    path: &'a str,
    recursive: bool,
}

#[derive(Debug, Serialize)]
struct ListFolderContinueArg<'a> {
    cursor: &'a str,
}

#[derive(Debug, Serialize)]
struct TemporaryLinkArg<'a> {
    path: &'a str,
}

#[derive(Debug, Deserialize)]
struct ListFolderResult {
    entries: Vec<Entry>,
    cursor: String,
    has_more: bool,
}

#[derive(Debug, Deserialize)]
struct Entry {
    #[serde(rename = ".tag")]
    tag: String,
    name: String,
    #[serde(default)]
    path_lower: Option<String>,
}

#[derive(Debug, Deserialize)]
struct TemporaryLinkResult {
    link: String,
}

/// Dropbox-backed image folder.
///
/// Items are keyed by Dropbox's `path_lower`, which is stable across
/// listings. Fetching returns a short-lived temporary link rather than bytes.
#[derive(Debug, Clone)]
pub struct DropboxStorage {
    client: Client,
    config: DropboxConfig,
    timeout: Duration,
}

impl DropboxStorage {
    /// Creates a Dropbox backend.
    ///
    /// # Errors
    ///
    /// Returns error if the HTTP client cannot be built.
    pub fn new(config: DropboxConfig, timeout: Duration) -> CroupierResult<Self> {
        debug!(api_url = %config.api_url, "Creating Dropbox storage");
        Ok(Self {
            client: crate::http_client(timeout)?,
            config,
            timeout,
        })
    }

    fn endpoint(&self, route: &str) -> String {
        format!("{}/2/{}", self.config.api_url.trim_end_matches('/'), route)
    }

    async fn rpc<A, R>(&self, route: &str, arg: &A) -> CroupierResult<R>
    where
        A: Serialize + ?Sized + Sync,
        R: DeserializeOwned,
    {
        let response = self
            .client
            .post(self.endpoint(route))
            .bearer_auth(&self.config.access_token)
            .json(arg)
            .send()
            .await
            .map_err(|e| unavailable(route, e))?;

        let response = check_status(route, response).await?;

        response.json::<R>().await.map_err(|e| {
            StorageError::new(StorageErrorKind::InvalidResponse(format!("{}: {}", route, e)))
                .into()
        })
    }

    async fn list_all(&self, folder_path: &str) -> CroupierResult<Vec<MediaItem>> {
        // Dropbox addresses the root folder as the empty string
        let path = folder_path.trim_end_matches('/');

        let mut page: ListFolderResult = self
            .rpc(
                "files/list_folder",
                &ListFolderArg {
                    path,
                    recursive: false,
                },
            )
            .await?;

        let mut items = Vec::new();
        let mut pages = 1;
        loop {
            items.extend(page.entries.into_iter().filter_map(Self::to_item));
            if !page.has_more {
                break;
            }
            page = self
                .rpc(
                    "files/list_folder/continue",
                    &ListFolderContinueArg {
                        cursor: &page.cursor,
                    },
                )
                .await?;
            pages += 1;
        }

        debug!(pages, count = items.len(), "Drained Dropbox folder listing");
        Ok(items)
    }

    fn to_item(entry: Entry) -> Option<MediaItem> {
        if entry.tag != "file" {
            return None;
        }
        let path_lower = entry.path_lower?;
        Some(MediaItem::new(
            entry.name,
            path_lower.clone(),
            ItemLocator::Path(path_lower),
        ))
    }
}

#[async_trait]
impl StorageBackend for DropboxStorage {
    #[instrument(skip(self))]
    async fn list(&self, folder_path: &str) -> CroupierResult<Vec<MediaItem>> {
        let items = bounded("dropbox list", self.timeout, self.list_all(folder_path)).await?;
        info!(count = items.len(), "Listed Dropbox folder");
        Ok(items)
    }

    #[instrument(skip(self, item), fields(key = %item.key()))]
    async fn fetch(&self, item: &MediaItem) -> CroupierResult<Materialized> {
        let path = match item.locator() {
            ItemLocator::Path(path) => path.as_str(),
            other => {
                return Err(StorageError::new(StorageErrorKind::UnsupportedItem(format!(
                    "Dropbox cannot fetch {:?}",
                    other
                )))
                .into());
            }
        };

        let result: TemporaryLinkResult = bounded(
            "dropbox temporary link",
            self.timeout,
            self.rpc("files/get_temporary_link", &TemporaryLinkArg { path }),
        )
        .await?;

        debug!("Obtained temporary link");
        Ok(Materialized::Link(result.link))
    }

    fn provider_name(&self) -> &'static str {
        "dropbox"
    }
}
