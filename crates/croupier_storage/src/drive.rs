//! Google Drive folder backend.

use crate::DriveConfig;
use crate::timeout::{bounded, check_status, unavailable};
use async_trait::async_trait;
use croupier_core::{ItemLocator, Materialized, MediaItem};
use croupier_error::{CroupierResult, StorageError, StorageErrorKind};
use croupier_interface::StorageBackend;
use parking_lot::Mutex;
use reqwest::Client;
use serde::Deserialize;
use serde::de::DeserializeOwned;
use std::collections::HashMap;
use std::time::Duration;
use tracing::{debug, info, instrument, warn};

const FOLDER_MIME_TYPE: &str = "application/vnd.google-apps.folder";
const PAGE_SIZE: &str = "1000";

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct FileList {
    #[serde(default)]
    files: Vec<DriveFile>,
    #[serde(default)]
    next_page_token: Option<String>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct DriveFile {
    id: Option<String>,
    name: Option<String>,
    mime_type: Option<String>,
}

/// Google Drive-backed image folder.
///
/// The configured folder path is resolved segment by segment to a folder id,
/// which is cached for the lifetime of the backend. Listings only include
/// children of the configured MIME type. Items are keyed by their lowercase
/// `<folder>/<name>` path. Fetching downloads the file content.
#[derive(Debug)]
pub struct DriveStorage {
    client: Client,
    config: DriveConfig,
    timeout: Duration,
    folder_ids: Mutex<HashMap<String, String>>,
}

impl DriveStorage {
    /// Creates a Google Drive backend.
    ///
    /// # Errors
    ///
    /// Returns error if the HTTP client cannot be built.
    pub fn new(config: DriveConfig, timeout: Duration) -> CroupierResult<Self> {
        debug!(api_url = %config.api_url, mime_type = %config.mime_type, "Creating Drive storage");
        Ok(Self {
            client: crate::http_client(timeout)?,
            config,
            timeout,
            folder_ids: Mutex::new(HashMap::new()),
        })
    }

    fn endpoint(&self, route: &str) -> String {
        format!("{}/{}", self.config.api_url.trim_end_matches('/'), route)
    }

    async fn get_json<R: DeserializeOwned>(
        &self,
        context: &str,
        query: &[(&str, &str)],
    ) -> CroupierResult<R> {
        let response = self
            .client
            .get(self.endpoint("files"))
            .bearer_auth(&self.config.access_token)
            .query(query)
            .send()
            .await
            .map_err(|e| unavailable(context, e))?;

        let response = check_status(context, response).await?;

        response.json::<R>().await.map_err(|e| {
            StorageError::new(StorageErrorKind::InvalidResponse(format!("{}: {}", context, e)))
                .into()
        })
    }

    /// Resolve `folder_path` to a Drive folder id, consulting the cache first.
    async fn resolve_folder(&self, folder_path: &str) -> CroupierResult<String> {
        let normalized = normalize_folder(folder_path);
        if let Some(id) = self.folder_ids.lock().get(&normalized) {
            return Ok(id.clone());
        }

        let mut parent: Option<String> = None;
        for segment in normalized.split('/').filter(|s| !s.is_empty()) {
            let mut q = format!(
                "name = '{}' and mimeType = '{}' and trashed = false",
                escape_query(segment),
                FOLDER_MIME_TYPE
            );
            if let Some(parent_id) = &parent {
                q.push_str(&format!(" and '{}' in parents", escape_query(parent_id)));
            }

            let list: FileList = self
                .get_json(
                    "drive folder lookup",
                    &[("q", q.as_str()), ("fields", "files(id, name)")],
                )
                .await?;

            if list.files.len() > 1 {
                warn!(segment, matches = list.files.len(), "Ambiguous folder name, using first match");
            }
            let id = list
                .files
                .into_iter()
                .find_map(|f| f.id)
                .ok_or_else(|| {
                    StorageError::new(StorageErrorKind::FolderNotFound(normalized.clone()))
                })?;
            parent = Some(id);
        }

        // An empty path addresses the drive root.
        let id = parent.unwrap_or_else(|| "root".to_string());

        debug!(folder = %normalized, id = %id, "Resolved Drive folder");
        self.folder_ids.lock().insert(normalized, id.clone());
        Ok(id)
    }

    async fn list_all(&self, folder_path: &str) -> CroupierResult<Vec<MediaItem>> {
        let folder_id = self.resolve_folder(folder_path).await?;
        let folder = normalize_folder(folder_path);
        let q = format!(
            "'{}' in parents and mimeType = '{}' and trashed = false",
            escape_query(&folder_id),
            escape_query(&self.config.mime_type)
        );

        let mut items = Vec::new();
        let mut skipped = 0usize;
        let mut page_token: Option<String> = None;
        loop {
            let mut query = vec![
                ("q", q.as_str()),
                ("fields", "nextPageToken, files(id, name, mimeType)"),
                ("pageSize", PAGE_SIZE),
            ];
            if let Some(token) = page_token.as_deref() {
                query.push(("pageToken", token));
            }

            let page: FileList = self.get_json("drive list", &query).await?;
            for file in page.files {
                match file {
                    DriveFile {
                        id: Some(id),
                        name: Some(name),
                        mime_type,
                    } => {
                        let key = item_key(&folder, &name);
                        let mime_type = mime_type.unwrap_or_else(|| self.config.mime_type.clone());
                        items.push(MediaItem::new(name, key, ItemLocator::FileId { id, mime_type }));
                    }
                    _ => skipped += 1,
                }
            }

            match page.next_page_token {
                Some(token) => page_token = Some(token),
                None => break,
            }
        }

        if skipped > 0 {
            warn!(skipped, "Unable to verify some Drive files");
        }
        Ok(items)
    }

    async fn download(&self, id: &str) -> CroupierResult<Vec<u8>> {
        let response = self
            .client
            .get(self.endpoint(&format!("files/{}", id)))
            .bearer_auth(&self.config.access_token)
            .query(&[("alt", "media")])
            .send()
            .await
            .map_err(|e| unavailable("drive download", e))?;

        let response = check_status("drive download", response).await?;
        let bytes = response
            .bytes()
            .await
            .map_err(|e| unavailable("drive download body", e))?;
        Ok(bytes.to_vec())
    }
}

#[async_trait]
impl StorageBackend for DriveStorage {
    #[instrument(skip(self))]
    async fn list(&self, folder_path: &str) -> CroupierResult<Vec<MediaItem>> {
        let items = bounded("drive list", self.timeout, self.list_all(folder_path)).await?;
        info!(count = items.len(), "Listed Drive folder");
        Ok(items)
    }

    #[instrument(skip(self, item), fields(key = %item.key()))]
    async fn fetch(&self, item: &MediaItem) -> CroupierResult<Materialized> {
        let (id, mime_type) = match item.locator() {
            ItemLocator::FileId { id, mime_type } => (id, mime_type),
            other => {
                return Err(StorageError::new(StorageErrorKind::UnsupportedItem(format!(
                    "Drive cannot fetch {:?}",
                    other
                )))
                .into());
            }
        };

        let data = bounded("drive download", self.timeout, self.download(id)).await?;
        debug!(size = data.len(), "Downloaded Drive file");
        Ok(Materialized::Bytes {
            data,
            mime_type: Some(mime_type.clone()),
        })
    }

    fn provider_name(&self) -> &'static str {
        "gdrive"
    }
}

/// `/a/b/` and `a/b` both become `/a/b`.
fn normalize_folder(folder_path: &str) -> String {
    let trimmed = folder_path.trim_matches('/');
    format!("/{}", trimmed)
}

/// Lowercased ledger key for `name` inside a normalized folder.
fn item_key(folder: &str, name: &str) -> String {
    format!("{}/{}", folder.trim_end_matches('/'), name).to_lowercase()
}

/// Escape a value for use inside a single-quoted Drive query string.
fn escape_query(value: &str) -> String {
    value.replace('\\', "\\\\").replace('\'', "\\'")
}
