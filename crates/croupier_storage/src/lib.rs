//! Remote image folder backends for Croupier.
//!
//! This crate provides the two interchangeable [`StorageBackend`]
//! implementations the posting pipeline can list and fetch images from.
//!
//! # Features
//!
//! - **Dropbox**: direct folder listing, fetch returns a temporary link
//! - **Google Drive**: folder name resolved to an id (cached), listing filtered
//!   to one image MIME type, fetch downloads bytes
//! - **Bounded calls**: every provider call runs under an explicit timeout
//!
//! # Example
//!
//! ```rust,no_run
//! use croupier_storage::{StorageConfig, StorageProvider, build_backend};
//!
//! # async fn example() -> Result<(), Box<dyn std::error::Error>> {
//! let mut config = StorageConfig::default();
//! config.provider = StorageProvider::Dropbox;
//! config.dropbox.access_token = std::env::var("DROPBOX_TOKEN")?;
//!
//! let backend = build_backend(&config)?;
//! let items = backend.list("/pictures").await?;
//! println!("{} images", items.len());
//! # Ok(())
//! # }
//! ```

#![forbid(unsafe_code)]
#![warn(missing_docs)]

mod config;
mod drive;
mod dropbox;
mod timeout;

pub use config::{DriveConfig, DropboxConfig, StorageConfig, StorageProvider};
pub use croupier_error::{StorageError, StorageErrorKind};
pub use croupier_interface::StorageBackend;
pub use drive::DriveStorage;
pub use dropbox::DropboxStorage;

use croupier_error::{ConfigError, CroupierResult};
use std::sync::Arc;
use tracing::info;

/// Build the backend selected by `config.provider`.
///
/// # Errors
///
/// Returns a configuration error if the selected provider has no access token
/// or the HTTP client cannot be built.
pub fn build_backend(config: &StorageConfig) -> CroupierResult<Arc<dyn StorageBackend>> {
    let backend: Arc<dyn StorageBackend> = match config.provider {
        StorageProvider::Dropbox => {
            if config.dropbox.access_token.is_empty() {
                return Err(ConfigError::new("storage.dropbox.access_token is required").into());
            }
            Arc::new(DropboxStorage::new(
                config.dropbox.clone(),
                config.timeout(),
            )?)
        }
        StorageProvider::GoogleDrive => {
            if config.drive.access_token.is_empty() {
                return Err(ConfigError::new("storage.drive.access_token is required").into());
            }
            Arc::new(DriveStorage::new(config.drive.clone(), config.timeout())?)
        }
    };

    info!(provider = backend.provider_name(), "Selected storage backend");
    Ok(backend)
}

/// Shared HTTP client construction for the backends.
pub(crate) fn http_client(timeout: std::time::Duration) -> CroupierResult<reqwest::Client> {
    reqwest::Client::builder()
        .timeout(timeout)
        .build()
        .map_err(|e| ConfigError::new(format!("Failed to build HTTP client: {}", e)).into())
}
