//! Backend selection and provider settings.

use serde::{Deserialize, Serialize};
use std::time::Duration;

/// Which remote folder provider to use.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize, derive_more::Display,
)]
pub enum StorageProvider {
    /// Dropbox (primary store)
    #[default]
    #[serde(rename = "dropbox")]
    #[display("dropbox")]
    Dropbox,
    /// Google Drive (secondary store)
    #[serde(rename = "gdrive", alias = "googledrive", alias = "google")]
    #[display("gdrive")]
    GoogleDrive,
}

impl std::str::FromStr for StorageProvider {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "dropbox" => Ok(StorageProvider::Dropbox),
            "gdrive" | "googledrive" | "google" => Ok(StorageProvider::GoogleDrive),
            _ => Err(format!("Unknown storage provider: {}", s)),
        }
    }
}

/// Dropbox API settings.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DropboxConfig {
    /// OAuth access token
    #[serde(default)]
    pub access_token: String,
    /// RPC endpoint root
    #[serde(default = "default_dropbox_api_url")]
    pub api_url: String,
}

fn default_dropbox_api_url() -> String {
    "https://api.dropboxapi.com".to_string()
}

impl Default for DropboxConfig {
    fn default() -> Self {
        Self {
            access_token: String::new(),
            api_url: default_dropbox_api_url(),
        }
    }
}

/// Google Drive API settings.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DriveConfig {
    /// OAuth access token for a principal that can read the folder
    #[serde(default)]
    pub access_token: String,
    /// Drive v3 endpoint root
    #[serde(default = "default_drive_api_url")]
    pub api_url: String,
    /// Only children with this MIME type are listed
    #[serde(default = "default_drive_mime_type")]
    pub mime_type: String,
}

fn default_drive_api_url() -> String {
    "https://www.googleapis.com/drive/v3".to_string()
}

fn default_drive_mime_type() -> String {
    "image/jpeg".to_string()
}

impl Default for DriveConfig {
    fn default() -> Self {
        Self {
            access_token: String::new(),
            api_url: default_drive_api_url(),
            mime_type: default_drive_mime_type(),
        }
    }
}

/// Storage section of the bot configuration.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct StorageConfig {
    /// Selected provider
    #[serde(default)]
    pub provider: StorageProvider,
    /// Per-call timeout in seconds
    #[serde(default = "default_timeout_secs")]
    pub timeout_secs: u64,
    /// Dropbox settings
    #[serde(default)]
    pub dropbox: DropboxConfig,
    /// Google Drive settings
    #[serde(default)]
    pub drive: DriveConfig,
}

fn default_timeout_secs() -> u64 {
    30
}

impl Default for StorageConfig {
    fn default() -> Self {
        Self {
            provider: StorageProvider::default(),
            timeout_secs: default_timeout_secs(),
            dropbox: DropboxConfig::default(),
            drive: DriveConfig::default(),
        }
    }
}

impl StorageConfig {
    /// Per-call timeout.
    pub fn timeout(&self) -> Duration {
        Duration::from_secs(self.timeout_secs.max(1))
    }
}
