//! Tests for storage configuration and backend selection.

use croupier_error::CroupierErrorKind;
use croupier_storage::{StorageConfig, StorageProvider, build_backend};
use serde::Deserialize;
use std::time::Duration;

#[derive(Deserialize)]
struct Wrapper {
    storage: StorageConfig,
}

#[test]
fn test_provider_names_parse() {
    assert_eq!("dropbox".parse::<StorageProvider>().unwrap(), StorageProvider::Dropbox);
    assert_eq!("Dropbox".parse::<StorageProvider>().unwrap(), StorageProvider::Dropbox);
    for name in ["gdrive", "googledrive", "google", "GDRIVE"] {
        assert_eq!(name.parse::<StorageProvider>().unwrap(), StorageProvider::GoogleDrive);
    }
    assert!("s3".parse::<StorageProvider>().is_err());
}

#[test]
fn test_provider_display_round_trips_through_from_str() {
    for provider in [StorageProvider::Dropbox, StorageProvider::GoogleDrive] {
        assert_eq!(provider.to_string().parse::<StorageProvider>().unwrap(), provider);
    }
}

#[test]
fn test_defaults_fill_missing_sections() {
    let parsed: Wrapper = serde_json::from_str(r#"{"storage": {"provider": "google"}}"#).unwrap();

    assert_eq!(parsed.storage.provider, StorageProvider::GoogleDrive);
    assert_eq!(parsed.storage.timeout(), Duration::from_secs(30));
    assert_eq!(parsed.storage.drive.mime_type, "image/jpeg");
    assert_eq!(parsed.storage.dropbox.api_url, "https://api.dropboxapi.com");
}

#[test]
fn test_default_provider_is_dropbox() {
    assert_eq!(StorageConfig::default().provider, StorageProvider::Dropbox);
}

#[test]
fn test_build_backend_requires_token() {
    let config = StorageConfig::default();
    let err = build_backend(&config).err().unwrap();
    assert!(matches!(err.kind(), CroupierErrorKind::Config(_)));
}

#[test]
fn test_build_backend_selects_provider() {
    let mut config = StorageConfig::default();
    config.provider = StorageProvider::GoogleDrive;
    config.drive.access_token = "token".to_string();

    let backend = build_backend(&config).unwrap();
    assert_eq!(backend.provider_name(), "gdrive");
}
