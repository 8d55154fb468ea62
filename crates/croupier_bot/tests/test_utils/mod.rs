//! Test utilities for Croupier bot tests.
//!
//! In-memory fakes of the pipeline collaborators and a helper that wires them
//! into a [`PostingPipeline`].

#![allow(dead_code)]

use async_trait::async_trait;
use croupier_bot::{PipelineSettings, PostingPipeline};
use croupier_core::{Alias, AliasTable, ItemLocator, Materialized, MediaItem, PostPayload, QueryParser};
use croupier_database::MemoryLedger;
use croupier_error::{CroupierResult, SocialError, SocialErrorKind, StorageError, StorageErrorKind};
use croupier_interface::{ImageHost, Messenger, StorageBackend};
use croupier_selection::SelectionEngine;
use rand::SeedableRng;
use rand::rngs::StdRng;
use std::sync::{Arc, Mutex};

pub const NOT_FOUND_LINK: &str = "https://example.com/not-found.png";
pub const BOT_ID: &str = "bot-1";

/// Storage backend serving a fixed listing.
#[derive(Default)]
pub struct FakeBackend {
    pub items: Vec<MediaItem>,
    pub fail_list: bool,
    pub fail_fetch: bool,
    pub fetched: Mutex<Vec<String>>,
}

impl FakeBackend {
    pub fn with_names(names: &[&str]) -> Self {
        Self {
            items: names
                .iter()
                .map(|name| {
                    let key = format!("/pics/{}", name.to_lowercase());
                    MediaItem::new(*name, key.clone(), ItemLocator::Path(key))
                })
                .collect(),
            ..Self::default()
        }
    }
}

#[async_trait]
impl StorageBackend for FakeBackend {
    async fn list(&self, _folder_path: &str) -> CroupierResult<Vec<MediaItem>> {
        if self.fail_list {
            return Err(StorageError::new(StorageErrorKind::Unavailable("offline".to_string())).into());
        }
        Ok(self.items.clone())
    }

    async fn fetch(&self, item: &MediaItem) -> CroupierResult<Materialized> {
        if self.fail_fetch {
            return Err(StorageError::new(StorageErrorKind::Timeout("fetch".to_string(), 30)).into());
        }
        self.fetched.lock().unwrap().push(item.key().clone());
        Ok(Materialized::Link(format!("https://dl.example.com{}", item.key())))
    }

    fn provider_name(&self) -> &'static str {
        "fake"
    }
}

/// Image host that records uploads.
#[derive(Default)]
pub struct FakeImageHost {
    pub fail: bool,
    pub uploads: Mutex<Vec<Materialized>>,
}

#[async_trait]
impl ImageHost for FakeImageHost {
    async fn upload(&self, content: &Materialized) -> CroupierResult<String> {
        if self.fail {
            return Err(SocialError::new(SocialErrorKind::Upload("rejected".to_string())).into());
        }
        let mut uploads = self.uploads.lock().unwrap();
        uploads.push(content.clone());
        Ok(format!("https://i.groupme.com/{}.jpeg", uploads.len()))
    }
}

/// Messenger that records sends.
#[derive(Default)]
pub struct FakeMessenger {
    pub fail: bool,
    pub sent: Mutex<Vec<PostPayload>>,
}

#[async_trait]
impl Messenger for FakeMessenger {
    async fn send(&self, payload: &PostPayload) -> CroupierResult<()> {
        if self.fail {
            return Err(SocialError::new(SocialErrorKind::Post("bot not found".to_string())).into());
        }
        self.sent.lock().unwrap().push(payload.clone());
        Ok(())
    }
}

/// A pipeline and handles to every fake it uses.
pub struct Harness {
    pub pipeline: PostingPipeline,
    pub backend: Arc<FakeBackend>,
    pub ledger: Arc<MemoryLedger>,
    pub image_host: Arc<FakeImageHost>,
    pub messenger: Arc<FakeMessenger>,
}

impl Harness {
    pub fn new(
        backend: FakeBackend,
        image_host: FakeImageHost,
        messenger: FakeMessenger,
        test_mode: bool,
    ) -> Self {
        let backend = Arc::new(backend);
        let ledger = Arc::new(MemoryLedger::new());
        let image_host = Arc::new(image_host);
        let messenger = Arc::new(messenger);

        let aliases = AliasTable::new(vec![
            Alias::new("kitten", "cat"),
            Alias::new("feline", "cat"),
        ]);
        let parser = QueryParser::new("post", Arc::new(aliases));
        let selection = Arc::new(SelectionEngine::with_rng(
            ledger.clone(),
            StdRng::seed_from_u64(11),
        ));
        let settings = PipelineSettings {
            folder_path: "/pics".to_string(),
            not_found_link: NOT_FOUND_LINK.to_string(),
            bot_id: BOT_ID.to_string(),
            test_mode,
        };

        let pipeline = PostingPipeline::new(
            parser,
            backend.clone(),
            selection,
            image_host.clone(),
            messenger.clone(),
            settings,
        );

        Self {
            pipeline,
            backend,
            ledger,
            image_host,
            messenger,
        }
    }

    /// Default fakes over `dog1.png` and `cat1.png`, sending enabled.
    pub fn standard() -> Self {
        Self::new(
            FakeBackend::with_names(&["dog1.png", "cat1.png"]),
            FakeImageHost::default(),
            FakeMessenger::default(),
            false,
        )
    }
}
