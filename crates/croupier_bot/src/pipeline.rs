//! The posting pipeline: one chat command in, one report string out.

use croupier_core::{Materialized, PostPayload, QueryParser};
use croupier_error::{CroupierError, CroupierErrorKind};
use croupier_interface::{ImageHost, Messenger, StorageBackend};
use croupier_selection::SelectionEngine;
use std::sync::Arc;
use tracing::{debug, info, instrument, warn};

/// Stages a command passes through.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, derive_more::Display)]
pub enum PipelineState {
    /// Nothing done yet
    Idle,
    /// Keyword accepted, search extracted
    Parsed,
    /// Folder listed
    Listed,
    /// An image was drawn and recorded
    Selected,
    /// Image content or link obtained
    Materialized,
    /// Image re-hosted, public URL known
    Uploaded,
    /// Message sent (or built, in test mode)
    Posted,
    /// Terminal failure
    Failed,
}

/// Why a command did not result in a post.
#[derive(Debug, Clone, PartialEq, Eq, derive_more::Display)]
pub enum PipelineFailure {
    /// The message did not start with the keyword; carries the guidance text
    #[display("{}", _0)]
    KeywordMissing(String),
    /// Listing or fetching from the storage backend failed
    #[display("Storage backend unavailable: {}", _0)]
    BackendUnavailable(String),
    /// The ledger could not be read or written
    #[display("Ledger failure: {}", _0)]
    Ledger(String),
    /// The image host did not return a URL
    #[display("Upload failed: {}", _0)]
    UploadFailure(String),
    /// The messenger rejected the post
    #[display("Post failed: {}", _0)]
    PostFailure(String),
}

/// Result of one pipeline execution.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PostOutcome {
    /// A message was built and, outside test mode, sent
    Posted {
        /// The message payload
        payload: PostPayload,
        /// True when nothing matched and the fallback image was used
        fallback: bool,
    },
    /// The command stopped early
    Failed(PipelineFailure),
}

impl PostOutcome {
    /// Text reported back to the caller.
    pub fn response_text(&self) -> String {
        match self {
            PostOutcome::Posted {
                payload,
                fallback: false,
            } => format!("Posted: {}", payload),
            PostOutcome::Posted {
                payload,
                fallback: true,
            } => format!("No result found: {}", payload),
            PostOutcome::Failed(failure) => failure.to_string(),
        }
    }

    /// The built payload, if any.
    pub fn payload(&self) -> Option<&PostPayload> {
        match self {
            PostOutcome::Posted { payload, .. } => Some(payload),
            PostOutcome::Failed(_) => None,
        }
    }

    /// Whether the fallback image was posted.
    pub fn is_fallback(&self) -> bool {
        matches!(self, PostOutcome::Posted { fallback: true, .. })
    }
}

impl std::fmt::Display for PostOutcome {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.response_text())
    }
}

/// Values the pipeline needs besides its collaborators.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PipelineSettings {
    /// Remote folder to list
    pub folder_path: String,
    /// Image uploaded when nothing matches
    pub not_found_link: String,
    /// Bot id placed in every payload
    pub bot_id: String,
    /// Build payloads without sending them
    pub test_mode: bool,
}

/// Runs chat commands through parse, list, select, fetch, upload and post.
///
/// Each call is independent. The only shared mutable state lives behind the
/// selection engine's ledger.
pub struct PostingPipeline {
    parser: QueryParser,
    backend: Arc<dyn StorageBackend>,
    selection: Arc<SelectionEngine>,
    image_host: Arc<dyn ImageHost>,
    messenger: Arc<dyn Messenger>,
    settings: PipelineSettings,
}

impl PostingPipeline {
    /// Creates a pipeline from its collaborators.
    pub fn new(
        parser: QueryParser,
        backend: Arc<dyn StorageBackend>,
        selection: Arc<SelectionEngine>,
        image_host: Arc<dyn ImageHost>,
        messenger: Arc<dyn Messenger>,
        settings: PipelineSettings,
    ) -> Self {
        Self {
            parser,
            backend,
            selection,
            image_host,
            messenger,
            settings,
        }
    }

    /// Pipeline settings.
    pub fn settings(&self) -> &PipelineSettings {
        &self.settings
    }

    /// Handle one raw chat message.
    ///
    /// Never fails: every error ends in [`PostOutcome::Failed`].
    #[instrument(skip(self), fields(provider = self.backend.provider_name(), test_mode = self.settings.test_mode))]
    pub async fn handle(&self, text: &str) -> PostOutcome {
        let mut state = PipelineState::Idle;

        let query = match self.parser.parse(text) {
            Ok(query) => query,
            Err(e) => return fail(state, PipelineFailure::KeywordMissing(e.guidance())),
        };
        advance(&mut state, PipelineState::Parsed);

        let items = match self.backend.list(&self.settings.folder_path).await {
            Ok(items) => items,
            Err(e) => return fail(state, PipelineFailure::BackendUnavailable(describe(&e))),
        };
        advance(&mut state, PipelineState::Listed);

        let selected = match self.selection.select(items, &query).await {
            Ok(selected) => selected,
            Err(e) => return fail(state, PipelineFailure::Ledger(describe(&e))),
        };

        let (content, fallback) = match selected {
            Some(item) => {
                advance(&mut state, PipelineState::Selected);
                match self.backend.fetch(&item).await {
                    Ok(content) => (content, false),
                    Err(e) => {
                        return fail(state, PipelineFailure::BackendUnavailable(describe(&e)));
                    }
                }
            }
            None => {
                info!(search = %query, "No match, using fallback image");
                (Materialized::Link(self.settings.not_found_link.clone()), true)
            }
        };
        advance(&mut state, PipelineState::Materialized);

        let url = match self.image_host.upload(&content).await {
            Ok(url) => url,
            Err(e) => return fail(state, PipelineFailure::UploadFailure(describe(&e))),
        };
        advance(&mut state, PipelineState::Uploaded);

        let payload = PostPayload::image(&self.settings.bot_id, url);
        if self.settings.test_mode {
            info!(payload = %payload, "Test mode, not sending");
        } else if let Err(e) = self.messenger.send(&payload).await {
            return fail(state, PipelineFailure::PostFailure(describe(&e)));
        }
        advance(&mut state, PipelineState::Posted);

        PostOutcome::Posted { payload, fallback }
    }
}

impl std::fmt::Debug for PostingPipeline {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("PostingPipeline")
            .field("parser", &self.parser)
            .field("provider", &self.backend.provider_name())
            .field("settings", &self.settings)
            .finish_non_exhaustive()
    }
}

fn advance(state: &mut PipelineState, next: PipelineState) {
    debug!(from = %state, to = %next, "Pipeline transition");
    *state = next;
}

fn fail(state: PipelineState, failure: PipelineFailure) -> PostOutcome {
    warn!(state = %state, reason = %failure, "Pipeline failed");
    debug!(from = %state, to = %PipelineState::Failed, "Pipeline transition");
    PostOutcome::Failed(failure)
}

/// The innermost message of an error, without location decoration.
fn describe(err: &CroupierError) -> String {
    match err.kind() {
        CroupierErrorKind::Storage(e) => e.kind.to_string(),
        CroupierErrorKind::Social(e) => e.kind.to_string(),
        CroupierErrorKind::Database(e) => e.kind.to_string(),
        CroupierErrorKind::Parse(e) => e.kind.to_string(),
        CroupierErrorKind::Config(e) => e.message.clone(),
        CroupierErrorKind::Http(e) => e.message.clone(),
    }
}
