//! Croupier: a chat-command image bot.
//!
//! A chat message such as `post black dog` is parsed into a search, matching
//! images are listed from a Dropbox or Google Drive folder, one is drawn with
//! a bias toward images not shown recently, re-hosted on the GroupMe image
//! service and posted back to the group.
//!
//! This crate holds the configuration layer, the [`PostingPipeline`] that
//! drives one command end to end, the axum callback server, and the wiring
//! used by the `croupier` binary.

#![forbid(unsafe_code)]
#![warn(missing_docs)]

mod app;
mod config;
mod pipeline;
mod server;

pub use app::{build_pipeline, merge_aliases, open_database};
pub use config::{CroupierConfig, DatabaseConfig, LedgerKind, ServerConfig};
pub use pipeline::{PipelineFailure, PipelineSettings, PipelineState, PostOutcome, PostingPipeline};
pub use server::{IncomingMessage, ServerState, create_router, serve};
