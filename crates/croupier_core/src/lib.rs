//! Core data types for the Croupier image bot.
//!
//! This crate provides the types shared by every stage of the posting pipeline:
//! listed media items, materialized images, message payloads, and the command
//! parser that turns chat text into a search query.

#![forbid(unsafe_code)]
#![warn(missing_docs)]

mod alias;
mod media;
mod payload;
mod query;
mod telemetry;

pub use alias::{Alias, AliasTable};
pub use media::{ItemLocator, Materialized, MediaItem};
pub use payload::{Attachment, PostPayload};
pub use query::{QueryParser, SearchQuery, parse_command};
pub use telemetry::{LogFormat, init_tracing};
