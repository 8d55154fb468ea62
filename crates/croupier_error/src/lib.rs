//! Error types for the Croupier image bot.
//!
//! This crate provides the foundation error types used throughout the Croupier workspace.
//!
//! # Error Hierarchy
//!
//! Errors follow the `ErrorKind` + wrapper struct pattern:
//! - `*ErrorKind` enum defines specific error conditions
//! - `*Error` struct wraps the kind with source location tracking
//! - All constructors use `#[track_caller]` for automatic location capture
//!
//! # Examples
//!
//! ```
//! use croupier_error::{CroupierResult, StorageError, StorageErrorKind};
//!
//! fn list_folder() -> CroupierResult<Vec<String>> {
//!     Err(StorageError::new(StorageErrorKind::Unavailable(
//!         "connection refused".to_string(),
//!     )))?
//! }
//!
//! match list_folder() {
//!     Ok(items) => println!("Got {} items", items.len()),
//!     Err(e) => eprintln!("Error: {}", e),
//! }
//! ```

#![forbid(unsafe_code)]
#![warn(missing_docs)]

mod config;
#[cfg(feature = "database")]
mod database;
mod error;
mod http;
mod parse;
mod social;
mod storage;

pub use config::ConfigError;
#[cfg(feature = "database")]
pub use database::{DatabaseError, DatabaseErrorKind};
pub use error::{CroupierError, CroupierErrorKind, CroupierResult};
pub use http::HttpError;
pub use parse::{ParseError, ParseErrorKind};
pub use social::{SocialError, SocialErrorKind};
pub use storage::{StorageError, StorageErrorKind};
