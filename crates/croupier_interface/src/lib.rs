//! Trait definitions for the Croupier image bot.
//!
//! The posting pipeline talks to four collaborators through these traits:
//! a storage backend that lists and fetches images, a ledger that remembers
//! when each image was last shown, an image host, and a messenger.

#![forbid(unsafe_code)]
#![warn(missing_docs)]

mod traits;

pub use traits::{ImageHost, LedgerStore, Messenger, StorageBackend};
