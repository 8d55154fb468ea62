//! GroupMe integration for Croupier.
//!
//! Two collaborators of the posting pipeline live here:
//! - [`GroupMeImageHost`] re-hosts an image on the GroupMe image service and
//!   returns the public URL
//! - [`GroupMeMessenger`] sends the bot message carrying that URL

#![forbid(unsafe_code)]
#![warn(missing_docs)]

mod config;
mod image_host;
mod messenger;

pub use config::GroupMeConfig;
pub use croupier_error::{SocialError, SocialErrorKind};
pub use image_host::GroupMeImageHost;
pub use messenger::GroupMeMessenger;

use croupier_error::{ConfigError, CroupierResult};

/// Shared HTTP client construction for the GroupMe collaborators.
pub(crate) fn http_client(config: &GroupMeConfig) -> CroupierResult<reqwest::Client> {
    reqwest::Client::builder()
        .timeout(config.timeout())
        .build()
        .map_err(|e| ConfigError::new(format!("Failed to build HTTP client: {}", e)).into())
}
