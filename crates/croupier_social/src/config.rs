//! GroupMe endpoint and credential settings.

use serde::{Deserialize, Serialize};
use std::time::Duration;

/// GroupMe section of the bot configuration.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct GroupMeConfig {
    /// Access token for the image service
    #[serde(default)]
    pub token: String,
    /// Bot id messages are posted as
    #[serde(default)]
    pub bot_id: String,
    /// Image service upload endpoint
    #[serde(default = "default_image_url")]
    pub image_url: String,
    /// Bots API post endpoint
    #[serde(default = "default_post_url")]
    pub post_url: String,
    /// Per-request timeout in seconds
    #[serde(default = "default_timeout_secs")]
    pub timeout_secs: u64,
}

fn default_image_url() -> String {
    "https://image.groupme.com/pictures".to_string()
}

fn default_post_url() -> String {
    "https://api.groupme.com/v3/bots/post".to_string()
}

fn default_timeout_secs() -> u64 {
    30
}

impl Default for GroupMeConfig {
    fn default() -> Self {
        Self {
            token: String::new(),
            bot_id: String::new(),
            image_url: default_image_url(),
            post_url: default_post_url(),
            timeout_secs: default_timeout_secs(),
        }
    }
}

impl GroupMeConfig {
    /// Per-request timeout.
    pub fn timeout(&self) -> Duration {
        Duration::from_secs(self.timeout_secs.max(1))
    }
}
