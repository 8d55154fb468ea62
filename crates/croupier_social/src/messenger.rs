//! GroupMe bots API.

use crate::GroupMeConfig;
use async_trait::async_trait;
use croupier_core::PostPayload;
use croupier_error::{CroupierResult, SocialError, SocialErrorKind};
use croupier_interface::Messenger;
use reqwest::Client;
use tracing::{info, instrument, warn};

/// Posts bot messages through the GroupMe bots API.
#[derive(Debug, Clone)]
pub struct GroupMeMessenger {
    client: Client,
    config: GroupMeConfig,
}

impl GroupMeMessenger {
    /// Creates a messenger.
    ///
    /// # Errors
    ///
    /// Returns error if the HTTP client cannot be built.
    pub fn new(config: GroupMeConfig) -> CroupierResult<Self> {
        Ok(Self {
            client: crate::http_client(&config)?,
            config,
        })
    }
}

#[async_trait]
impl Messenger for GroupMeMessenger {
    #[instrument(skip(self, payload), fields(bot_id = %payload.bot_id))]
    async fn send(&self, payload: &PostPayload) -> CroupierResult<()> {
        let response = self
            .client
            .post(&self.config.post_url)
            .json(payload)
            .send()
            .await
            .map_err(|e| SocialError::new(SocialErrorKind::Post(e.to_string())))?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            warn!(status = %status, body = %body, "Bots API rejected post");
            return Err(SocialError::new(SocialErrorKind::Post(format!(
                "bots API returned {}: {}",
                status, body
            )))
            .into());
        }

        info!("Posted message");
        Ok(())
    }
}
