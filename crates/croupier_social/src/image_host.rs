//! GroupMe image service upload.

use crate::GroupMeConfig;
use async_trait::async_trait;
use croupier_core::Materialized;
use croupier_error::{CroupierResult, SocialError, SocialErrorKind};
use croupier_interface::ImageHost;
use reqwest::Client;
use reqwest::header::CONTENT_TYPE;
use serde::Deserialize;
use tracing::{debug, info, instrument, warn};

const DEFAULT_MIME_TYPE: &str = "image/jpeg";

#[derive(Debug, Deserialize)]
struct UploadResponse {
    payload: Option<UploadPayload>,
}

#[derive(Debug, Deserialize)]
struct UploadPayload {
    url: Option<String>,
}

/// Uploads images to the GroupMe image service.
///
/// Bytes are posted directly. A link is downloaded first and its bytes
/// posted, since the service does not fetch remote URLs itself.
#[derive(Debug, Clone)]
pub struct GroupMeImageHost {
    client: Client,
    config: GroupMeConfig,
}

impl GroupMeImageHost {
    /// Creates an image host client.
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

    async fn download(&self, link: &str) -> CroupierResult<(Vec<u8>, String)> {
        let response = self.client.get(link).send().await.map_err(|e| {
            SocialError::new(SocialErrorKind::Download(format!("{}: {}", link, e)))
        })?;

        let status = response.status();
        if !status.is_success() {
            return Err(SocialError::new(SocialErrorKind::Download(format!(
                "{} returned {}",
                link, status
            )))
            .into());
        }

        let mime_type = response
            .headers()
            .get(CONTENT_TYPE)
            .and_then(|v| v.to_str().ok())
            .unwrap_or(DEFAULT_MIME_TYPE)
            .to_string();
        let bytes = response.bytes().await.map_err(|e| {
            SocialError::new(SocialErrorKind::Download(format!("{}: {}", link, e)))
        })?;

        debug!(size = bytes.len(), mime_type = %mime_type, "Downloaded linked image");
        Ok((bytes.to_vec(), mime_type))
    }

    async fn post_bytes(&self, data: Vec<u8>, mime_type: &str) -> CroupierResult<String> {
        let response = self
            .client
            .post(&self.config.image_url)
            .header("X-Access-Token", &self.config.token)
            .header(CONTENT_TYPE, mime_type)
            .body(data)
            .send()
            .await
            .map_err(|e| SocialError::new(SocialErrorKind::Upload(e.to_string())))?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            warn!(status = %status, body = %body, "Image service rejected upload");
            return Err(SocialError::new(SocialErrorKind::Upload(format!(
                "image service returned {}: {}",
                status, body
            )))
            .into());
        }

        let parsed: UploadResponse = response.json().await.map_err(|e| {
            SocialError::new(SocialErrorKind::InvalidResponse(format!(
                "image service: {}",
                e
            )))
        })?;

        parsed
            .payload
            .and_then(|p| p.url)
            .ok_or_else(|| {
                SocialError::new(SocialErrorKind::Upload(
                    "image service response had no payload.url".to_string(),
                ))
                .into()
            })
    }
}

#[async_trait]
impl ImageHost for GroupMeImageHost {
    #[instrument(skip(self, content), fields(content = %content))]
    async fn upload(&self, content: &Materialized) -> CroupierResult<String> {
        let url = match content {
            Materialized::Bytes { data, mime_type } => {
                let mime_type = mime_type.as_deref().unwrap_or(DEFAULT_MIME_TYPE);
                self.post_bytes(data.clone(), mime_type).await?
            }
            Materialized::Link(link) => {
                let (data, mime_type) = self.download(link).await?;
                self.post_bytes(data, &mime_type).await?
            }
        };

        info!(url = %url, "Uploaded image");
        Ok(url)
    }
}
