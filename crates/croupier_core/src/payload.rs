//! Message payload sent to the chat service.

use serde::{Deserialize, Serialize};

/// One attachment in a bot message.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Attachment {
    /// Attachment type; always `image` for this bot
    #[serde(rename = "type")]
    pub kind: String,
    /// Publicly retrievable URL of the hosted image
    pub url: String,
}

/// Body of a bot post: an image attachment addressed to a bot id.
///
/// # Examples
///
/// ```
/// use croupier_core::PostPayload;
///
/// let payload = PostPayload::image("bot-1", "https://i.groupme.com/abc");
/// let json = serde_json::to_value(&payload).unwrap();
/// assert_eq!(json["bot_id"], "bot-1");
/// assert_eq!(json["attachments"][0]["type"], "image");
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct PostPayload {
    /// Target bot id
    pub bot_id: String,
    /// Message attachments
    pub attachments: Vec<Attachment>,
}

impl PostPayload {
    /// Builds a payload carrying a single image attachment.
    pub fn image(bot_id: impl Into<String>, url: impl Into<String>) -> Self {
        Self {
            bot_id: bot_id.into(),
            attachments: vec![Attachment {
                kind: "image".to_string(),
                url: url.into(),
            }],
        }
    }

    /// URL of the first image attachment.
    pub fn image_url(&self) -> Option<&str> {
        self.attachments
            .iter()
            .find(|a| a.kind == "image")
            .map(|a| a.url.as_str())
    }
}

impl std::fmt::Display for PostPayload {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match serde_json::to_string(self) {
            Ok(json) => write!(f, "{}", json),
            Err(_) => write!(f, "{:?}", self),
        }
    }
}
