//! Telegram Bot API update types
//!
//! Only the fields the bot reads are modelled; everything else in the
//! update JSON is ignored.

use serde::{Deserialize, Serialize};

/// Incoming update delivered to the webhook
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct Update {
    pub update_id: i64,
    #[serde(default)]
    pub message: Option<Message>,
    #[serde(default)]
    pub channel_post: Option<Message>,
}

impl Update {
    /// The message this update carries: a chat message or a channel post
    pub fn effective_message(&self) -> Option<&Message> {
        self.message.as_ref().or(self.channel_post.as_ref())
    }
}

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct Message {
    pub message_id: i64,
    pub chat: Chat,
    #[serde(default)]
    pub text: Option<String>,
}

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct Chat {
    pub id: i64,
    /// "private", "group", "supergroup" or "channel"
    #[serde(default, rename = "type")]
    pub kind: Option<String>,
}

/// Name of the bot command a text starts with, lowercased
///
/// `/start`, `/Start@AristoclesBot` and `/start now` all yield "start".
/// Returns `None` for text that is not a command.
pub fn command_name(text: &str) -> Option<String> {
    let token = text.strip_prefix('/')?.split_whitespace().next()?;
    let name = token.split('@').next().unwrap_or_default();
    if name.is_empty() {
        return None;
    }
    Some(name.to_lowercase())
}
