//! Message handling: link → Discogs lookup → caption → delivery
//!
//! Every failure ends in a chat reply or a log line; nothing here returns
//! an error to the webhook. Cover art is best effort: when the image cannot
//! be downloaded or the photo is rejected, the caption goes out as text.

use crate::messages::{discogs_error_text, HELP_TEXT, INVALID_URL_TEXT, NO_DATA_TEXT};
use crate::models::{command_name, Update};
use crate::services::{ChatSink, ImageSource, ReleaseSource, TextFormat};
use aristocles_caption::{compose_caption, identify, ReleaseRecord};
use std::sync::Arc;
use tokio::task::JoinHandle;
use tracing::{debug, error, info, warn};

const START_COMMAND: &str = "start";

/// What happened to an update
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Outcome {
    /// No text, or a command the bot does not handle
    Ignored,
    /// `/start` answered with usage text
    Help,
    /// No Discogs link in the text
    Rejected,
    /// Master without a main release
    NoData,
    /// Discogs lookup failed
    FetchFailed,
    /// Caption sent with cover art
    Photo,
    /// Caption sent as plain message
    Text,
    /// Caption could not be delivered at all
    DeliveryFailed,
}

pub struct CaptionPipeline {
    releases: Arc<dyn ReleaseSource>,
    images: Arc<dyn ImageSource>,
    chat: Arc<dyn ChatSink>,
}

impl CaptionPipeline {
    pub fn new(
        releases: Arc<dyn ReleaseSource>,
        images: Arc<dyn ImageSource>,
        chat: Arc<dyn ChatSink>,
    ) -> Self {
        Self {
            releases,
            images,
            chat,
        }
    }

    /// Handle `update` on its own task and log the outcome
    ///
    /// Returns as soon as the task is spawned; await the handle to observe
    /// the outcome.
    pub fn dispatch(self: &Arc<Self>, update: Update) -> JoinHandle<Outcome> {
        let pipeline = Arc::clone(self);
        tokio::spawn(async move {
            let outcome = pipeline.handle_update(&update).await;
            info!(update_id = update.update_id, outcome = ?outcome, "Update handled");
            outcome
        })
    }

    /// Handle one webhook update (chat message or channel post)
    pub async fn handle_update(&self, update: &Update) -> Outcome {
        let Some(message) = update.effective_message() else {
            debug!(update_id = update.update_id, "Update carries no message");
            return Outcome::Ignored;
        };

        let text = message.text.as_deref().unwrap_or_default().trim();
        if text.is_empty() {
            return Outcome::Ignored;
        }

        let chat_id = message.chat.id;
        match command_name(text).as_deref() {
            Some(START_COMMAND) => {
                self.reply(chat_id, HELP_TEXT).await;
                Outcome::Help
            }
            Some(other) => {
                debug!(chat_id, command = other, "Ignoring unsupported command");
                Outcome::Ignored
            }
            None => self.handle_text(chat_id, text).await,
        }
    }

    /// Resolve the Discogs link in `text` and post its caption to `chat_id`
    pub async fn handle_text(&self, chat_id: i64, text: &str) -> Outcome {
        let Some(reference) = identify(text) else {
            debug!(chat_id, "No Discogs link in message");
            self.reply(chat_id, INVALID_URL_TEXT).await;
            return Outcome::Rejected;
        };

        info!(
            chat_id,
            kind = %reference.kind,
            id = reference.id,
            "Resolving Discogs reference"
        );

        let release = match self.releases.resolve(reference).await {
            Ok(Some(release)) => release,
            Ok(None) => {
                warn!(chat_id, kind = %reference.kind, id = reference.id, "Master has no main release");
                self.reply(chat_id, NO_DATA_TEXT).await;
                return Outcome::NoData;
            }
            Err(e) => {
                warn!(
                    chat_id,
                    kind = %reference.kind,
                    id = reference.id,
                    error = %e,
                    "Discogs lookup failed"
                );
                self.reply(chat_id, &discogs_error_text(&e)).await;
                return Outcome::FetchFailed;
            }
        };

        let caption = compose_caption(&release, text);
        self.deliver(chat_id, &release, &caption).await
    }

    /// Photo with caption when the cover is available, text otherwise
    async fn deliver(&self, chat_id: i64, release: &ReleaseRecord, caption: &str) -> Outcome {
        if let Some(uri) = release.cover_image_uri() {
            match self.images.fetch_image(uri).await {
                Ok(photo) => match self.chat.send_photo(chat_id, photo, caption).await {
                    Ok(()) => {
                        info!(chat_id, release_id = ?release.id, "Caption sent with cover");
                        return Outcome::Photo;
                    }
                    Err(e) => {
                        warn!(chat_id, error = %e, "Photo send failed, falling back to text");
                    }
                },
                Err(e) => {
                    warn!(chat_id, uri = %uri, error = %e, "Cover download failed, falling back to text");
                }
            }
        }

        match self
            .chat
            .send_text(chat_id, caption, TextFormat::Markdown)
            .await
        {
            Ok(()) => {
                info!(chat_id, release_id = ?release.id, "Caption sent as text");
                Outcome::Text
            }
            Err(e) => {
                error!(chat_id, error = %e, "Caption delivery failed");
                Outcome::DeliveryFailed
            }
        }
    }

    /// Plain-text reply; failures are logged only
    async fn reply(&self, chat_id: i64, text: &str) {
        if let Err(e) = self.chat.send_text(chat_id, text, TextFormat::Plain).await {
            error!(chat_id, error = %e, "Reply failed");
        }
    }
}
