//! Service layer: Discogs lookups, Telegram delivery and the caption pipeline
//!
//! The traits below are the seams between the pipeline and the outside
//! world. Production wiring uses [`DiscogsClient`] and [`TelegramClient`];
//! tests plug in in-memory fakes.

pub mod caption_pipeline;
pub mod discogs_client;
pub mod telegram_client;

pub use caption_pipeline::{CaptionPipeline, Outcome};
pub use discogs_client::{DiscogsClient, DiscogsError};
pub use telegram_client::{TelegramClient, TelegramError};

use aristocles_caption::master::main_release_id;
use aristocles_caption::{DiscogsRef, EntityKind, MasterRecord, ReleaseRecord};
use async_trait::async_trait;
use tracing::info;

/// Source of Discogs records
#[async_trait]
pub trait ReleaseSource: Send + Sync {
    async fn fetch_release(&self, id: u64) -> Result<ReleaseRecord, DiscogsError>;

    async fn fetch_master(&self, id: u64) -> Result<MasterRecord, DiscogsError>;

    /// Fetch the release a reference points at
    ///
    /// A master is followed to its main release. `Ok(None)` means the master
    /// has no main release.
    async fn resolve(&self, reference: DiscogsRef) -> Result<Option<ReleaseRecord>, DiscogsError> {
        match reference.kind {
            EntityKind::Release => self.fetch_release(reference.id).await.map(Some),
            EntityKind::Master => {
                let master = self.fetch_master(reference.id).await?;
                match main_release_id(&master) {
                    Some(release_id) => {
                        info!(
                            master_id = reference.id,
                            release_id, "Following master to main release"
                        );
                        self.fetch_release(release_id).await.map(Some)
                    }
                    None => Ok(None),
                }
            }
        }
    }
}

/// Source of cover image bytes
#[async_trait]
pub trait ImageSource: Send + Sync {
    async fn fetch_image(&self, uri: &str) -> Result<Vec<u8>, DiscogsError>;
}

/// How Telegram should interpret message text
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TextFormat {
    Plain,
    Markdown,
}

impl TextFormat {
    pub fn parse_mode(&self) -> Option<&'static str> {
        match self {
            TextFormat::Plain => None,
            TextFormat::Markdown => Some("Markdown"),
        }
    }
}

/// Destination for bot replies
#[async_trait]
pub trait ChatSink: Send + Sync {
    async fn send_text(
        &self,
        chat_id: i64,
        text: &str,
        format: TextFormat,
    ) -> Result<(), TelegramError>;

    /// Send a photo with a Markdown caption
    async fn send_photo(
        &self,
        chat_id: i64,
        photo: Vec<u8>,
        caption: &str,
    ) -> Result<(), TelegramError>;
}
