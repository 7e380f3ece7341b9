//! Test helpers: in-memory fakes for the service seams

#![allow(dead_code)]

use aristocles_bot::services::{
    ChatSink, DiscogsError, ImageSource, ReleaseSource, TelegramError, TextFormat,
};
use aristocles_caption::{MasterRecord, ReleaseRecord};
use async_trait::async_trait;
use serde_json::json;
use std::collections::HashMap;
use std::sync::Mutex;
use std::time::Duration;

/// Release/master store keyed by id; unknown ids are NotFound
#[derive(Default)]
pub struct FakeReleases {
    pub releases: HashMap<u64, ReleaseRecord>,
    pub masters: HashMap<u64, MasterRecord>,
    /// When set, every lookup fails with this status
    pub fail_status: Option<u16>,
}

impl FakeReleases {
    pub fn with_release(mut self, id: u64, release: ReleaseRecord) -> Self {
        self.releases.insert(id, release);
        self
    }

    pub fn with_master(mut self, id: u64, master: MasterRecord) -> Self {
        self.masters.insert(id, master);
        self
    }

    fn check_failure(&self) -> Result<(), DiscogsError> {
        match self.fail_status {
            Some(status) => Err(DiscogsError::Api(status, "upstream unavailable".to_string())),
            None => Ok(()),
        }
    }
}

#[async_trait]
impl ReleaseSource for FakeReleases {
    async fn fetch_release(&self, id: u64) -> Result<ReleaseRecord, DiscogsError> {
        self.check_failure()?;
        self.releases
            .get(&id)
            .cloned()
            .ok_or_else(|| DiscogsError::NotFound(format!("releases/{}", id)))
    }

    async fn fetch_master(&self, id: u64) -> Result<MasterRecord, DiscogsError> {
        self.check_failure()?;
        self.masters
            .get(&id)
            .cloned()
            .ok_or_else(|| DiscogsError::NotFound(format!("masters/{}", id)))
    }
}

/// Image host that either serves fixed bytes or fails
pub struct FakeImages {
    pub available: bool,
    pub requested: Mutex<Vec<String>>,
}

impl FakeImages {
    pub fn serving() -> Self {
        Self {
            available: true,
            requested: Mutex::new(Vec::new()),
        }
    }

    pub fn failing() -> Self {
        Self {
            available: false,
            requested: Mutex::new(Vec::new()),
        }
    }
}

#[async_trait]
impl ImageSource for FakeImages {
    async fn fetch_image(&self, uri: &str) -> Result<Vec<u8>, DiscogsError> {
        self.requested.lock().unwrap().push(uri.to_string());
        if self.available {
            Ok(vec![0xFF, 0xD8, 0xFF])
        } else {
            Err(DiscogsError::Network("connection reset".to_string()))
        }
    }
}

/// Something the bot sent to a chat
#[derive(Debug, Clone, PartialEq)]
pub enum Sent {
    Text {
        chat_id: i64,
        text: String,
        format: TextFormat,
    },
    Photo {
        chat_id: i64,
        caption: String,
        size: usize,
    },
}

/// Chat sink recording every delivery
#[derive(Default)]
pub struct RecordingChat {
    pub sent: Mutex<Vec<Sent>>,
    pub reject_photos: bool,
    pub reject_all: bool,
    /// Added latency for every send
    pub delay: Option<Duration>,
}

impl RecordingChat {
    pub fn rejecting_photos() -> Self {
        Self {
            reject_photos: true,
            ..Self::default()
        }
    }

    pub fn rejecting_all() -> Self {
        Self {
            reject_photos: true,
            reject_all: true,
            ..Self::default()
        }
    }

    pub fn slow(delay: Duration) -> Self {
        Self {
            delay: Some(delay),
            ..Self::default()
        }
    }

    pub fn sent(&self) -> Vec<Sent> {
        self.sent.lock().unwrap().clone()
    }

    /// Poll until `count` deliveries are recorded or `timeout` passes
    pub async fn wait_for(&self, count: usize, timeout: Duration) -> Vec<Sent> {
        let deadline = tokio::time::Instant::now() + timeout;
        loop {
            let sent = self.sent();
            if sent.len() >= count || tokio::time::Instant::now() >= deadline {
                return sent;
            }
            tokio::time::sleep(Duration::from_millis(10)).await;
        }
    }

    async fn pause(&self) {
        if let Some(delay) = self.delay {
            tokio::time::sleep(delay).await;
        }
    }
}

#[async_trait]
impl ChatSink for RecordingChat {
    async fn send_text(
        &self,
        chat_id: i64,
        text: &str,
        format: TextFormat,
    ) -> Result<(), TelegramError> {
        self.pause().await;
        if self.reject_all {
            return Err(TelegramError::Api("chat not found".to_string()));
        }
        self.sent.lock().unwrap().push(Sent::Text {
            chat_id,
            text: text.to_string(),
            format,
        });
        Ok(())
    }

    async fn send_photo(
        &self,
        chat_id: i64,
        photo: Vec<u8>,
        caption: &str,
    ) -> Result<(), TelegramError> {
        self.pause().await;
        if self.reject_photos {
            return Err(TelegramError::Api("caption is too long".to_string()));
        }
        self.sent.lock().unwrap().push(Sent::Photo {
            chat_id,
            caption: caption.to_string(),
            size: photo.len(),
        });
        Ok(())
    }
}

/// Small release with a cover image
pub fn sample_release() -> ReleaseRecord {
    serde_json::from_value(json!({
        "id": 249504,
        "artists": [ { "name": "Rick Astley" } ],
        "title": "Never Gonna Give You Up",
        "year": 1987,
        "genres": ["Electronic", "Pop"],
        "styles": ["Synth-pop"],
        "images": [ { "uri": "https://i.discogs.com/cover.jpg" } ],
        "tracklist": [
            { "title": "Never Gonna Give You Up", "type_": "track" },
            { "title": "Never Gonna Give You Up (Instrumental)", "type_": "track" }
        ],
        "extraartists": [
            { "name": "Stock, Aitken & Waterman", "role": "Producer" },
            { "name": "Phil Harding", "role": "Mixed By" }
        ]
    }))
    .expect("sample release should deserialize")
}

pub const SAMPLE_CAPTION: &str = "🎧 Artist : Rick Astley\n\
     💿 Album : Never Gonna Give You Up\n\
     🎚 Producer : Stock, Aitken & Waterman\n\
     🎛 Sound Engineer : Phil Harding\n\
     📅 Date : 1987 #80s\n\
     #Electronic #Pop #Synthpop";

/// Release without images
pub fn coverless_release() -> ReleaseRecord {
    ReleaseRecord {
        images: None,
        ..sample_release()
    }
}

/// Master pointing at the sample release
pub fn sample_master() -> MasterRecord {
    MasterRecord {
        id: Some(96559),
        main_release: Some(249504),
        ..MasterRecord::default()
    }
}
