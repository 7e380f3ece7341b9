//! Discogs API client
//!
//! Fetches releases and masters from the Discogs REST API and downloads
//! cover images.
//!
//! # API Reference
//! - Endpoints: `https://api.discogs.com/releases/{id}`, `/masters/{id}`
//! - Auth: `Authorization: Discogs token=<token>`
//! - Rate Limit: 60 authenticated requests per minute
//!
//! Requests are not retried; a failure is reported back to the chat.

use crate::services::{ImageSource, ReleaseSource};
use aristocles_caption::{MasterRecord, ReleaseRecord};
use async_trait::async_trait;
use reqwest::{header, Client, StatusCode};
use serde::de::DeserializeOwned;
use std::sync::Arc;
use std::time::{Duration, Instant};
use thiserror::Error;
use tokio::sync::Mutex;
use tracing::debug;

/// Discogs API base URL
const DISCOGS_API_URL: &str = "https://api.discogs.com";

/// Timeout for API and image requests
const DEFAULT_TIMEOUT: Duration = Duration::from_secs(15);

/// Largest photo Telegram accepts for upload
const MAX_IMAGE_BYTES: usize = 10 * 1024 * 1024;

/// 60 requests per minute for authenticated clients
const RATE_LIMIT_INTERVAL: Duration = Duration::from_millis(1000);

/// Discogs client errors
#[derive(Debug, Error)]
pub enum DiscogsError {
    #[error("Network error: {0}")]
    Network(String),

    #[error("Not found: {0}")]
    NotFound(String),

    #[error("Rate limit exceeded")]
    RateLimited,

    #[error("API error {0}: {1}")]
    Api(u16, String),

    #[error("Parse error: {0}")]
    Parse(String),
}

/// Rate limiter enforcing a minimum interval between requests
struct RateLimiter {
    last_request: Mutex<Option<Instant>>,
    min_interval: Duration,
}

impl RateLimiter {
    fn new(min_interval: Duration) -> Self {
        Self {
            last_request: Mutex::new(None),
            min_interval,
        }
    }

    /// Wait if necessary to comply with rate limit
    async fn wait(&self) {
        let mut last = self.last_request.lock().await;

        if let Some(last_time) = *last {
            let elapsed = last_time.elapsed();
            if elapsed < self.min_interval {
                let wait_time = self.min_interval - elapsed;
                debug!("Rate limiting: waiting {:?}", wait_time);
                tokio::time::sleep(wait_time).await;
            }
        }

        *last = Some(Instant::now());
    }
}

/// Discogs API client
pub struct DiscogsClient {
    http_client: Client,
    base_url: String,
    auth_header: String,
    rate_limiter: Arc<RateLimiter>,
    max_image_bytes: usize,
}

impl DiscogsClient {
    pub fn new(token: &str, user_agent: &str) -> Result<Self, DiscogsError> {
        let http_client = Client::builder()
            .user_agent(user_agent)
            .timeout(DEFAULT_TIMEOUT)
            .build()
            .map_err(|e| DiscogsError::Network(e.to_string()))?;

        Ok(Self {
            http_client,
            base_url: DISCOGS_API_URL.to_string(),
            auth_header: format!("Discogs token={}", token),
            rate_limiter: Arc::new(RateLimiter::new(RATE_LIMIT_INTERVAL)),
            max_image_bytes: MAX_IMAGE_BYTES,
        })
    }

    /// Point the client at another API root (used by tests)
    pub fn with_base_url(mut self, base_url: &str) -> Self {
        self.base_url = base_url.trim_end_matches('/').to_string();
        self
    }

    pub fn with_rate_limit(mut self, min_interval: Duration) -> Self {
        self.rate_limiter = Arc::new(RateLimiter::new(min_interval));
        self
    }

    pub fn with_max_image_bytes(mut self, max_image_bytes: usize) -> Self {
        self.max_image_bytes = max_image_bytes;
        self
    }

    fn image_too_large(&self, uri: &str) -> DiscogsError {
        DiscogsError::Api(
            StatusCode::PAYLOAD_TOO_LARGE.as_u16(),
            format!("image {} exceeds {} bytes", uri, self.max_image_bytes),
        )
    }

    /// GET `{base_url}/{path}` and decode the JSON body
    async fn get_json<T: DeserializeOwned>(&self, path: &str) -> Result<T, DiscogsError> {
        self.rate_limiter.wait().await;

        let url = format!("{}/{}", self.base_url, path);
        debug!(url = %url, "Querying Discogs API");

        let response = self
            .http_client
            .get(&url)
            .header(header::AUTHORIZATION, &self.auth_header)
            .send()
            .await
            .map_err(|e| DiscogsError::Network(e.to_string()))?;

        let status = response.status();

        if status == StatusCode::NOT_FOUND {
            return Err(DiscogsError::NotFound(path.to_string()));
        }

        if status == StatusCode::TOO_MANY_REQUESTS {
            return Err(DiscogsError::RateLimited);
        }

        if !status.is_success() {
            let error_text = response.text().await.unwrap_or_default();
            return Err(DiscogsError::Api(status.as_u16(), error_text));
        }

        response
            .json()
            .await
            .map_err(|e| DiscogsError::Parse(e.to_string()))
    }
}

#[async_trait]
impl ReleaseSource for DiscogsClient {
    async fn fetch_release(&self, id: u64) -> Result<ReleaseRecord, DiscogsError> {
        let release: ReleaseRecord = self.get_json(&format!("releases/{}", id)).await?;

        tracing::info!(
            release_id = id,
            title = %release.title.as_deref().unwrap_or("Unknown"),
            "Retrieved release from Discogs"
        );

        Ok(release)
    }

    async fn fetch_master(&self, id: u64) -> Result<MasterRecord, DiscogsError> {
        let master: MasterRecord = self.get_json(&format!("masters/{}", id)).await?;

        debug!(
            master_id = id,
            main_release = ?master.main_release,
            "Retrieved master from Discogs"
        );

        Ok(master)
    }
}

#[async_trait]
impl ImageSource for DiscogsClient {
    /// Download image bytes; image hosts need no auth and no rate limiting
    ///
    /// Images over the upload limit are refused without reading the rest of
    /// the body.
    async fn fetch_image(&self, uri: &str) -> Result<Vec<u8>, DiscogsError> {
        let mut response = self
            .http_client
            .get(uri)
            .send()
            .await
            .map_err(|e| DiscogsError::Network(e.to_string()))?;

        let status = response.status();
        if !status.is_success() {
            return Err(DiscogsError::Api(status.as_u16(), format!("image {}", uri)));
        }

        if let Some(length) = response.content_length() {
            if length > self.max_image_bytes as u64 {
                return Err(self.image_too_large(uri));
            }
        }

        let mut bytes = Vec::new();
        while let Some(chunk) = response
            .chunk()
            .await
            .map_err(|e| DiscogsError::Network(e.to_string()))?
        {
            if bytes.len() + chunk.len() > self.max_image_bytes {
                return Err(self.image_too_large(uri));
            }
            bytes.extend_from_slice(&chunk);
        }

        debug!(uri = %uri, size = bytes.len(), "Downloaded cover image");
        Ok(bytes)
    }
}
