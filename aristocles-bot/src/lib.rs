//! aristocles-bot library interface
//!
//! Telegram bot that answers Discogs links with a credit caption and the
//! release cover. Exposes the router and services for integration testing.

pub mod api;
pub mod error;
pub mod messages;
pub mod models;
pub mod services;

pub use crate::error::{ApiError, ApiResult};

use axum::{body::Body, http::Request, Router};
use chrono::{DateTime, Utc};
use services::CaptionPipeline;
use std::sync::Arc;
use tower_http::trace::TraceLayer;

/// Application state shared across handlers
#[derive(Clone)]
pub struct AppState {
    /// Link → caption → delivery pipeline
    pub pipeline: Arc<CaptionPipeline>,
    /// Bot token; doubles as the secret webhook path segment
    pub webhook_token: Arc<str>,
    /// Service startup timestamp for uptime tracking
    pub startup_time: DateTime<Utc>,
}

impl AppState {
    pub fn new(pipeline: CaptionPipeline, webhook_token: &str) -> Self {
        Self {
            pipeline: Arc::new(pipeline),
            webhook_token: Arc::from(webhook_token),
            startup_time: Utc::now(),
        }
    }
}

/// Build application router
///
/// Request spans record the method only: the webhook path is the bot token.
pub fn build_router(state: AppState) -> Router {
    Router::new()
        .merge(api::health_routes())
        .merge(api::webhook_routes())
        .layer(
            TraceLayer::new_for_http().make_span_with(|request: &Request<Body>| {
                tracing::info_span!("http", method = %request.method())
            }),
        )
        .with_state(state)
}
