//! Telegram webhook endpoint
//!
//! Telegram POSTs each update to `/<bot token>`. The token in the path is
//! the only authentication, so any other path segment is answered with 404.
//! Once an update parses it is handed to the pipeline on a separate task and
//! answered with 200 at once, so Telegram does not redeliver it while Discogs
//! or the photo upload is slow.

use axum::{
    body::Bytes,
    extract::{Path, State},
    routing::post,
    Json, Router,
};
use serde::Serialize;
use tracing::debug;

use crate::error::{ApiError, ApiResult};
use crate::models::Update;
use crate::AppState;

#[derive(Debug, Serialize)]
pub struct WebhookAck {
    pub ok: bool,
}

/// POST /:token
pub async fn receive_update(
    State(state): State<AppState>,
    Path(token): Path<String>,
    body: Bytes,
) -> ApiResult<Json<WebhookAck>> {
    if token != *state.webhook_token {
        return Err(ApiError::NotFound("Unknown webhook path".to_string()));
    }

    let update: Update = serde_json::from_slice(&body)
        .map_err(|e| ApiError::BadRequest(format!("Malformed update: {}", e)))?;

    debug!(update_id = update.update_id, "Update queued");
    state.pipeline.dispatch(update);

    Ok(Json(WebhookAck { ok: true }))
}

/// Build webhook routes
pub fn webhook_routes() -> Router<AppState> {
    Router::new().route("/:token", post(receive_update))
}
