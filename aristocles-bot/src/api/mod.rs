//! HTTP API: Telegram webhook and health check

pub mod health;
pub mod webhook;

pub use health::health_routes;
pub use webhook::webhook_routes;
