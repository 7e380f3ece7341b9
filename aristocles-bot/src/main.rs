//! aristocles-bot - Discogs caption bot for Telegram
//!
//! Listens for Telegram webhook updates, resolves Discogs release/master
//! links and answers with a credit caption and the cover image.
//!
//! Configuration: command line → environment → TOML → defaults
//! (see `aristocles_common::config`).

use std::net::SocketAddr;
use std::path::PathBuf;
use std::sync::Arc;

use anyhow::{Context, Result};
use aristocles_bot::services::{CaptionPipeline, DiscogsClient, TelegramClient};
use aristocles_bot::{build_router, AppState};
use aristocles_common::config::{
    load_toml_config, resolve_config_path, BotConfig, CliOverrides, DEFAULT_LOG_LEVEL,
};
use clap::Parser;
use tokio::signal;
use tracing::{info, warn};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

/// Command-line arguments for aristocles-bot
#[derive(Parser, Debug)]
#[command(name = "aristocles-bot")]
#[command(about = "Telegram bot turning Discogs links into credit captions")]
#[command(version)]
struct Args {
    /// TOML config file (default: <config dir>/aristocles/config.toml)
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Telegram bot token
    #[arg(long)]
    telegram_bot_token: Option<String>,

    /// Discogs personal access token
    #[arg(long)]
    discogs_token: Option<String>,

    /// User-Agent sent to Discogs
    #[arg(long)]
    user_agent: Option<String>,

    /// Public base URL; when set, the webhook is registered with Telegram
    #[arg(long)]
    base_url: Option<String>,

    /// Address to bind
    #[arg(long)]
    host: Option<String>,

    /// Port to listen on
    #[arg(short, long)]
    port: Option<u16>,

    /// Log level (overridden by RUST_LOG)
    #[arg(long)]
    log_level: Option<String>,
}

impl Args {
    fn overrides(&self) -> CliOverrides {
        CliOverrides {
            telegram_bot_token: self.telegram_bot_token.clone(),
            discogs_token: self.discogs_token.clone(),
            user_agent: self.user_agent.clone(),
            base_url: self.base_url.clone(),
            host: self.host.clone(),
            port: self.port,
        }
    }
}

#[tokio::main]
async fn main() -> Result<()> {
    let args = Args::parse();

    // TOML first: it may carry the log level
    let config_path = resolve_config_path(args.config.as_deref());
    let toml_config =
        load_toml_config(config_path.as_deref()).context("Failed to load config file")?;

    let log_level = args
        .log_level
        .clone()
        .unwrap_or_else(|| toml_config.logging.level.clone());
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .or_else(|_| tracing_subscriber::EnvFilter::try_new(&log_level))
                .unwrap_or_else(|_| DEFAULT_LOG_LEVEL.into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    info!(
        "Starting Aristocles bot v{} [{}] built {} ({})",
        env!("CARGO_PKG_VERSION"),
        env!("GIT_HASH"),
        env!("BUILD_TIMESTAMP"),
        env!("BUILD_PROFILE")
    );

    match &config_path {
        Some(path) => info!("Config file: {}", path.display()),
        None => info!("No config file found; using command line, environment and defaults"),
    }

    let config = BotConfig::resolve(&args.overrides(), &toml_config)?;
    info!(?config, "Configuration resolved");

    let discogs = Arc::new(
        DiscogsClient::new(&config.discogs_token, &config.user_agent)
            .context("Failed to create Discogs client")?,
    );
    let telegram = Arc::new(
        TelegramClient::new(&config.telegram_bot_token)
            .context("Failed to create Telegram client")?,
    );

    match config.webhook_url() {
        Some(url) => {
            telegram
                .set_webhook(&url)
                .await
                .context("Failed to register webhook")?;
            info!(
                "Webhook registered at {}/<token>",
                config.base_url.as_deref().unwrap_or_default()
            );
        }
        None => warn!("BASE_URL not set; webhook not registered (local run)"),
    }

    let pipeline = CaptionPipeline::new(discogs.clone(), discogs, telegram);
    let state = AppState::new(pipeline, &config.telegram_bot_token);
    let app = build_router(state);

    let addr: SocketAddr = format!("{}:{}", config.host, config.port)
        .parse()
        .context("Invalid listen address")?;
    let listener = tokio::net::TcpListener::bind(addr)
        .await
        .context("Failed to bind to address")?;
    info!("Listening on http://{}", addr);
    info!("Health check: http://{}/health", addr);

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await
        .context("Server error")?;

    info!("Server shutdown complete");
    Ok(())
}

/// Graceful shutdown signal handler
async fn shutdown_signal() {
    let ctrl_c = async {
        if let Err(e) = signal::ctrl_c().await {
            warn!("Failed to listen for Ctrl+C: {}", e);
            std::future::pending::<()>().await;
        }
    };

    #[cfg(unix)]
    let terminate = async {
        match signal::unix::signal(signal::unix::SignalKind::terminate()) {
            Ok(mut stream) => {
                stream.recv().await;
            }
            Err(e) => {
                warn!("Failed to install SIGTERM handler: {}", e);
                std::future::pending::<()>().await;
            }
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => info!("Received Ctrl+C, shutting down"),
        _ = terminate => info!("Received SIGTERM, shutting down"),
    }
}
