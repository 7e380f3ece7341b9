//! Configuration loading and resolution
//!
//! Every setting resolves with the same priority order:
//! 1. Command-line argument (highest priority)
//! 2. Environment variable
//! 3. TOML config file
//! 4. Compiled default (fallback, where one exists)
//!
//! A missing TOML file is not an error. The bot token and the Discogs token
//! have no default and must come from one of the first three tiers.

use crate::{Error, Result};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use tracing::{info, warn};

/// Environment variable pointing at an explicit TOML config file
pub const CONFIG_PATH_ENV: &str = "ARISTOCLES_CONFIG";

pub const TELEGRAM_TOKEN_ENV: &str = "TELEGRAM_BOT_TOKEN";
pub const DISCOGS_TOKEN_ENV: &str = "DISCOGS_TOKEN";
pub const USER_AGENT_ENV: &str = "USER_AGENT";
pub const BASE_URL_ENV: &str = "BASE_URL";
pub const PORT_ENV: &str = "PORT";
pub const HOST_ENV: &str = "ARISTOCLES_HOST";

pub const DEFAULT_USER_AGENT: &str = "RadioAristoclesBot/1.0";
pub const DEFAULT_PORT: u16 = 10000;
pub const DEFAULT_HOST: &str = "0.0.0.0";
pub const DEFAULT_LOG_LEVEL: &str = "info";

/// Bootstrap configuration read from the TOML file
///
/// All fields are optional; absent fields fall through to compiled defaults.
#[derive(Debug, Clone, Default, Deserialize, Serialize, PartialEq)]
pub struct TomlConfig {
    #[serde(default)]
    pub telegram_bot_token: Option<String>,
    #[serde(default)]
    pub discogs_token: Option<String>,
    #[serde(default)]
    pub user_agent: Option<String>,
    /// Public URL the webhook is reachable at (e.g. https://bot.example.com)
    #[serde(default)]
    pub base_url: Option<String>,
    #[serde(default)]
    pub host: Option<String>,
    #[serde(default)]
    pub port: Option<u16>,
    #[serde(default)]
    pub logging: LoggingConfig,
}

/// Logging configuration
#[derive(Debug, Clone, Deserialize, Serialize, PartialEq)]
pub struct LoggingConfig {
    /// Log level (trace, debug, info, warn, error)
    #[serde(default = "default_log_level")]
    pub level: String,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: default_log_level(),
        }
    }
}

fn default_log_level() -> String {
    DEFAULT_LOG_LEVEL.to_string()
}

/// Values supplied on the command line
#[derive(Debug, Clone, Default)]
pub struct CliOverrides {
    pub telegram_bot_token: Option<String>,
    pub discogs_token: Option<String>,
    pub user_agent: Option<String>,
    pub base_url: Option<String>,
    pub host: Option<String>,
    pub port: Option<u16>,
}

/// Fully resolved bot configuration
#[derive(Clone, PartialEq)]
pub struct BotConfig {
    pub telegram_bot_token: String,
    pub discogs_token: String,
    pub user_agent: String,
    pub base_url: Option<String>,
    pub host: String,
    pub port: u16,
}

// Tokens stay out of Debug output so the config can be logged.
impl std::fmt::Debug for BotConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("BotConfig")
            .field("telegram_bot_token", &"<redacted>")
            .field("discogs_token", &"<redacted>")
            .field("user_agent", &self.user_agent)
            .field("base_url", &self.base_url)
            .field("host", &self.host)
            .field("port", &self.port)
            .finish()
    }
}

impl BotConfig {
    /// Resolve every setting from CLI → ENV → TOML → default
    pub fn resolve(cli: &CliOverrides, toml_config: &TomlConfig) -> Result<Self> {
        let telegram_bot_token = resolve_setting(
            "telegram_bot_token",
            cli.telegram_bot_token.clone(),
            TELEGRAM_TOKEN_ENV,
            toml_config.telegram_bot_token.clone(),
        );
        let discogs_token = resolve_setting(
            "discogs_token",
            cli.discogs_token.clone(),
            DISCOGS_TOKEN_ENV,
            toml_config.discogs_token.clone(),
        );

        let mut missing = Vec::new();
        if telegram_bot_token.is_none() {
            missing.push(TELEGRAM_TOKEN_ENV);
        }
        if discogs_token.is_none() {
            missing.push(DISCOGS_TOKEN_ENV);
        }
        let (Some(telegram_bot_token), Some(discogs_token)) = (telegram_bot_token, discogs_token)
        else {
            return Err(Error::Config(format!(
                "Missing required setting(s): {}. Provide each one using:\n\
                 1. Command line: --telegram-bot-token / --discogs-token\n\
                 2. Environment: {}=... / {}=...\n\
                 3. TOML config: telegram_bot_token = \"...\" / discogs_token = \"...\"",
                missing.join(", "),
                TELEGRAM_TOKEN_ENV,
                DISCOGS_TOKEN_ENV,
            )));
        };

        let user_agent = resolve_setting(
            "user_agent",
            cli.user_agent.clone(),
            USER_AGENT_ENV,
            toml_config.user_agent.clone(),
        )
        .unwrap_or_else(|| DEFAULT_USER_AGENT.to_string());

        let base_url = resolve_setting(
            "base_url",
            cli.base_url.clone(),
            BASE_URL_ENV,
            toml_config.base_url.clone(),
        )
        .map(|url| normalize_base_url(&url))
        .transpose()?;

        let host = resolve_setting(
            "host",
            cli.host.clone(),
            HOST_ENV,
            toml_config.host.clone(),
        )
        .unwrap_or_else(|| DEFAULT_HOST.to_string());

        let port = match cli.port {
            Some(port) => port,
            None => match std::env::var(PORT_ENV).ok().filter(|p| is_valid_value(p)) {
                Some(raw) => raw.trim().parse::<u16>().map_err(|_| {
                    Error::InvalidInput(format!("{} must be a port number, got {:?}", PORT_ENV, raw))
                })?,
                None => toml_config.port.unwrap_or(DEFAULT_PORT),
            },
        };

        Ok(Self {
            telegram_bot_token,
            discogs_token,
            user_agent,
            base_url,
            host,
            port,
        })
    }

    /// Webhook URL to register with Telegram, when a public base URL is known
    pub fn webhook_url(&self) -> Option<String> {
        self.base_url
            .as_ref()
            .map(|base| format!("{}/{}", base, self.telegram_bot_token))
    }
}

/// Resolve one string setting, logging which tier supplied it
///
/// Blank values are treated as absent at every tier.
fn resolve_setting(
    name: &str,
    cli_value: Option<String>,
    env_name: &str,
    toml_value: Option<String>,
) -> Option<String> {
    let cli_value = cli_value.filter(|v| is_valid_value(v));
    let env_value = std::env::var(env_name).ok().filter(|v| is_valid_value(v));
    let toml_value = toml_value.filter(|v| is_valid_value(v));

    let sources: Vec<&str> = [
        cli_value.as_ref().map(|_| "command line"),
        env_value.as_ref().map(|_| "environment"),
        toml_value.as_ref().map(|_| "TOML"),
    ]
    .into_iter()
    .flatten()
    .collect();

    if sources.len() > 1 {
        warn!(
            setting = name,
            "Setting found in multiple sources: {}. Using {} (highest priority).",
            sources.join(", "),
            sources[0]
        );
    }
    if let Some(source) = sources.first() {
        info!(setting = name, source = *source, "Setting loaded");
    }

    cli_value.or(env_value).or(toml_value)
}

/// Validate a setting value (non-empty, non-whitespace)
pub fn is_valid_value(value: &str) -> bool {
    !value.trim().is_empty()
}

fn normalize_base_url(url: &str) -> Result<String> {
    let url = url.trim().trim_end_matches('/');
    if !(url.starts_with("https://") || url.starts_with("http://")) {
        return Err(Error::InvalidInput(format!(
            "{} must start with http:// or https://, got {:?}",
            BASE_URL_ENV, url
        )));
    }
    Ok(url.to_string())
}

/// Locate the TOML config file
///
/// Priority: explicit path → `ARISTOCLES_CONFIG` → platform config dir.
/// Returns `None` when no candidate exists; an explicit path is returned
/// as-is so that a typo surfaces as an error when loading.
pub fn resolve_config_path(cli_path: Option<&Path>) -> Option<PathBuf> {
    if let Some(path) = cli_path {
        return Some(path.to_path_buf());
    }

    if let Ok(path) = std::env::var(CONFIG_PATH_ENV) {
        if is_valid_value(&path) {
            return Some(PathBuf::from(path));
        }
    }

    default_config_path().filter(|path| path.exists())
}

/// Platform default: `<config_dir>/aristocles/config.toml`
pub fn default_config_path() -> Option<PathBuf> {
    dirs::config_dir().map(|d| d.join("aristocles").join("config.toml"))
}

/// Load the TOML config file
///
/// `None` yields defaults. A path that does not exist yields defaults with a
/// warning; a file that exists but fails to parse is an error.
pub fn load_toml_config(path: Option<&Path>) -> Result<TomlConfig> {
    let Some(path) = path else {
        return Ok(TomlConfig::default());
    };

    if !path.exists() {
        warn!("Config file not found: {} (using defaults)", path.display());
        return Ok(TomlConfig::default());
    }

    let content = std::fs::read_to_string(path)?;
    toml::from_str(&content)
        .map_err(|e| Error::Config(format!("Parse TOML failed ({}): {}", path.display(), e)))
}
