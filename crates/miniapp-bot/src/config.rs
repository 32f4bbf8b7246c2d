//! Bot configuration.

use miniapp_auth::BotSecret;
use std::env;
use std::time::Duration;

/// Default WebApp URL when none is configured.
pub const DEFAULT_WEBAPP_URL: &str = "https://your-domain.com";

/// Default Bot API endpoint.
pub const DEFAULT_API_BASE_URL: &str = "https://api.telegram.org";

/// Bot configuration
#[derive(Debug, Clone)]
pub struct BotConfig {
    /// Bot token; unconfigured means the bot refuses to start
    pub token: BotSecret,
    /// URL opened by the "Open Mini App" button
    pub webapp_url: String,
    /// Bot API base URL (overridable for tests)
    pub api_base_url: String,
    /// Long-poll timeout passed to `getUpdates`
    pub poll_timeout: Duration,
    /// Fixed pause after a failed poll
    pub error_pause: Duration,
}

impl Default for BotConfig {
    fn default() -> Self {
        Self {
            token: BotSecret::default(),
            webapp_url: DEFAULT_WEBAPP_URL.to_string(),
            api_base_url: DEFAULT_API_BASE_URL.to_string(),
            poll_timeout: Duration::from_secs(30),
            error_pause: Duration::from_secs(5),
        }
    }
}

impl BotConfig {
    /// Load from the process environment; `main` reads `.env` files first.
    ///
    /// # Environment Variables
    ///
    /// - `BOT_TOKEN`: bot token (required to start polling)
    /// - `WEBAPP_URL`: mini app URL (default: https://your-domain.com)
    /// - `BOT_API_BASE_URL`: Bot API endpoint (default: https://api.telegram.org)
    /// - `BOT_POLL_TIMEOUT_SECS`: long-poll timeout (default: 30)
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|key| env::var(key).ok())
    }

    /// Build from an arbitrary key lookup.
    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let defaults = Self::default();
        let non_empty = |key: &str| {
            lookup(key)
                .map(|v| v.trim().to_string())
                .filter(|v| !v.is_empty())
        };

        let poll_timeout = match non_empty("BOT_POLL_TIMEOUT_SECS") {
            Some(raw) => Duration::from_secs(raw.parse().map_err(|_| {
                ConfigError::Invalid(format!("BOT_POLL_TIMEOUT_SECS must be seconds, got `{raw}`"))
            })?),
            None => defaults.poll_timeout,
        };

        let config = Self {
            token: non_empty("BOT_TOKEN").map(BotSecret::new).unwrap_or_default(),
            webapp_url: non_empty("WEBAPP_URL").unwrap_or(defaults.webapp_url),
            api_base_url: non_empty("BOT_API_BASE_URL")
                .map(|url| url.trim_end_matches('/').to_string())
                .unwrap_or(defaults.api_base_url),
            poll_timeout,
            error_pause: defaults.error_pause,
        };

        config.validate()?;
        Ok(config)
    }

    /// Validate configuration
    pub fn validate(&self) -> Result<(), ConfigError> {
        for (key, url) in [
            ("WEBAPP_URL", &self.webapp_url),
            ("BOT_API_BASE_URL", &self.api_base_url),
        ] {
            if !(url.starts_with("https://") || url.starts_with("http://")) {
                return Err(ConfigError::Invalid(format!(
                    "{key} must be an absolute http(s) URL, got `{url}`"
                )));
            }
        }

        if self.poll_timeout > Duration::from_secs(600) {
            return Err(ConfigError::Invalid(
                "BOT_POLL_TIMEOUT_SECS cannot exceed 600".into(),
            ));
        }

        Ok(())
    }
}

/// Configuration errors
#[derive(Debug, Clone, thiserror::Error)]
pub enum ConfigError {
    #[error("invalid configuration: {0}")]
    Invalid(String),
}
