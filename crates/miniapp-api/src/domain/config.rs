//! Service configuration with validation.
//!
//! Built once at process start from the environment (plus `.env` layers)
//! and shared read-only afterwards.

use miniapp_auth::BotSecret;
use miniapp_telemetry::parse_flag;
use std::env;
use std::net::{IpAddr, Ipv4Addr, SocketAddr};
use std::path::PathBuf;
use std::str::FromStr;
use std::time::Duration;

/// Default WebApp URL when none is configured.
pub const DEFAULT_WEBAPP_URL: &str = "https://your-domain.com";

/// Main service configuration
#[derive(Debug, Clone)]
pub struct ApiConfig {
    /// HTTP server configuration
    pub http: HttpConfig,
    /// Bot token used to verify init data (may be unconfigured)
    pub bot_token: BotSecret,
    /// Public URL the bot opens as the mini app
    pub webapp_url: String,
    /// Reject init data older than this (disabled when `None`)
    pub init_data_max_age: Option<Duration>,
    /// Optional features of the single service variant
    pub features: FeatureConfig,
    /// CORS configuration
    pub cors: CorsConfig,
    /// Request validation limits
    pub limits: LimitsConfig,
}

impl Default for ApiConfig {
    fn default() -> Self {
        Self {
            http: HttpConfig::default(),
            bot_token: BotSecret::default(),
            webapp_url: DEFAULT_WEBAPP_URL.to_string(),
            init_data_max_age: None,
            features: FeatureConfig::default(),
            cors: CorsConfig::default(),
            limits: LimitsConfig::default(),
        }
    }
}

impl ApiConfig {
    /// Load from the process environment; `main` reads `.env` files first.
    ///
    /// # Environment Variables
    ///
    /// - `BOT_TOKEN`: bot token (unset = every init request is rejected)
    /// - `WEBAPP_URL`: public mini app URL (default: https://your-domain.com)
    /// - `API_HOST` / `PORT`: bind address (default: 0.0.0.0:8000)
    /// - `INDEX_PAGE`: HTML file served at `/` (default: JSON status)
    /// - `STATIC_DIR`: directory served under `/static`
    /// - `METRICS_ENABLED`: expose `/metrics` (default: true)
    /// - `CORS_ALLOWED_ORIGINS`: comma separated, `*` for any (default: `*`)
    /// - `MAX_BODY_BYTES`: request body limit (default: 65536)
    /// - `REQUEST_TIMEOUT_SECS`: per-request timeout (default: 10)
    /// - `INIT_DATA_MAX_AGE_SECS`: `auth_date` freshness window (default: disabled)
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|key| env::var(key).ok())
    }

    /// Build from an arbitrary key lookup; `from_env` is this over `std::env`.
    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let defaults = Self::default();
        let non_empty = |key: &str| lookup(key).filter(|v| !v.trim().is_empty());

        let bot_token = non_empty("BOT_TOKEN")
            .map(|v| BotSecret::new(v.trim()))
            .unwrap_or_default();

        let config = Self {
            http: HttpConfig {
                host: parse_or(&lookup, "API_HOST", defaults.http.host)?,
                port: parse_or(&lookup, "PORT", defaults.http.port)?,
                request_timeout: Duration::from_secs(parse_or(
                    &lookup,
                    "REQUEST_TIMEOUT_SECS",
                    defaults.http.request_timeout.as_secs(),
                )?),
            },
            bot_token,
            webapp_url: non_empty("WEBAPP_URL").unwrap_or(defaults.webapp_url),
            init_data_max_age: non_empty("INIT_DATA_MAX_AGE_SECS")
                .map(|v| parse_value::<u64>("INIT_DATA_MAX_AGE_SECS", &v))
                .transpose()?
                .map(Duration::from_secs),
            features: FeatureConfig {
                index_page: non_empty("INDEX_PAGE").map(PathBuf::from),
                static_dir: non_empty("STATIC_DIR").map(PathBuf::from),
                metrics_enabled: non_empty("METRICS_ENABLED")
                    .map(|v| parse_flag(&v))
                    .unwrap_or(defaults.features.metrics_enabled),
            },
            cors: CorsConfig {
                allowed_origins: non_empty("CORS_ALLOWED_ORIGINS")
                    .map(|v| {
                        v.split(',')
                            .map(str::trim)
                            .filter(|o| !o.is_empty())
                            .map(String::from)
                            .collect()
                    })
                    .unwrap_or(defaults.cors.allowed_origins),
                ..defaults.cors
            },
            limits: LimitsConfig {
                max_body_bytes: parse_or(&lookup, "MAX_BODY_BYTES", defaults.limits.max_body_bytes)?,
            },
        };

        config.validate()?;
        Ok(config)
    }

    /// Validate configuration
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.http.port == 0 {
            return Err(ConfigError::Invalid("PORT cannot be 0".into()));
        }

        if self.limits.max_body_bytes == 0 {
            return Err(ConfigError::InvalidLimit(
                "max_body_bytes cannot be 0".into(),
            ));
        }

        if self.http.request_timeout.is_zero() {
            return Err(ConfigError::InvalidTimeout(
                "request timeout cannot be 0".into(),
            ));
        }

        if !(self.webapp_url.starts_with("https://") || self.webapp_url.starts_with("http://")) {
            return Err(ConfigError::Invalid(format!(
                "WEBAPP_URL must be an absolute http(s) URL, got `{}`",
                self.webapp_url
            )));
        }

        if self.cors.allowed_origins.is_empty() {
            return Err(ConfigError::Invalid(
                "CORS_ALLOWED_ORIGINS cannot be empty".into(),
            ));
        }

        Ok(())
    }

    /// Get HTTP server bind address
    pub fn http_addr(&self) -> SocketAddr {
        SocketAddr::new(self.http.host, self.http.port)
    }
}

/// HTTP server configuration
#[derive(Debug, Clone)]
pub struct HttpConfig {
    /// Bind address
    pub host: IpAddr,
    /// Port (default: 8000)
    pub port: u16,
    /// Upper bound on handling a single request
    pub request_timeout: Duration,
}

impl Default for HttpConfig {
    fn default() -> Self {
        Self {
            host: IpAddr::V4(Ipv4Addr::UNSPECIFIED),
            port: 8000,
            request_timeout: Duration::from_secs(10),
        }
    }
}

/// Switches between the full (HTML index, static assets) and minimal
/// (JSON root) flavors of the service.
#[derive(Debug, Clone)]
pub struct FeatureConfig {
    /// HTML file served at `/`; JSON status when `None`
    pub index_page: Option<PathBuf>,
    /// Directory served under `/static`
    pub static_dir: Option<PathBuf>,
    /// Expose counters at `/metrics`
    pub metrics_enabled: bool,
}

impl Default for FeatureConfig {
    fn default() -> Self {
        Self {
            index_page: None,
            static_dir: None,
            metrics_enabled: true,
        }
    }
}

/// CORS configuration
#[derive(Debug, Clone)]
pub struct CorsConfig {
    /// Allowed origins ("*" for all)
    pub allowed_origins: Vec<String>,
    /// Allow credentials
    pub allow_credentials: bool,
    /// Max age for preflight cache
    pub max_age: u64,
}

impl Default for CorsConfig {
    fn default() -> Self {
        Self {
            allowed_origins: vec!["*".to_string()],
            allow_credentials: true,
            max_age: 86400, // 24 hours
        }
    }
}

/// Request limits configuration
#[derive(Debug, Clone)]
pub struct LimitsConfig {
    /// Max request body size in bytes (default: 64KB)
    pub max_body_bytes: usize,
}

impl Default for LimitsConfig {
    fn default() -> Self {
        Self {
            max_body_bytes: 64 * 1024,
        }
    }
}

/// Configuration errors
#[derive(Debug, Clone, thiserror::Error)]
pub enum ConfigError {
    /// A variable is present but cannot be parsed
    #[error("invalid {key}: {reason}")]
    Parse { key: String, reason: String },
    /// Invalid size or count limit
    #[error("invalid limit: {0}")]
    InvalidLimit(String),
    /// Invalid timeout value
    #[error("invalid timeout: {0}")]
    InvalidTimeout(String),
    /// General configuration error
    #[error("invalid configuration: {0}")]
    Invalid(String),
}

fn parse_value<T>(key: &str, raw: &str) -> Result<T, ConfigError>
where
    T: FromStr,
    T::Err: std::fmt::Display,
{
    raw.trim().parse::<T>().map_err(|e| ConfigError::Parse {
        key: key.to_string(),
        reason: e.to_string(),
    })
}

fn parse_or<T, F>(lookup: &F, key: &str, default: T) -> Result<T, ConfigError>
where
    F: Fn(&str) -> Option<String>,
    T: FromStr,
    T::Err: std::fmt::Display,
{
    match lookup(key).filter(|v| !v.trim().is_empty()) {
        Some(raw) => parse_value(key, &raw),
        None => Ok(default),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn lookup_from(pairs: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let map: HashMap<String, String> = pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        move |key| map.get(key).cloned()
    }

    #[test]
    fn test_default_config() {
        let config = ApiConfig::default();
        assert!(config.validate().is_ok());
        assert_eq!(config.http.port, 8000);
        assert_eq!(config.webapp_url, DEFAULT_WEBAPP_URL);
        assert!(!config.bot_token.is_configured());
        assert!(config.init_data_max_age.is_none());
    }

    #[test]
    fn test_from_lookup_reads_values() {
        let config = ApiConfig::from_lookup(lookup_from(&[
            ("BOT_TOKEN", " 123:abc "),
            ("WEBAPP_URL", "https://app.example.com"),
            ("PORT", "9001"),
            ("API_HOST", "127.0.0.1"),
            ("INIT_DATA_MAX_AGE_SECS", "86400"),
            ("CORS_ALLOWED_ORIGINS", "https://a.example, https://b.example"),
            ("METRICS_ENABLED", "false"),
            ("INDEX_PAGE", "templates/index.html"),
        ]))
        .unwrap();

        assert_eq!(config.bot_token, BotSecret::new("123:abc"));
        assert_eq!(config.http_addr().to_string(), "127.0.0.1:9001");
        assert_eq!(config.init_data_max_age, Some(Duration::from_secs(86400)));
        assert_eq!(config.cors.allowed_origins.len(), 2);
        assert!(!config.features.metrics_enabled);
        assert_eq!(
            config.features.index_page,
            Some(PathBuf::from("templates/index.html"))
        );
    }

    #[test]
    fn test_missing_token_is_not_an_error() {
        let config = ApiConfig::from_lookup(lookup_from(&[("BOT_TOKEN", "   ")])).unwrap();
        assert!(!config.bot_token.is_configured());
    }

    #[test]
    fn test_bad_port_reported() {
        let err = ApiConfig::from_lookup(lookup_from(&[("PORT", "eighty")])).unwrap_err();
        assert!(matches!(err, ConfigError::Parse { ref key, .. } if key == "PORT"));

        let err = ApiConfig::from_lookup(lookup_from(&[("PORT", "0")])).unwrap_err();
        assert!(matches!(err, ConfigError::Invalid(_)));
    }

    #[test]
    fn test_relative_webapp_url_rejected() {
        let err =
            ApiConfig::from_lookup(lookup_from(&[("WEBAPP_URL", "your-domain.com")])).unwrap_err();
        assert!(matches!(err, ConfigError::Invalid(_)));
    }

    #[test]
    fn test_zero_limits_rejected() {
        let err = ApiConfig::from_lookup(lookup_from(&[("MAX_BODY_BYTES", "0")])).unwrap_err();
        assert!(matches!(err, ConfigError::InvalidLimit(_)));

        let err =
            ApiConfig::from_lookup(lookup_from(&[("REQUEST_TIMEOUT_SECS", "0")])).unwrap_err();
        assert!(matches!(err, ConfigError::InvalidTimeout(_)));
    }
}
