//! Domain types for the mini app API.
//!
//! Configuration, error mapping and the request/response bodies.

pub mod config;
pub mod error;
pub mod types;

// Re-exports for convenience
pub use config::{ApiConfig, ConfigError, CorsConfig, FeatureConfig, HttpConfig, LimitsConfig};
pub use error::{ApiError, ApiResult, GatewayError};
pub use types::*;
