//! # Mini App API
//!
//! HTTP backend for a chat-platform mini app: verifies the init data the
//! client hands over, and serves a handful of echo and status endpoints.
//!
//! ## Architecture
//!
//! ```text
//! Request → CORS → Tracing (request id, metrics) → Timeout → Body limit → Panic boundary
//!                                                             │
//!                              ┌──────────────────────────────┤
//!                              ▼                              ▼
//!                   InitDataVerifierApi              MessageSender port
//!                     (miniapp-auth)            (LoggingMessageSender default)
//! ```
//!
//! ## Routes
//!
//! | Method | Path | Description |
//! |--------|------|-------------|
//! | GET | `/` | Index page, or JSON status |
//! | POST | `/api/init` | Verify init data, return the user |
//! | POST | `/api/send-message` | Hand a message to the sender |
//! | GET | `/api/user-data` | Echo user fields from the query |
//! | GET | `/health` | Health check |
//! | GET | `/api/info` | Route listing |
//! | GET | `/metrics` | Counters (optional) |
//! | GET | `/static/*` | Static assets (optional) |
//!
//! ## Usage
//!
//! ```ignore
//! use miniapp_api::{ApiConfig, MiniAppService};
//!
//! let service = MiniAppService::new(ApiConfig::from_env()?)?;
//! service.serve(async { let _ = tokio::signal::ctrl_c().await; }).await?;
//! ```

#![warn(clippy::all)]
#![deny(unsafe_code)]

pub mod adapters;
pub mod domain;
pub mod handlers;
pub mod middleware;
pub mod ports;
pub mod service;

pub use adapters::LoggingMessageSender;
pub use domain::config::{ApiConfig, ConfigError};
pub use domain::error::{ApiError, ApiResult, GatewayError};
pub use middleware::GatewayMetrics;
pub use ports::{MessageSender, SendError};
pub use service::{AppState, MiniAppService};
