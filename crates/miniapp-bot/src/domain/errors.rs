//! Bot API error types.

use thiserror::Error;

/// Errors talking to the Bot API
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum BotError {
    /// The request never produced an HTTP response
    #[error("transport error: {0}")]
    Transport(String),

    /// The API answered `ok: false`
    #[error("bot api error {code}: {description}")]
    Api { code: i64, description: String },

    /// The response body did not match the expected shape
    #[error("failed to decode response: {0}")]
    Decode(String),
}
