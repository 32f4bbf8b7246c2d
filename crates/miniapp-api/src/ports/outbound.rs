//! Outbound ports for the mini app API.

use async_trait::async_trait;

/// Errors reported by a [`MessageSender`].
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum SendError {
    /// The platform could not be reached
    #[error("transport failure: {0}")]
    Transport(String),
}

/// Delivers a text message to a chat on behalf of the API.
#[async_trait]
pub trait MessageSender: Send + Sync {
    async fn send_message(&self, chat_id: i64, text: &str) -> Result<(), SendError>;
}
