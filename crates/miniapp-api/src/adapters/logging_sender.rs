//! Default [`MessageSender`] that only logs.
//!
//! The HTTP API acknowledges send requests without contacting the
//! messaging platform; real delivery belongs to the bot process.

use crate::ports::outbound::{MessageSender, SendError};
use async_trait::async_trait;
use tracing::info;

#[derive(Debug, Clone, Copy, Default)]
pub struct LoggingMessageSender;

#[async_trait]
impl MessageSender for LoggingMessageSender {
    async fn send_message(&self, chat_id: i64, text: &str) -> Result<(), SendError> {
        info!(chat_id, chars = text.chars().count(), "Message accepted for delivery");
        Ok(())
    }
}
