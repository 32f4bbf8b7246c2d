//! Outbound port to the Bot API.

use crate::domain::{BotError, SendMessage, Update, User};
use async_trait::async_trait;
use std::time::Duration;

/// The Bot API methods the poller needs.
#[async_trait]
pub trait BotApi: Send + Sync {
    /// The bot's own account; its username decides which `/cmd@name` are ours.
    async fn get_me(&self) -> Result<User, BotError>;

    /// Long-poll for updates with `update_id >= offset`.
    async fn get_updates(&self, offset: Option<i64>, timeout: Duration)
        -> Result<Vec<Update>, BotError>;

    async fn send_message(&self, message: &SendMessage) -> Result<(), BotError>;
}
