//! Adapters implementing [`BotApi`](crate::ports::BotApi).

pub mod telegram;

pub use telegram::TelegramBotApi;
