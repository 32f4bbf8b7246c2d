//! # Mini App Bot
//!
//! Companion bot for the mini app. It long-polls the Bot API and:
//!
//! - `/start`: replies with a button that opens the mini app
//! - `/help`, `/info`: reply with Markdown text
//! - mini app data (`web_app_data`): logs it and acknowledges with a preview
//! - other text: echoes it back; unknown commands are ignored
//!
//! ## Architecture
//!
//! - **Domain** (`domain/`): wire types and pure update routing
//! - **Ports** (`ports.rs`): the [`BotApi`] seam
//! - **Adapters** (`adapters/`): `reqwest` client for the HTTP Bot API
//! - **Service** (`service.rs`): the polling loop

#![warn(clippy::all)]
#![deny(unsafe_code)]

pub mod adapters;
pub mod config;
pub mod domain;
pub mod ports;
pub mod service;

pub use adapters::TelegramBotApi;
pub use config::{BotConfig, ConfigError};
pub use domain::{Action, BotError, Command, Router};
pub use ports::BotApi;
pub use service::BotService;
