//! Bot domain: wire types, errors and update routing.

pub mod commands;
pub mod errors;
pub mod types;

pub use commands::{preview, Action, Command, Router};
pub use errors::BotError;
pub use types::*;
