//! Ports for the mini app API.

pub mod outbound;

pub use outbound::{MessageSender, SendError};
