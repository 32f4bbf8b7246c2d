//! Adapters implementing the outbound ports.

pub mod logging_sender;

pub use logging_sender::LoggingMessageSender;
