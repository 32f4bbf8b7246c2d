//! # Integration Tests
//!
//! Cross-crate flows over real sockets.
//!
//! - `api_flows`: `/api/init` accept/reject/decode paths and the auxiliary routes
//! - `bot_flows`: the polling bot against an in-process Bot API

pub mod api_flows;
pub mod bot_flows;
