//! # Mini App Init-Data Verification
//!
//! Decides whether a payload handed to the mini app by the chat-platform
//! client was signed by the platform backend that holds the bot token.
//!
//! ## Architecture
//!
//! - **Domain Layer** (`domain/`): pure canonicalization and HMAC logic, no I/O
//! - **Ports Layer** (`ports/`): the verifier API and the clock it depends on
//! - **Service Layer** (`service.rs`): binds a configured secret to the domain logic
//!
//! ## Signature Scheme
//!
//! ```text
//! check_string = sorted("key=value" for every field except "hash").join("\n")
//! derived_key  = HMAC_SHA256(key = "WebAppData", message = bot_token)
//! hash         = hex(HMAC_SHA256(key = derived_key, message = check_string))
//! ```
//!
//! ## Security Notes
//!
//! - **Fail closed**: an unset bot token rejects every payload
//! - **Constant time**: the claimed hash is compared with `subtle`
//! - **No panics**: malformed input always ends in a rejection

#![warn(clippy::all)]
#![deny(unsafe_code)]

pub mod domain;
pub mod ports;
pub mod service;

pub use domain::errors::{AuthError, DecodeError, InitDataError};
pub use domain::init_data::{InitData, InitDataInput, AUTH_DATE_KEY, HASH_KEY, USER_KEY};
pub use domain::secret::BotSecret;
pub use domain::signature::{
    check_init_data, constant_time_eq, derive_secret_key, sign_init_data, verify_init_data,
};
pub use ports::inbound::InitDataVerifierApi;
pub use ports::outbound::{SystemTimeSource, TimeSource};
pub use service::InitDataVerifier;
