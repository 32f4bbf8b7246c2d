//! # Verification Errors
//!
//! Diagnostic reasons behind a rejected payload. The public verification
//! contract is boolean; these exist so callers can log *why*.

use thiserror::Error;

/// Reasons an init-data payload is not accepted.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum InitDataError {
    /// No bot token is configured, so nothing can be verified
    #[error("bot token is not configured")]
    SecretMissing,

    /// The payload has no fields at all
    #[error("init data is empty")]
    EmptyPayload,

    /// The payload carries no `hash` field
    #[error("init data has no hash field")]
    MissingHash,

    /// Field count or total size exceeds the accepted bounds
    #[error("init data too large: {fields} fields, {bytes} bytes")]
    PayloadTooLarge { fields: usize, bytes: usize },

    /// The raw query string could not be decoded into unique fields
    #[error("malformed init data: {0}")]
    Malformed(String),

    /// The computed signature does not match the claimed one
    #[error("init data signature mismatch")]
    SignatureMismatch,

    /// A freshness window is configured but `auth_date` is absent
    #[error("init data has no auth_date field")]
    MissingAuthDate,

    /// `auth_date` is not a unix timestamp
    #[error("invalid auth_date: {0}")]
    InvalidAuthDate(String),

    /// `auth_date` lies outside the configured freshness window
    #[error("init data expired: age {age_secs}s exceeds {max_age_secs}s")]
    Expired { age_secs: u64, max_age_secs: u64 },

    /// HMAC could not be keyed
    #[error("hmac error: {0}")]
    Crypto(String),
}

/// The embedded `user` field failed to parse after a successful verification.
#[derive(Debug, Error)]
pub enum DecodeError {
    #[error("invalid user JSON: {0}")]
    User(#[from] serde_json::Error),
}

/// Outcome of authenticating a payload and extracting its user.
#[derive(Debug, Error)]
pub enum AuthError {
    /// Verification failed; surfaced as unauthorized
    #[error("authentication failed: {0}")]
    Invalid(#[from] InitDataError),

    /// Verified, but the user record is not valid JSON; surfaced as a server error
    #[error(transparent)]
    Decode(#[from] DecodeError),
}
