//! # Inbound Ports (Driving Ports / API)
//!
//! The verification API consumed by the HTTP layer.

use crate::domain::errors::{AuthError, InitDataError};
use crate::domain::init_data::InitData;
use serde_json::Value;

/// Init-data verification API.
///
/// Implementations must be thread-safe (`Send + Sync`); one instance is
/// shared by every in-flight request.
pub trait InitDataVerifierApi: Send + Sync {
    /// Verify a payload, reporting the reason on failure.
    fn check(&self, init_data: &InitData) -> Result<(), InitDataError>;

    /// Boolean contract: `true` only for an authentic payload.
    fn verify(&self, init_data: &InitData) -> bool {
        self.check(init_data).is_ok()
    }

    /// Verify, then decode the embedded user record.
    ///
    /// The two failure kinds stay distinct: a bad signature is
    /// [`AuthError::Invalid`], a bad `user` field after a good signature is
    /// [`AuthError::Decode`].
    fn authenticate(&self, init_data: &InitData) -> Result<Value, AuthError> {
        self.check(init_data)?;
        Ok(init_data.user()?)
    }

    /// Whether a bot token is configured at all.
    fn is_configured(&self) -> bool;
}
