//! # Bot Secret
//!
//! The bot token, held for the process lifetime and wiped on drop.

use std::fmt;
use zeroize::{Zeroize, ZeroizeOnDrop};

/// Bot token used as the HMAC root secret.
///
/// An empty secret is a legal value meaning "not configured"; verification
/// against it always fails.
#[derive(Clone, Default, PartialEq, Eq, Zeroize, ZeroizeOnDrop)]
pub struct BotSecret(Vec<u8>);

impl BotSecret {
    pub fn new(token: impl Into<Vec<u8>>) -> Self {
        Self(token.into())
    }

    /// Read the token from an environment variable.
    ///
    /// Unset, non-unicode, or blank values produce an unconfigured secret.
    pub fn from_env(var: &str) -> Self {
        match std::env::var(var) {
            Ok(value) => Self::new(value.trim()),
            Err(_) => Self::default(),
        }
    }

    pub fn is_configured(&self) -> bool {
        !self.0.is_empty()
    }

    pub fn as_bytes(&self) -> &[u8] {
        &self.0
    }
}

impl fmt::Debug for BotSecret {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("BotSecret")
            .field("configured", &self.is_configured())
            .finish_non_exhaustive()
    }
}
