//! # Init-Data Verification Service
//!
//! Binds the process-wide bot secret (and an optional freshness window) to
//! the pure domain checks, implementing [`InitDataVerifierApi`].

use crate::domain::errors::InitDataError;
use crate::domain::init_data::InitData;
use crate::domain::secret::BotSecret;
use crate::domain::signature::check_init_data;
use crate::ports::inbound::InitDataVerifierApi;
use crate::ports::outbound::{SystemTimeSource, TimeSource};
use std::sync::atomic::{AtomicBool, Ordering};
use std::time::Duration;
use tracing::{debug, warn};

/// Verifier holding the bot secret for the process lifetime.
pub struct InitDataVerifier<T: TimeSource = SystemTimeSource> {
    secret: BotSecret,
    max_age: Option<Duration>,
    clock: T,
    missing_secret_reported: AtomicBool,
}

impl InitDataVerifier<SystemTimeSource> {
    pub fn new(secret: BotSecret) -> Self {
        Self::with_clock(secret, SystemTimeSource)
    }
}

impl<T: TimeSource> InitDataVerifier<T> {
    pub fn with_clock(secret: BotSecret, clock: T) -> Self {
        let verifier = Self {
            secret,
            max_age: None,
            clock,
            missing_secret_reported: AtomicBool::new(false),
        };
        if !verifier.secret.is_configured() {
            verifier.report_missing_secret();
        }
        verifier
    }

    /// Reject payloads whose `auth_date` is older than `max_age`.
    ///
    /// `None` disables the check, which is the default.
    pub fn with_max_age(mut self, max_age: Option<Duration>) -> Self {
        self.max_age = max_age;
        self
    }

    pub fn max_age(&self) -> Option<Duration> {
        self.max_age
    }

    /// Log the missing secret once per verifier, never per request.
    fn report_missing_secret(&self) {
        if !self.missing_secret_reported.swap(true, Ordering::Relaxed) {
            warn!("bot token not configured; every init-data payload will be rejected");
        }
    }

    fn check_freshness(&self, init_data: &InitData, max_age: Duration) -> Result<(), InitDataError> {
        let raw = init_data.auth_date().ok_or(InitDataError::MissingAuthDate)?;
        let auth_date = raw
            .parse::<u64>()
            .map_err(|_| InitDataError::InvalidAuthDate(raw.to_string()))?;

        let age_secs = self.clock.now().saturating_sub(auth_date);
        let max_age_secs = max_age.as_secs();
        if age_secs > max_age_secs {
            return Err(InitDataError::Expired {
                age_secs,
                max_age_secs,
            });
        }
        Ok(())
    }
}

impl<T: TimeSource> InitDataVerifierApi for InitDataVerifier<T> {
    fn check(&self, init_data: &InitData) -> Result<(), InitDataError> {
        match check_init_data(init_data, &self.secret) {
            Ok(()) => {}
            Err(InitDataError::SecretMissing) => {
                self.report_missing_secret();
                return Err(InitDataError::SecretMissing);
            }
            Err(e) => {
                debug!(reason = %e, fields = init_data.len(), "init data rejected");
                return Err(e);
            }
        }

        if let Some(max_age) = self.max_age {
            self.check_freshness(init_data, max_age).inspect_err(|e| {
                debug!(reason = %e, "init data outside freshness window");
            })?;
        }

        Ok(())
    }

    fn is_configured(&self) -> bool {
        self.secret.is_configured()
    }
}
