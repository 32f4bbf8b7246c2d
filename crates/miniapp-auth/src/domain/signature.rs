//! # Init-Data Signatures
//!
//! Two-step HMAC-SHA256: the bot token is first signed *by* the constant
//! `"WebAppData"` to obtain the derived key, which then signs the
//! check-string. The argument order is fixed by the platform; swapping it
//! breaks every real signature.

use crate::domain::errors::InitDataError;
use crate::domain::init_data::{InitData, MAX_FIELDS, MAX_PAYLOAD_BYTES};
use crate::domain::secret::BotSecret;
use hmac::{Hmac, Mac};
use sha2::Sha256;
use zeroize::Zeroizing;

type HmacSha256 = Hmac<Sha256>;

/// Domain-separation constant used as the HMAC key during derivation.
pub const WEB_APP_DATA_KEY: &[u8] = b"WebAppData";

fn hmac_sha256(key: &[u8], message: &[u8]) -> Result<[u8; 32], InitDataError> {
    let mut mac = HmacSha256::new_from_slice(key)
        .map_err(|e| InitDataError::Crypto(e.to_string()))?;
    mac.update(message);

    let mut out = [0u8; 32];
    out.copy_from_slice(&mac.finalize().into_bytes());
    Ok(out)
}

/// `HMAC_SHA256(key = "WebAppData", message = secret)`.
pub fn derive_secret_key(secret: &BotSecret) -> Result<Zeroizing<[u8; 32]>, InitDataError> {
    if !secret.is_configured() {
        return Err(InitDataError::SecretMissing);
    }
    hmac_sha256(WEB_APP_DATA_KEY, secret.as_bytes()).map(Zeroizing::new)
}

/// Compute the lowercase hex signature the platform would attach to `data`.
///
/// Any existing `hash` field is ignored.
pub fn sign_init_data(data: &InitData, secret: &BotSecret) -> Result<String, InitDataError> {
    let derived_key = derive_secret_key(secret)?;
    let digest = hmac_sha256(derived_key.as_slice(), data.data_check_string().as_bytes())?;
    Ok(hex::encode(digest))
}

/// Verify `data` against `secret`, reporting the reason on failure.
pub fn check_init_data(data: &InitData, secret: &BotSecret) -> Result<(), InitDataError> {
    if !secret.is_configured() {
        return Err(InitDataError::SecretMissing);
    }
    if data.is_empty() {
        return Err(InitDataError::EmptyPayload);
    }

    let bytes = data.byte_len();
    if data.len() > MAX_FIELDS || bytes > MAX_PAYLOAD_BYTES {
        return Err(InitDataError::PayloadTooLarge {
            fields: data.len(),
            bytes,
        });
    }

    let claimed = data.hash().ok_or(InitDataError::MissingHash)?;
    let candidate = sign_init_data(data, secret)?;

    if constant_time_eq(&candidate, claimed) {
        Ok(())
    } else {
        Err(InitDataError::SignatureMismatch)
    }
}

/// Boolean verification contract: every failure collapses to `false`.
pub fn verify_init_data(data: &InitData, secret: &BotSecret) -> bool {
    check_init_data(data, secret).is_ok()
}

/// Constant-time string comparison.
///
/// Both inputs are padded to the longer length with different filler bytes
/// so the comparison does not short-circuit on a length mismatch.
pub fn constant_time_eq(a: &str, b: &str) -> bool {
    use subtle::ConstantTimeEq;

    let max_len = std::cmp::max(a.len(), b.len());

    let mut a_padded = vec![0u8; max_len];
    let mut b_padded = vec![0xFFu8; max_len];

    a_padded[..a.len()].copy_from_slice(a.as_bytes());
    b_padded[..b.len()].copy_from_slice(b.as_bytes());

    let lengths_equal = a.len().ct_eq(&b.len());
    let contents_equal = a_padded.ct_eq(&b_padded);

    (lengths_equal & contents_equal).into()
}
