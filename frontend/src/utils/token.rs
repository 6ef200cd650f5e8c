//! Unverified reading of bearer token claims.
//!
//! Only the expiry is inspected, to decide whether a stored session is worth
//! restoring. The signature is never checked here; the backend re-validates
//! the token on every protected call.

use base64::{engine::general_purpose::URL_SAFE_NO_PAD, Engine as _};
use chrono::{DateTime, Utc};
use serde_json::Value;

pub fn decode_claims(token: &str) -> Option<Value> {
    let mut parts = token.split('.');
    parts.next()?;
    let payload = parts.next()?;
    let decoded = URL_SAFE_NO_PAD
        .decode(payload.trim_end_matches('='))
        .ok()?;
    serde_json::from_slice(&decoded).ok()
}

pub fn decode_expiry(token: &str) -> Option<DateTime<Utc>> {
    let claims = decode_claims(token)?;
    let exp = claims.get("exp")?;
    let seconds = exp
        .as_i64()
        .or_else(|| exp.as_f64().map(|value| value.floor() as i64))?;
    DateTime::<Utc>::from_timestamp(seconds, 0)
}

/// A token without a readable `exp` claim counts as expired.
pub fn is_expired(token: &str, now: DateTime<Utc>) -> bool {
    match decode_expiry(token) {
        Some(expires_at) => expires_at <= now,
        None => true,
    }
}
