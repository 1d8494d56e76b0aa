use crate::core::utils::get_timestamp_utc_now;
use base64::{Engine as _, engine::general_purpose::URL_SAFE_NO_PAD};
use serde::Deserialize;

#[derive(Debug, Deserialize)]
struct Claims {
    #[serde(default)]
    exp: Option<u64>,
}

/// A token that cannot be decoded is reported as expired so the caller
/// re-authenticates instead of sending requests with a broken bearer.
pub fn is_expired(token: &str) -> bool {
    match decode_exp(token) {
        Some(None) => false,
        Some(Some(exp)) => match get_timestamp_utc_now() {
            Ok(now) => exp <= now,
            Err(_) => true,
        },
        None => true,
    }
}

/// `None` means the token is malformed; `Some(None)` means it carries no
/// expiry claim at all.
fn decode_exp(token: &str) -> Option<Option<u64>> {
    let segments: Vec<&str> = token.split('.').collect();
    if segments.len() != 3 {
        return None;
    }
    let payload = URL_SAFE_NO_PAD.decode(segments[1]).ok()?;
    let claims: Claims = serde_json::from_slice(&payload).ok()?;
    Some(claims.exp)
}
