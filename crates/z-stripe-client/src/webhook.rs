//! Webhook signature verification.
//!
//! Stripe signs each webhook delivery with the endpoint secret. The
//! `Stripe-Signature` header carries `t=<unix time>` and one or more
//! `v1=<hex HMAC-SHA256 of "t.payload">` entries.

use std::time::Duration;

use hmac::{Hmac, Mac};
use sha2::Sha256;
use z_stripe_core::Event;

use crate::error::ClientError;

type HmacSha256 = Hmac<Sha256>;

/// Maximum accepted age of a signed delivery.
pub const DEFAULT_TOLERANCE: Duration = Duration::from_secs(300);

/// Verify a delivery and parse its event, using [`DEFAULT_TOLERANCE`].
///
/// # Errors
///
/// Returns an error if the signature is invalid, the timestamp is outside the
/// tolerance, or the payload is not an event.
pub fn construct_event(payload: &str, signature: &str, secret: &str) -> Result<Event, ClientError> {
    construct_event_with_tolerance(payload, signature, secret, DEFAULT_TOLERANCE)
}

/// Verify a delivery and parse its event.
///
/// # Errors
///
/// Returns an error if the signature is invalid, the timestamp is outside
/// `tolerance`, or the payload is not an event.
pub fn construct_event_with_tolerance(
    payload: &str,
    signature: &str,
    secret: &str,
    tolerance: Duration,
) -> Result<Event, ClientError> {
    verify_signature(payload, signature, secret, tolerance)?;
    Ok(serde_json::from_str(payload)?)
}

/// Verify the `Stripe-Signature` header for `payload`.
///
/// # Errors
///
/// Returns an error if the header is malformed, no `v1` signature matches,
/// or the timestamp is older than `tolerance`.
pub fn verify_signature(
    payload: &str,
    signature: &str,
    secret: &str,
    tolerance: Duration,
) -> Result<(), ClientError> {
    verify_at(payload, signature, secret, tolerance, chrono::Utc::now().timestamp())
}

/// Build a `Stripe-Signature` header value for `payload` at `timestamp`.
///
/// Useful for exercising webhook handlers in tests.
///
/// # Errors
///
/// Returns an error if the secret cannot key the HMAC.
pub fn signature_header(payload: &str, secret: &str, timestamp: i64) -> Result<String, ClientError> {
    let mac = signed_mac(payload, secret, timestamp)?;
    Ok(format!(
        "t={timestamp},v1={}",
        hex::encode(mac.finalize().into_bytes())
    ))
}

fn signed_mac(payload: &str, secret: &str, timestamp: i64) -> Result<HmacSha256, ClientError> {
    let mut mac = HmacSha256::new_from_slice(secret.as_bytes())
        .map_err(|e| ClientError::Configuration(format!("invalid webhook secret: {e}")))?;
    mac.update(timestamp.to_string().as_bytes());
    mac.update(b".");
    mac.update(payload.as_bytes());
    Ok(mac)
}

fn verify_at(
    payload: &str,
    signature: &str,
    secret: &str,
    tolerance: Duration,
    now: i64,
) -> Result<(), ClientError> {
    let mut timestamp: Option<i64> = None;
    let mut signatures: Vec<&str> = Vec::new();

    for part in signature.split(',') {
        match part.trim().split_once('=') {
            Some(("t", ts)) => {
                timestamp = Some(ts.parse().map_err(|_| {
                    ClientError::WebhookTimestamp(format!("unparseable timestamp: {ts}"))
                })?);
            }
            Some(("v1", sig)) => signatures.push(sig),
            _ => {}
        }
    }

    let timestamp =
        timestamp.ok_or_else(|| ClientError::WebhookTimestamp("missing timestamp".into()))?;

    if signatures.is_empty() {
        return Err(ClientError::InvalidSignature);
    }

    let mac = signed_mac(payload, secret, timestamp)?;
    let valid = signatures.iter().any(|sig| {
        hex::decode(sig)
            .map(|bytes| mac.clone().verify_slice(&bytes).is_ok())
            .unwrap_or(false)
    });

    if !valid {
        return Err(ClientError::InvalidSignature);
    }

    let max_age = i64::try_from(tolerance.as_secs()).unwrap_or(i64::MAX);
    if now.saturating_sub(timestamp) > max_age {
        return Err(ClientError::WebhookTimestamp(format!(
            "signed at {timestamp}, older than {max_age}s"
        )));
    }

    Ok(())
}
