//! Webhook signature verification.
//!
//! The provider signs each delivery with `HMAC-SHA256(secret, "{t}.{body}")`
//! and sends the result in a `Stripe-Signature` header of the form
//! `t=<unix-ts>,v1=<hex-digest>[,v1=...]`. Verification must pass before any
//! part of the body is trusted.

use hmac::{Hmac, Mac};
use sha2::Sha256;

use crate::error::HubError;

type HmacSha256 = Hmac<Sha256>;

/// Parsed form of the signature header.
#[derive(Debug)]
struct SignatureHeader {
    timestamp: String,
    /// All `v1` digests; the provider may include several during secret
    /// rotation, and any single match is sufficient.
    v1_digests: Vec<Vec<u8>>,
}

fn parse_header(header: &str) -> Result<SignatureHeader, HubError> {
    let mut timestamp = None;
    let mut v1_digests = Vec::new();

    for part in header.split(',') {
        let Some((key, value)) = part.trim().split_once('=') else {
            continue;
        };
        match key {
            "t" => timestamp = Some(value.to_string()),
            "v1" => {
                let digest = hex::decode(value).map_err(|_| {
                    HubError::Signature("v1 digest is not valid hex".to_string())
                })?;
                v1_digests.push(digest);
            }
            _ => {}
        }
    }

    let timestamp =
        timestamp.ok_or_else(|| HubError::Signature("missing timestamp".to_string()))?;
    if v1_digests.is_empty() {
        return Err(HubError::Signature("missing v1 digest".to_string()));
    }
    Ok(SignatureHeader {
        timestamp,
        v1_digests,
    })
}

/// Verifies the provider signature over a raw webhook body.
///
/// # Errors
///
/// Returns [`HubError::Signature`] when the endpoint secret is unconfigured,
/// when the header is missing required elements or is not valid hex, or when
/// none of its digests match the payload.
pub fn verify_signature(secret: &str, payload: &[u8], header: &str) -> Result<(), HubError> {
    // Fail closed on an empty secret: an attacker can compute HMAC digests
    // over the empty key just as easily as we can.
    if secret.is_empty() {
        return Err(HubError::Signature(
            "webhook secret not configured".to_string(),
        ));
    }

    let parsed = parse_header(header)?;

    let mut mac = HmacSha256::new_from_slice(secret.as_bytes())
        .map_err(|_| HubError::Signature("invalid signing secret".to_string()))?;
    mac.update(parsed.timestamp.as_bytes());
    mac.update(b".");
    mac.update(payload);

    // Mac::verify_slice is constant-time; try each rotation candidate.
    let matched = parsed
        .v1_digests
        .iter()
        .any(|digest| mac.clone().verify_slice(digest).is_ok());

    if matched {
        Ok(())
    } else {
        Err(HubError::Signature("digest mismatch".to_string()))
    }
}
