//! Webhook payload signature validation.

use {
    hmac::{Hmac, Mac},
    sha2::Sha256,
    tracing::warn,
};

type HmacSha256 = Hmac<Sha256>;

/// Verify the `X-Hub-Signature-256` header against the raw POST body.
///
/// The header carries `sha256=<hex>` over an HMAC of the body keyed
/// with the configured app secret. Comparison happens in constant time
/// via [`Mac::verify_slice`].
pub fn verify_signature(body: &[u8], signature_header: &str, app_secret: &str) -> bool {
    let Some(claimed_hex) = signature_header.strip_prefix("sha256=") else {
        warn!("signature header missing sha256= prefix");
        return false;
    };
    let Ok(claimed) = hex::decode(claimed_hex) else {
        warn!("signature header is not valid hex");
        return false;
    };

    let Ok(mut mac) = HmacSha256::new_from_slice(app_secret.as_bytes()) else {
        warn!("failed to key HMAC");
        return false;
    };
    mac.update(body);
    mac.verify_slice(&claimed).is_ok()
}
