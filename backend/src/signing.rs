//! Webhook signature verification.
//!
//! The translation platform signs each webhook delivery with
//! HMAC-SHA256 over the canonical string
//!
//! ```text
//! {METHOD}\n{URL}\n{DATE}\n{md5_hex(body)}
//! ```
//!
//! base64-encoded into a signature header. The exact byte-for-byte
//! construction of that string is the interoperability contract with the
//! platform's signer, which is why it lives here as a pure function with a
//! pinned known-answer test rather than inline in the webhook handler.

use base64::engine::general_purpose::STANDARD as BASE64;
use base64::Engine;
use hmac::{Hmac, Mac};
use sha2::Sha256;

type HmacSha256 = Hmac<Sha256>;

/// Computes the base64 HMAC-SHA256 signature for one webhook delivery.
pub fn webhook_signature(secret: &str, method: &str, url: &str, date: &str, body: &[u8]) -> String {
    let body_md5 = format!("{:x}", md5::compute(body));
    let canonical = format!("{}\n{}\n{}\n{}", method, url, date, body_md5);

    // HMAC accepts keys of any length; new_from_slice cannot fail.
    let mut mac =
        HmacSha256::new_from_slice(secret.as_bytes()).expect("HMAC accepts any key length");
    mac.update(canonical.as_bytes());
    BASE64.encode(mac.finalize().into_bytes())
}

/// Verifies an inbound delivery against the configured secret.
///
/// Any missing part fails closed. Whether to skip verification when no
/// secret is configured is the caller's decision; this function always
/// verifies.
pub fn verify_webhook(
    secret: &str,
    signature: Option<&str>,
    url: Option<&str>,
    date: Option<&str>,
    body: &[u8],
) -> bool {
    let (Some(signature), Some(url), Some(date)) = (signature, url, date) else {
        return false;
    };
    if signature.is_empty() || url.is_empty() || date.is_empty() {
        return false;
    }
    webhook_signature(secret, "POST", url, date, body) == signature
}
