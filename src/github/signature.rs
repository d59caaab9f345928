//! GitHub webhook signature verification using HMAC-SHA256.
//!
//! GitHub signs each delivery with the shared secret and sends the result in
//! the `X-Hub-Signature-256` header as `sha256=<hex>`.

use hmac::{Hmac, Mac};
use sha2::Sha256;

type HmacSha256 = Hmac<Sha256>;

/// Parses a `sha256=<hex>` header into raw bytes.
///
/// Returns `None` for a missing prefix, another algorithm, or bad hex.
pub fn parse_signature_header(header: &str) -> Option<Vec<u8>> {
    let hex_sig = header.strip_prefix("sha256=")?;

    hex::decode(hex_sig).ok()
}

/// Computes the HMAC-SHA256 of `payload` keyed with `secret`.
pub fn compute_signature(payload: &[u8], secret: &[u8]) -> Vec<u8> {
    let mut mac = HmacSha256::new_from_slice(secret).expect("HMAC can take key of any size");
    mac.update(payload);
    mac.finalize().into_bytes().to_vec()
}

/// Formats a signature the way GitHub sends it.
pub fn format_signature_header(signature: &[u8]) -> String {
    format!("sha256={}", hex::encode(signature))
}

/// Verifies a signature header against the payload and secret.
///
/// The comparison is constant-time.
pub fn verify_signature(payload: &[u8], signature_header: &str, secret: &[u8]) -> bool {
    let Some(expected) = parse_signature_header(signature_header) else {
        return false;
    };

    let Ok(mut mac) = HmacSha256::new_from_slice(secret) else {
        return false;
    };
    mac.update(payload);

    mac.verify_slice(&expected).is_ok()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parse_valid_header() {
        assert_eq!(parse_signature_header("sha256=1234abcd"), Some(vec![0x12, 0x34, 0xab, 0xcd]));
    }

    #[test]
    fn parse_rejects_sha1_and_missing_prefix() {
        assert_eq!(parse_signature_header("sha1=1234abcd"), None);
        assert_eq!(parse_signature_header("1234abcd"), None);
        assert_eq!(parse_signature_header("sha256=xyz"), None);
    }

    #[test]
    fn known_vector() {
        // Example from GitHub's "Validating webhook deliveries" documentation.
        let sig = compute_signature(b"Hello, World!", b"It's a Secret to Everybody");
        assert_eq!(hex::encode(sig), "757107ea0eb2509fc211221cce984b8a37570b6d7586c22c46f4379c8b043e17");
    }

    #[test]
    fn verify_round_trip_and_wrong_secret() {
        let payload = br#"{"action":"opened"}"#;
        let header = format_signature_header(&compute_signature(payload, b"secret"));

        assert!(verify_signature(payload, &header, b"secret"));
        assert!(!verify_signature(payload, &header, b"other"));
        assert!(!verify_signature(b"tampered", &header, b"secret"));
        assert!(!verify_signature(payload, "sha256=", b"secret"));
    }
}
