//! HMAC-SHA256 delivery signatures.
//!
//! Deliveries carry `x-hub-signature-256: sha256=<hex>`, the keyed digest of
//! the exact request body bytes. Verification recomputes that header value
//! and compares the two strings in constant time.

use hmac::{Hmac, Mac};
use sha2::Sha256;
use subtle::ConstantTimeEq;

type HmacSha256 = Hmac<Sha256>;

/// Scheme prefix carried in the signature header.
pub const SIGNATURE_PREFIX: &str = "sha256=";

/// Compute the signature header value for `body` under `secret`.
pub fn sign(secret: &[u8], body: &[u8]) -> String {
    // infallible for HMAC: any key length is accepted
    let mut mac = HmacSha256::new_from_slice(secret).expect("HMAC can take key of any size");
    mac.update(body);
    let digest = mac.finalize().into_bytes();
    format!("{}{}", SIGNATURE_PREFIX, hex::encode(digest))
}

/// Check a supplied signature header value against `body`.
///
/// A value of the wrong length, a missing prefix, or an empty header all
/// compare unequal; nothing here panics on malformed input.
pub fn verify(secret: &[u8], body: &[u8], supplied: &str) -> bool {
    let expected = sign(secret, body);
    // `ct_eq` on slices of unequal length returns false without inspecting contents.
    expected.as_bytes().ct_eq(supplied.as_bytes()).into()
}

/// Holds the shared secret for the lifetime of the process.
#[derive(Clone)]
pub struct SignatureVerifier {
    secret: Vec<u8>,
}

impl SignatureVerifier {
    pub fn new(secret: impl Into<Vec<u8>>) -> Self {
        Self {
            secret: secret.into(),
        }
    }

    /// Verify `supplied` against the raw body bytes.
    pub fn verify(&self, body: &[u8], supplied: &str) -> bool {
        verify(&self.secret, body, supplied)
    }

    /// Signature this verifier would accept for `body`.
    pub fn sign(&self, body: &[u8]) -> String {
        sign(&self.secret, body)
    }
}

impl std::fmt::Debug for SignatureVerifier {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("SignatureVerifier")
            .field("secret", &"<redacted>")
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const BODY: &[u8] = br#"{"zen":"x"}"#;

    #[test]
    fn signature_has_prefix_and_hex_digest() {
        let sig = sign(b"abc", BODY);
        let hex_part = sig.strip_prefix(SIGNATURE_PREFIX).unwrap();
        assert_eq!(hex_part.len(), 64);
        assert!(hex_part.chars().all(|c| c.is_ascii_hexdigit() && !c.is_ascii_uppercase()));
    }

    #[test]
    fn known_vector() {
        // RFC 4231 test case 2.
        let sig = sign(b"Jefe", b"what do ya want for nothing?");
        assert_eq!(
            sig,
            "sha256=5bdcc146bf60754e6a042426089575c75a003f089d2739839dec58b964ec3843"
        );
    }

    #[test]
    fn accepts_own_signature() {
        let sig = sign(b"abc", BODY);
        assert!(verify(b"abc", BODY, &sig));
    }

    #[test]
    fn rejects_other_secret() {
        let sig = sign(b"not-abc", BODY);
        assert!(!verify(b"abc", BODY, &sig));
    }

    #[test]
    fn rejects_modified_body() {
        let sig = sign(b"abc", BODY);
        assert!(!verify(b"abc", br#"{"zen": "x"}"#, &sig));
    }

    #[test]
    fn length_mismatch_fails_closed() {
        let sig = sign(b"abc", BODY);
        assert!(!verify(b"abc", BODY, ""));
        assert!(!verify(b"abc", BODY, "sha256="));
        assert!(!verify(b"abc", BODY, &sig[..sig.len() - 1]));
        assert!(!verify(b"abc", BODY, &format!("{sig}0")));
        assert!(!verify(b"abc", BODY, sig.strip_prefix(SIGNATURE_PREFIX).unwrap()));
    }

    #[test]
    fn uppercase_hex_is_not_accepted() {
        let sig = sign(b"abc", BODY);
        let upper = format!("sha256={}", sig[7..].to_uppercase());
        assert!(!verify(b"abc", BODY, &upper));
    }

    #[test]
    fn verifier_debug_hides_secret() {
        let verifier = SignatureVerifier::new("abc");
        assert!(!format!("{verifier:?}").contains("abc"));
        assert!(verifier.verify(BODY, &verifier.sign(BODY)));
    }
}
