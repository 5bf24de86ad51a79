/**
 * Link Password Digest
 *
 * A share link carries at most one shared password, stored as a hex SHA-256
 * digest. Verification re-hashes the supplied password and compares the two
 * digests in constant time so response timing reveals nothing about partial
 * matches. A malformed stored digest is a verification failure, never a
 * panic.
 */

use std::fmt::Write as _;

use sha2::{Digest, Sha256};
use subtle::ConstantTimeEq;

pub use crate::shared::error::MIN_PASSWORD_LEN;
use crate::shared::ShareError;

/// Digest a link password into its stored hex form
pub fn hash_password(password: &str) -> String {
    let digest = Sha256::digest(password.as_bytes());
    let mut out = String::with_capacity(digest.len() * 2);
    for byte in digest {
        // Writing to a String cannot fail.
        let _ = write!(out, "{:02x}", byte);
    }
    out
}

/// Reject passwords too short for a private link, before any store write
pub fn validate_password(password: &str) -> Result<(), ShareError> {
    if password.len() < MIN_PASSWORD_LEN {
        return Err(ShareError::weak_password());
    }
    Ok(())
}

/// Compare a supplied password against a stored hex digest.
///
/// Returns false on any mismatch, including a stored value that is not
/// valid hex of the right length.
pub fn verify_hash(supplied: &str, stored_hex: &str) -> bool {
    let provided = Sha256::digest(supplied.as_bytes());
    let Some(stored) = decode_hex(stored_hex) else {
        return false;
    };
    if stored.len() != provided.len() {
        return false;
    }
    provided.as_slice().ct_eq(&stored).into()
}

fn decode_hex(hex: &str) -> Option<Vec<u8>> {
    if hex.len() % 2 != 0 {
        return None;
    }
    hex.as_bytes()
        .chunks(2)
        .map(|pair| {
            let pair = std::str::from_utf8(pair).ok()?;
            u8::from_str_radix(pair, 16).ok()
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_digest_is_hex_sha256() {
        // Known vector: sha256("secret")
        assert_eq!(
            hash_password("secret"),
            "2bb80d537b1da3e38bd30361aa855686bde0eacd7162fef6a25fe97bf527a25b"
        );
    }

    #[test]
    fn test_verify_accepts_matching_password() {
        let stored = hash_password("secret");
        assert!(verify_hash("secret", &stored));
        assert!(!verify_hash("wrong", &stored));
        assert!(!verify_hash("", &stored));
    }

    #[test]
    fn test_malformed_stored_hash_fails_closed() {
        assert!(!verify_hash("secret", "not hex at all"));
        assert!(!verify_hash("secret", "abc")); // odd length
        assert!(!verify_hash("secret", "deadbeef")); // wrong length
        assert!(!verify_hash("secret", ""));
    }

    #[test]
    fn test_short_passwords_are_rejected() {
        assert!(validate_password("abc").is_err());
        assert!(validate_password("abcd").is_ok());
    }
}
