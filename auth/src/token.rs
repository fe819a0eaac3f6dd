use std::fmt::Write;

use rand::rngs::OsRng;
use rand::RngCore;

/// Opaque secret token utilities.
///
/// Tokens are 256 bits of OS-level CSPRNG output, hex-encoded. They are
/// bearer credentials: possession of the string is possession of the
/// capability, so they must never be logged or echoed back except on the
/// channel that issues them.
pub struct SecretToken;

impl SecretToken {
    const ENTROPY_BYTES: usize = 32;

    /// Generate a fresh token.
    ///
    /// # Returns
    /// 64-character lowercase hex string (256 bits of entropy)
    pub fn generate() -> String {
        let mut bytes = [0u8; Self::ENTROPY_BYTES];
        OsRng.fill_bytes(&mut bytes);

        let mut encoded = String::with_capacity(Self::ENTROPY_BYTES * 2);
        for byte in bytes {
            // Writing to a String cannot fail
            let _ = write!(encoded, "{:02x}", byte);
        }
        encoded
    }

    /// Compare two token strings in constant time.
    ///
    /// The comparison touches every byte regardless of where the first
    /// mismatch occurs. Length is the only early exit; token lengths are
    /// not secret.
    pub fn matches(stored: &str, supplied: &str) -> bool {
        let a = stored.as_bytes();
        let b = supplied.as_bytes();
        if a.len() != b.len() {
            return false;
        }

        let mut diff = 0u8;
        for (x, y) in a.iter().zip(b.iter()) {
            diff |= x ^ y;
        }
        diff == 0
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_generate_length_and_charset() {
        let token = SecretToken::generate();
        assert_eq!(token.len(), 64);
        assert!(token.chars().all(|c| c.is_ascii_hexdigit()));
    }

    #[test]
    fn test_generate_is_random() {
        let first = SecretToken::generate();
        let second = SecretToken::generate();
        assert_ne!(first, second);
    }

    #[test]
    fn test_matches_equal() {
        let token = SecretToken::generate();
        assert!(SecretToken::matches(&token, &token));
    }

    #[test]
    fn test_matches_rejects_differences() {
        assert!(!SecretToken::matches("abcdef", "abcdee"));
        assert!(!SecretToken::matches("abcdef", "abcde"));
        assert!(!SecretToken::matches("", "a"));
    }
}
