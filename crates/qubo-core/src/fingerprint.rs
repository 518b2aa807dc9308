//! Script fingerprint: SHA-256 of the exact script text
//!
//! Two analyses with the same fingerprint were computed from the same bytes,
//! so a caller can tell whether a result belongs to the file currently
//! selected.

use sha2::{Digest, Sha256};

/// Hex-encoded SHA-256 of `text`
pub fn fingerprint(text: &str) -> String {
    let mut hasher = Sha256::new();
    hasher.update(text.as_bytes());
    format!("{:x}", hasher.finalize())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_fingerprint_is_sha256_hex() {
        let hash = fingerprint("def solve(q):\n    return q\n");
        assert_eq!(hash.len(), 64, "Hash should be 64 hex chars, got: {}", hash);
        assert!(
            hash.chars().all(|c| c.is_ascii_hexdigit()),
            "Hash should be hex, got: {}",
            hash
        );
    }

    #[test]
    fn test_fingerprint_known_value() {
        assert_eq!(
            fingerprint(""),
            "e3b0c44298fc1c149afbf4c8996fb92427ae41e4649b934ca495991b7852b855"
        );
    }

    #[test]
    fn test_fingerprint_sensitive_to_whitespace() {
        assert_ne!(fingerprint("return a"), fingerprint("return  a"));
    }
}
