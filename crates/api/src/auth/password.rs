//! bcrypt password hashing and verification.
//!
//! Every hash embeds a fresh random salt, so hashing the same password twice
//! yields different strings. The work factor comes from configuration
//! ([`crate::auth::AuthConfig::bcrypt_cost`]); an out-of-range cost is a
//! configuration error caught at startup, not a per-request failure.

/// Hash a plaintext password with the given bcrypt cost factor.
pub fn hash_password(password: &str, cost: u32) -> Result<String, bcrypt::BcryptError> {
    bcrypt::hash(password, cost)
}

/// Compare a plaintext password against a stored bcrypt hash.
///
/// Never errors: a malformed or non-bcrypt hash string compares as `false`.
pub fn matches(password: &str, hash: &str) -> bool {
    bcrypt::verify(password, hash).unwrap_or(false)
}

#[cfg(test)]
mod tests {
    use super::*;

    /// Minimum bcrypt cost, to keep the test suite fast.
    const TEST_COST: u32 = 4;

    #[test]
    fn test_hash_and_match() {
        let hash = hash_password("correct-horse-battery-staple", TEST_COST)
            .expect("hashing should succeed");

        assert!(hash.starts_with("$2"), "expected a bcrypt hash string");
        assert!(matches("correct-horse-battery-staple", &hash));
    }

    #[test]
    fn test_wrong_password_does_not_match() {
        let hash = hash_password("real-password", TEST_COST).expect("hashing should succeed");
        assert!(!matches("wrong-password", &hash));
    }

    #[test]
    fn test_fresh_salt_per_call() {
        let a = hash_password("same-input", TEST_COST).unwrap();
        let b = hash_password("same-input", TEST_COST).unwrap();

        assert_ne!(a, b, "each hash must use a fresh salt");
        assert!(matches("same-input", &a));
        assert!(matches("same-input", &b));
    }

    #[test]
    fn test_malformed_hash_matches_false() {
        assert!(!matches("anything", "not-a-bcrypt-hash"));
        assert!(!matches("anything", ""));
    }
}
