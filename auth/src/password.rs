use argon2::password_hash::rand_core::OsRng;
use argon2::password_hash::Error as PhcError;
use argon2::password_hash::PasswordHash;
use argon2::password_hash::PasswordHasher as Argon2PasswordHasher;
use argon2::password_hash::PasswordVerifier;
use argon2::password_hash::SaltString;
use argon2::Argon2;
use thiserror::Error;

/// Errors from password hashing operations.
///
/// Both variants signal an internal fault. A password that simply does not
/// match its digest is reported as `Ok(false)` by [`PasswordHasher::verify`],
/// never as an error.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum PasswordError {
    #[error("Password hashing failed: {0}")]
    HashingFailed(String),

    #[error("Password verification failed: {0}")]
    VerificationFailed(String),
}

/// Argon2id password hasher with per-hash random salts.
///
/// Cost parameters are the argon2 crate defaults, fixed for the process
/// lifetime. Every digest records its own parameters and salt in PHC string
/// format, so digests remain verifiable across parameter upgrades.
#[derive(Debug, Clone, Copy)]
pub struct PasswordHasher;

impl PasswordHasher {
    pub fn new() -> Self {
        Self
    }

    /// Hash a password for storage.
    ///
    /// Accepts any input string; an error here is a fault of the hashing
    /// backend, not a property of the password.
    pub fn hash(&self, password: &str) -> Result<String, PasswordError> {
        let salt = SaltString::generate(&mut OsRng);

        Argon2::default()
            .hash_password(password.as_bytes(), &salt)
            .map(|digest| digest.to_string())
            .map_err(|e| PasswordError::HashingFailed(e.to_string()))
    }

    /// Verify a password against a stored digest.
    ///
    /// Returns `Ok(false)` on mismatch. A digest that does not parse as a
    /// PHC string is an internal failure, since the service only stores
    /// digests it produced itself.
    pub fn verify(&self, password: &str, digest: &str) -> Result<bool, PasswordError> {
        let parsed = PasswordHash::new(digest)
            .map_err(|e| PasswordError::VerificationFailed(format!("invalid digest: {}", e)))?;

        match Argon2::default().verify_password(password.as_bytes(), &parsed) {
            Ok(()) => Ok(true),
            Err(PhcError::Password) => Ok(false),
            Err(e) => Err(PasswordError::VerificationFailed(e.to_string())),
        }
    }
}

impl Default for PasswordHasher {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_hash_produces_phc_string() {
        let hasher = PasswordHasher::new();
        let digest = hasher.hash("secure_password_123").unwrap();

        assert!(digest.starts_with("$argon2id$"));
    }

    #[test]
    fn test_verify_correct_password() {
        let hasher = PasswordHasher::new();
        let digest = hasher.hash("secure_password_123").unwrap();

        assert!(hasher.verify("secure_password_123", &digest).unwrap());
    }

    #[test]
    fn test_verify_wrong_password_is_false_not_error() {
        let hasher = PasswordHasher::new();
        let digest = hasher.hash("secure_password_123").unwrap();

        assert!(!hasher.verify("wrong_password", &digest).unwrap());
    }

    #[test]
    fn test_same_password_hashes_differently() {
        let hasher = PasswordHasher::new();
        let first = hasher.hash("secure_password_123").unwrap();
        let second = hasher.hash("secure_password_123").unwrap();

        // random salts make digests unique
        assert_ne!(first, second);
        assert!(hasher.verify("secure_password_123", &first).unwrap());
        assert!(hasher.verify("secure_password_123", &second).unwrap());
    }

    #[test]
    fn test_verify_malformed_digest_is_error() {
        let hasher = PasswordHasher::new();
        let result = hasher.verify("secure_password_123", "not-a-phc-string");

        assert!(matches!(result, Err(PasswordError::VerificationFailed(_))));
    }

    #[test]
    fn test_empty_password_roundtrip() {
        let hasher = PasswordHasher::new();
        let digest = hasher.hash("").unwrap();

        assert!(hasher.verify("", &digest).unwrap());
        assert!(!hasher.verify("nonempty", &digest).unwrap());
    }
}
