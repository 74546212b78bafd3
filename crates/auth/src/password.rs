//! One-way password hashing.

use argon2::{
    Argon2,
    password_hash::{PasswordHash, PasswordHasher, PasswordVerifier, SaltString},
};
use rand_core::OsRng;
use tracing::{error, instrument};

use barbermatch_core::{DomainError, DomainResult};

/// Derives and checks one-way password hashes.
pub trait CredentialHasher: Send + Sync {
    fn hash(&self, password: &str) -> DomainResult<String>;

    /// Returns `false` on mismatch and on an unparseable stored hash.
    fn verify(&self, password: &str, password_hash: &str) -> bool;
}

/// Argon2id with the crate's default parameters.
#[derive(Debug, Default, Clone, Copy)]
pub struct Argon2Hasher;

impl Argon2Hasher {
    pub fn new() -> Self {
        Self
    }
}

impl CredentialHasher for Argon2Hasher {
    #[instrument(name = "password::hash", skip_all)]
    fn hash(&self, password: &str) -> DomainResult<String> {
        let salt = SaltString::generate(&mut OsRng);
        Argon2::default()
            .hash_password(password.as_bytes(), &salt)
            .map(|hash| hash.to_string())
            .map_err(|e| {
                error!(error = %e, "argon2 hashing failed");
                DomainError::internal(format!("password hashing failed: {e}"))
            })
    }

    fn verify(&self, password: &str, password_hash: &str) -> bool {
        match PasswordHash::new(password_hash) {
            Ok(parsed) => Argon2::default().verify_password(password.as_bytes(), &parsed).is_ok(),
            Err(_) => false,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn hash_verifies_and_hides_plaintext() {
        let hasher = Argon2Hasher::new();
        let hash = hasher.hash("s3cret!").unwrap();
        assert!(!hash.contains("s3cret!"));
        assert!(hasher.verify("s3cret!", &hash));
        assert!(!hasher.verify("wrong", &hash));
    }

    #[test]
    fn hashes_are_salted() {
        let hasher = Argon2Hasher::new();
        assert_ne!(hasher.hash("same").unwrap(), hasher.hash("same").unwrap());
    }

    #[test]
    fn malformed_stored_hash_never_matches() {
        assert!(!Argon2Hasher::new().verify("anything", "not-a-phc-string"));
    }
}
