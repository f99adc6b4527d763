//! One-way password hashing.

use tracing::error;

use crate::errors::{AuthError, DomainResult};

/// Hashes passwords for storage and checks candidates against a digest
pub trait PasswordHasher: Send + Sync {
    /// Produce a salted digest. Two calls on the same input may differ.
    fn hash(&self, password: &str) -> DomainResult<String>;

    /// Check `password` against `digest`. A malformed digest is a mismatch.
    fn verify(&self, password: &str, digest: &str) -> bool;
}

/// bcrypt-backed hasher
#[derive(Debug, Clone, Copy)]
pub struct BcryptPasswordHasher {
    cost: u32,
}

impl BcryptPasswordHasher {
    pub fn new(cost: u32) -> Self {
        Self { cost }
    }

    pub fn cost(&self) -> u32 {
        self.cost
    }
}

impl Default for BcryptPasswordHasher {
    fn default() -> Self {
        Self::new(bcrypt::DEFAULT_COST)
    }
}

impl PasswordHasher for BcryptPasswordHasher {
    fn hash(&self, password: &str) -> DomainResult<String> {
        bcrypt::hash(password, self.cost).map_err(|e| {
            error!("Password hashing failed: {}", e);
            AuthError::EncodingError.into()
        })
    }

    fn verify(&self, password: &str, digest: &str) -> bool {
        bcrypt::verify(password, digest).unwrap_or(false)
    }
}
