use crate::errors::{DomainError, DomainResult};

/// Computes and checks password hashes
pub trait PasswordHasher: Send + Sync {
    /// Hashes a plain-text password for storage
    fn hash(&self, plain: &str) -> DomainResult<String>;

    /// Checks a plain-text password against a stored hash
    ///
    /// A hash that cannot be parsed counts as a mismatch.
    fn verify(&self, plain: &str, hash: &str) -> DomainResult<bool>;
}

/// bcrypt-backed password hasher
#[derive(Debug, Clone, Copy)]
pub struct BcryptPasswordHasher {
    cost: u32,
}

impl BcryptPasswordHasher {
    pub fn new(cost: u32) -> Self {
        Self { cost }
    }
}

impl Default for BcryptPasswordHasher {
    fn default() -> Self {
        Self::new(bcrypt::DEFAULT_COST)
    }
}

impl PasswordHasher for BcryptPasswordHasher {
    fn hash(&self, plain: &str) -> DomainResult<String> {
        bcrypt::hash(plain, self.cost).map_err(|e| DomainError::Internal {
            message: format!("Password hashing failed: {}", e),
        })
    }

    fn verify(&self, plain: &str, hash: &str) -> DomainResult<bool> {
        match bcrypt::verify(plain, hash) {
            Ok(matches) => Ok(matches),
            Err(e) => {
                tracing::debug!("Stored password hash could not be parsed: {}", e);
                Ok(false)
            }
        }
    }
}
