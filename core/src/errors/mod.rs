//! Domain-specific error types and error handling.

mod types;


pub use types::{AuthError, TokenError, ValidationError};

use thiserror::Error;

/// Core domain errors (general purpose)
#[derive(Error, Debug)]
pub enum DomainError {
    #[error("Validation error: {message}")]
    Validation { message: String },

    #[error("Resource not found: {resource}")]
    NotFound { resource: String },

    #[error("Internal error: {message}")]
    Internal { message: String },

    #[error("Database error: {0}")]
    Database(String),

    // Bridge to specific error types
    #[error(transparent)]
    Auth(#[from] AuthError),

    #[error(transparent)]
    Token(#[from] TokenError),

    #[error(transparent)]
    ValidationErr(#[from] ValidationError),
}

impl DomainError {
    /// Whether the error should surface to clients as `401 Unauthorized`
    pub fn is_unauthorized(&self) -> bool {
        matches!(
            self,
            DomainError::Token(TokenError::InvalidToken)
                | DomainError::Token(TokenError::MissingCredentials)
                | DomainError::Auth(AuthError::PrincipalNotFound)
                | DomainError::Auth(AuthError::InvalidCredentials)
        )
    }
}

pub type DomainResult<T> = Result<T, DomainError>;
