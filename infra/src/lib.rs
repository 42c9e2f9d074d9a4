//! # Infrastructure Layer
//!
//! Concrete persistence for the PetReunite backend. The domain layer only
//! knows the `UserRepository` trait; this crate provides the SQLite-backed
//! implementation and the connection pool it runs on.

// Re-export core types for convenience
pub use pr_core::errors::*;

/// Database module - SQLite implementations using SQLx
pub mod database;

/// Infrastructure-specific error types
#[derive(Debug, thiserror::Error)]
pub enum InfrastructureError {
    /// Database connection error
    #[error("Database error: {0}")]
    Database(#[from] sqlx::Error),

    /// Configuration error
    #[error("Configuration error: {0}")]
    Config(String),
}

impl From<InfrastructureError> for DomainError {
    fn from(err: InfrastructureError) -> Self {
        match err {
            InfrastructureError::Database(e) => DomainError::Database(e.to_string()),
            InfrastructureError::Config(message) => DomainError::Internal { message },
        }
    }
}
