//! Error types for authentication, token handling and input validation
//!
//! Messages here are internal; the presentation layer decides what a
//! client gets to see.

use thiserror::Error;

/// Authentication-related errors
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum AuthError {
    /// A valid token referenced a user that no longer exists
    #[error("User not found")]
    PrincipalNotFound,

    /// Unknown email or wrong password; the two are never distinguished
    #[error("Incorrect email or password")]
    InvalidCredentials,

    #[error("Email already registered")]
    EmailAlreadyRegistered,

    #[error("Registration disabled")]
    RegistrationDisabled,
}

/// Token-related errors
///
/// `InvalidToken` deliberately covers malformed input, bad signatures and
/// expiry alike.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum TokenError {
    #[error("Invalid token")]
    InvalidToken,

    #[error("Missing credentials")]
    MissingCredentials,

    #[error("Token generation failed")]
    TokenGenerationFailed,
}

/// Input validation errors
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ValidationError {
    #[error("Required field: {field}")]
    RequiredField { field: String },

    #[error("Invalid email")]
    InvalidEmail,

    #[error("Invalid length: {field} (min: {min}, max: {max})")]
    InvalidLength { field: String, min: u64, max: u64 },
}
