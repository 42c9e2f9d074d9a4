//! Authentication service module
//!
//! This module provides the account flows built on top of the token service:
//! - User registration with password hashing
//! - Email/password login issuing a session
//! - Refresh token rotation
//! - Resolving the current user from a token
//! - Password recovery and reset

mod config;
mod service;

#[cfg(test)]
mod tests;

pub use config::AuthServiceConfig;
pub(crate) use service::first_validation_error;
pub use service::{AuthService, RegisterUser};
