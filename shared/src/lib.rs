//! Shared configuration and common types for the PetReunite server
//!
//! This crate provides functionality used across all server modules:
//! - Configuration types (environment, server, database, auth, cookies)
//! - The JSON error envelope returned by the HTTP layer

pub mod config;
pub mod types;

// Re-export commonly used items at crate root
pub use config::{
    AppConfig, AuthConfig, CookieConfig, DatabaseConfig, Environment, JwtConfig, ServerConfig,
};
pub use types::response::ErrorResponse;
