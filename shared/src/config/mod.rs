//! Configuration module with business-specific sub-modules
//!
//! - `auth` - JWT signing and session cookie configuration
//! - `database` - Database connection and pool configuration
//! - `environment` - Deployment environment detection
//! - `server` - HTTP server binding

pub mod auth;
pub mod database;
pub mod environment;
pub mod server;

use serde::{Deserialize, Serialize};

pub use auth::{AuthConfig, CookieConfig, JwtConfig};
pub use database::DatabaseConfig;
pub use environment::Environment;
pub use server::ServerConfig;

/// Complete application configuration combining all sub-configurations
#[derive(Debug, Clone, Default, Deserialize, Serialize)]
pub struct AppConfig {
    /// Deployment environment
    pub environment: Environment,

    /// Server configuration
    pub server: ServerConfig,

    /// Database configuration
    pub database: DatabaseConfig,

    /// Authentication configuration
    pub auth: AuthConfig,
}

impl AppConfig {
    /// Build configuration from process environment variables
    pub fn from_env() -> Self {
        Self::from_vars(|key| std::env::var(key).ok())
    }

    /// Build configuration from an arbitrary variable lookup
    pub fn from_vars<F>(lookup: F) -> Self
    where
        F: Fn(&str) -> Option<String>,
    {
        Self {
            environment: Environment::from_vars(&lookup),
            server: ServerConfig::from_vars(&lookup),
            database: DatabaseConfig::from_vars(&lookup),
            auth: AuthConfig::from_vars(&lookup),
        }
    }

    /// Validate settings that must hold before the server starts
    pub fn validate(&self) -> Result<(), String> {
        if self.environment.is_production() && self.auth.jwt.is_using_default_secret() {
            return Err("JWT_SECRET_KEY must be set in production".to_string());
        }
        if self.auth.jwt.secret.is_empty() {
            return Err("JWT secret must not be empty".to_string());
        }
        if !self.auth.jwt.has_valid_expiry() {
            return Err(format!(
                "token expiry values must be between 1 and {} seconds",
                auth::MAX_TOKEN_EXPIRY_SECONDS
            ));
        }
        Ok(())
    }
}

/// Parse a variable into `T`, falling back to `default` when absent or malformed
pub(crate) fn parse_or<F, T>(lookup: &F, key: &str, default: T) -> T
where
    F: Fn(&str) -> Option<String>,
    T: std::str::FromStr,
{
    lookup(key)
        .and_then(|value| value.trim().parse().ok())
        .unwrap_or(default)
}
