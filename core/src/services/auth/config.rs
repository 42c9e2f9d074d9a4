//! Configuration for the authentication service

use chrono::Duration;

/// Configuration for the authentication service
#[derive(Debug, Clone)]
pub struct AuthServiceConfig {
    /// Lifetime of password recovery tokens
    pub recovery_token_ttl: Duration,
    /// Whether new accounts may be created
    pub allow_registration: bool,
}

impl Default for AuthServiceConfig {
    fn default() -> Self {
        Self {
            recovery_token_ttl: Duration::minutes(15),
            allow_registration: true,
        }
    }
}
