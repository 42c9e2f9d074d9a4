//! Configuration for the token service

use chrono::Duration;
use pr_shared::config::JwtConfig;

/// Configuration for the token service
#[derive(Debug, Clone)]
pub struct TokenServiceConfig {
    /// HS256 signing secret
    pub jwt_secret: String,
    /// Access token lifetime
    pub access_token_ttl: Duration,
    /// Refresh token lifetime
    pub refresh_token_ttl: Duration,
}

impl Default for TokenServiceConfig {
    fn default() -> Self {
        Self {
            jwt_secret: "development-secret-please-change-in-production".to_string(),
            access_token_ttl: Duration::minutes(15),
            refresh_token_ttl: Duration::days(3),
        }
    }
}

impl TokenServiceConfig {
    /// Creates a configuration with default lifetimes and the given secret
    pub fn new(jwt_secret: impl Into<String>) -> Self {
        Self {
            jwt_secret: jwt_secret.into(),
            ..Default::default()
        }
    }

    /// Builds the service configuration from the shared JWT settings
    pub fn from_jwt_config(jwt: &JwtConfig) -> Self {
        Self {
            jwt_secret: jwt.secret.clone(),
            access_token_ttl: seconds(jwt.access_token_expiry),
            refresh_token_ttl: seconds(jwt.refresh_token_expiry),
        }
    }
}

/// Out-of-range values become zero, which minting rejects
fn seconds(value: i64) -> Duration {
    Duration::try_seconds(value).unwrap_or_else(Duration::zero)
}
