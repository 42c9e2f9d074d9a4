//! Authentication configuration: JWT signing and session cookies

use serde::{Deserialize, Serialize};

use super::parse_or;

const DEFAULT_SECRET: &str = "development-secret-please-change-in-production";

/// Longest token lifetime accepted from configuration (one year)
pub const MAX_TOKEN_EXPIRY_SECONDS: i64 = 365 * 86400;

/// JWT authentication configuration
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct JwtConfig {
    /// Symmetric secret used to sign tokens
    pub secret: String,

    /// Access token expiry time in seconds
    pub access_token_expiry: i64,

    /// Refresh token expiry time in seconds
    pub refresh_token_expiry: i64,

    /// Algorithm for JWT signing
    #[serde(default = "default_algorithm")]
    pub algorithm: String,
}

impl Default for JwtConfig {
    fn default() -> Self {
        Self {
            secret: String::from(DEFAULT_SECRET),
            access_token_expiry: 900,     // 15 minutes
            refresh_token_expiry: 259200, // 3 days
            algorithm: default_algorithm(),
        }
    }
}

impl JwtConfig {
    /// Create a new JWT configuration with secret
    pub fn new(secret: impl Into<String>) -> Self {
        Self {
            secret: secret.into(),
            ..Default::default()
        }
    }

    /// Set access token expiry in minutes
    ///
    /// Overflowing values saturate and are then refused by validation.
    pub fn with_access_expiry_minutes(mut self, minutes: i64) -> Self {
        self.access_token_expiry = minutes.saturating_mul(60);
        self
    }

    /// Set refresh token expiry in days
    pub fn with_refresh_expiry_days(mut self, days: i64) -> Self {
        self.refresh_token_expiry = days.saturating_mul(86400);
        self
    }

    /// Check both lifetimes are positive and within [`MAX_TOKEN_EXPIRY_SECONDS`]
    pub fn has_valid_expiry(&self) -> bool {
        let in_range = |secs: i64| secs > 0 && secs <= MAX_TOKEN_EXPIRY_SECONDS;
        in_range(self.access_token_expiry) && in_range(self.refresh_token_expiry)
    }

    /// Check if using default secret (security warning)
    pub fn is_using_default_secret(&self) -> bool {
        self.secret == DEFAULT_SECRET
    }

    pub(crate) fn from_vars<F>(lookup: &F) -> Self
    where
        F: Fn(&str) -> Option<String>,
    {
        let secret = lookup("JWT_SECRET_KEY")
            .or_else(|| lookup("JWT_SECRET"))
            .filter(|s| !s.is_empty())
            .unwrap_or_else(|| DEFAULT_SECRET.to_string());
        let access_minutes: i64 = parse_or(lookup, "ACCESS_TOKEN_EXPIRE_MINUTES", 15);
        let refresh_days: i64 = parse_or(lookup, "REFRESH_TOKEN_EXPIRE_DAYS", 3);

        Self::new(secret)
            .with_access_expiry_minutes(access_minutes)
            .with_refresh_expiry_days(refresh_days)
    }
}

/// Names and scope of the session cookies
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct CookieConfig {
    /// Cookie carrying the access token
    pub access_cookie_name: String,

    /// Cookie carrying the refresh token
    pub refresh_cookie_name: String,

    /// Cookie path
    pub path: String,
}

impl Default for CookieConfig {
    fn default() -> Self {
        Self {
            access_cookie_name: String::from("access_token"),
            refresh_cookie_name: String::from("refresh_token"),
            path: String::from("/"),
        }
    }
}

/// Complete authentication configuration
#[derive(Debug, Clone, Default, Deserialize, Serialize)]
pub struct AuthConfig {
    /// JWT configuration
    pub jwt: JwtConfig,

    /// Session cookie configuration
    #[serde(default)]
    pub cookies: CookieConfig,
}

impl AuthConfig {
    pub(crate) fn from_vars<F>(lookup: &F) -> Self
    where
        F: Fn(&str) -> Option<String>,
    {
        Self {
            jwt: JwtConfig::from_vars(lookup),
            cookies: CookieConfig::default(),
        }
    }
}

fn default_algorithm() -> String {
    String::from("HS256")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_jwt_config_default() {
        let config = JwtConfig::default();
        assert_eq!(config.access_token_expiry, 900);
        assert_eq!(config.refresh_token_expiry, 259200);
        assert_eq!(config.algorithm, "HS256");
        assert!(config.is_using_default_secret());
    }

    #[test]
    fn test_jwt_config_builder() {
        let config = JwtConfig::new("my-secret")
            .with_access_expiry_minutes(30)
            .with_refresh_expiry_days(14);

        assert_eq!(config.access_token_expiry, 1800);
        assert_eq!(config.refresh_token_expiry, 1209600);
        assert!(!config.is_using_default_secret());
    }

    #[test]
    fn test_jwt_secret_falls_back_to_legacy_name() {
        let lookup = |key: &str| match key {
            "JWT_SECRET" => Some("legacy".to_string()),
            "REFRESH_TOKEN_EXPIRE_DAYS" => Some("7".to_string()),
            _ => None,
        };
        let config = JwtConfig::from_vars(&lookup);
        assert_eq!(config.secret, "legacy");
        assert_eq!(config.refresh_token_expiry, 7 * 86400);
    }

    #[test]
    fn test_huge_expiry_saturates_instead_of_overflowing() {
        let config = JwtConfig::new("secret").with_refresh_expiry_days(i64::MAX / 2);
        assert_eq!(config.refresh_token_expiry, i64::MAX);
        assert!(!config.has_valid_expiry());

        let config = JwtConfig::new("secret").with_refresh_expiry_days(1_000_000_000);
        assert!(!config.has_valid_expiry());
        assert!(JwtConfig::new("secret").has_valid_expiry());
    }

    #[test]
    fn test_cookie_config_default() {
        let config = CookieConfig::default();
        assert_eq!(config.access_cookie_name, "access_token");
        assert_eq!(config.refresh_cookie_name, "refresh_token");
        assert_eq!(config.path, "/");
    }
}
