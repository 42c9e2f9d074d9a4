//! Runtime configuration for the API server

use chrono::Duration;
use dotenv::dotenv;
use pr_core::services::token::TokenServiceConfig;
use pr_shared::config::{AppConfig, AuthConfig, DatabaseConfig, Environment, ServerConfig};

use crate::cookies::CookiePolicy;

#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("Invalid configuration: {0}")]
    Invalid(String),
}

#[derive(Debug, Clone)]
pub struct Config {
    pub database: DatabaseConfig,
    pub auth: AuthConfig,
    pub server: ServerConfig,
    pub environment: Environment,
}

impl Config {
    /// Load `.env` if present, then read the process environment
    pub fn from_env() -> Result<Self, ConfigError> {
        dotenv().ok();
        Self::from_app_config(AppConfig::from_env())
    }

    pub fn from_app_config(app: AppConfig) -> Result<Self, ConfigError> {
        app.validate().map_err(ConfigError::Invalid)?;

        Ok(Config {
            database: app.database,
            auth: app.auth,
            server: app.server,
            environment: app.environment,
        })
    }

    pub fn is_production(&self) -> bool {
        self.environment.is_production()
    }

    pub fn bind_address(&self) -> String {
        self.server.bind_address()
    }

    pub fn token_service_config(&self) -> TokenServiceConfig {
        TokenServiceConfig::from_jwt_config(&self.auth.jwt)
    }

    pub fn cookie_policy(&self) -> CookiePolicy {
        CookiePolicy::new(
            self.environment,
            &self.auth.cookies,
            Duration::seconds(self.auth.jwt.access_token_expiry),
            Duration::seconds(self.auth.jwt.refresh_token_expiry),
        )
    }
}
