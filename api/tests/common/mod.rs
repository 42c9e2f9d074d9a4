//! Shared fixtures for the HTTP integration tests

#![allow(dead_code)]

use std::sync::Arc;

use actix_web::{dev::ServiceResponse, web};
use chrono::{DateTime, TimeZone, Utc};
use pr_api::config::Config;
use pr_api::routes::auth::AppState;
use pr_core::repositories::MockUserRepository;
use pr_core::services::auth::{AuthService, AuthServiceConfig};
use pr_core::services::password::BcryptPasswordHasher;
use pr_core::services::token::{ManualClock, TokenService};
use pr_core::services::user::UserService;
use pr_shared::config::AppConfig;
use serde_json::{json, Value};

pub const PASSWORD: &str = "correct-horse-battery";
pub const SECRET: &str = "integration-test-secret";

pub struct TestContext {
    pub state: web::Data<AppState<MockUserRepository>>,
    pub repository: Arc<MockUserRepository>,
    pub clock: Arc<ManualClock>,
    pub token_service: Arc<TokenService>,
}

pub fn start() -> DateTime<Utc> {
    Utc.with_ymd_and_hms(2024, 6, 1, 9, 0, 0).unwrap()
}

/// Build application state for `environment` ("development" or "production")
pub fn context(environment: &str) -> TestContext {
    let vars = [("ENVIRONMENT", environment), ("JWT_SECRET_KEY", SECRET)];
    let config = Config::from_app_config(AppConfig::from_vars(|key| {
        vars.iter()
            .find(|(k, _)| *k == key)
            .map(|(_, v)| v.to_string())
    }))
    .unwrap();

    let clock = Arc::new(ManualClock::new(start()));
    let repository = Arc::new(MockUserRepository::new());
    let token_service = Arc::new(TokenService::with_clock(
        config.token_service_config(),
        clock.clone(),
    ));
    let password_hasher = Arc::new(BcryptPasswordHasher::new(4));
    let auth_service = Arc::new(AuthService::new(
        repository.clone(),
        password_hasher.clone(),
        token_service.clone(),
        AuthServiceConfig::default(),
    ));
    let user_service = Arc::new(UserService::new(repository.clone(), password_hasher));

    TestContext {
        state: web::Data::new(AppState::new(
            auth_service,
            user_service,
            config.cookie_policy(),
            config.environment,
        )),
        repository,
        clock,
        token_service,
    }
}

pub fn registration(email: &str) -> Value {
    json!({
        "first_name": "Ana",
        "last_name": "Lima",
        "email": email,
        "phone": "+55 11 99999-0000",
        "full_address": "Rua das Flores 10, Sao Paulo",
        "recovery_bounty": 150.0,
        "password": PASSWORD,
    })
}

/// Raw `Set-Cookie` header for `name`
pub fn set_cookie_header<B>(resp: &ServiceResponse<B>, name: &str) -> String {
    resp.headers()
        .get_all(actix_web::http::header::SET_COOKIE)
        .filter_map(|v| v.to_str().ok())
        .find(|v| v.starts_with(&format!("{}=", name)))
        .map(str::to_string)
        .unwrap_or_default()
}

/// Register a user and log it in without going through HTTP
pub async fn seed_user(
    ctx: &TestContext,
    email: &str,
) -> (
    pr_core::domain::entities::user::User,
    pr_core::domain::entities::token::TokenPair,
) {
    let input = serde_json::from_value(registration(email)).unwrap();
    ctx.state.auth_service.register(input).await.unwrap();
    ctx.state.auth_service.login(email, PASSWORD).await.unwrap()
}
