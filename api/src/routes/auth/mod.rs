//! Authentication route handlers
//!
//! This module contains the account and session endpoints:
//! - Registration
//! - Login (JSON and OAuth2 form)
//! - Token refresh
//! - Logout
//! - Password recovery and reset

pub mod login;
pub mod logout;
pub mod password;
pub mod refresh;
pub mod register;

use std::sync::Arc;

use actix_web::{http::StatusCode, HttpResponse};
use pr_core::domain::entities::token::TokenPair;
use pr_core::repositories::UserRepository;
use pr_core::services::auth::AuthService;
use pr_core::services::user::UserService;
use pr_shared::config::Environment;

use crate::cookies::CookiePolicy;
use crate::dto::auth::TokenResponse;
use crate::handlers::error::error_response;

/// Application state shared across handlers
pub struct AppState<U>
where
    U: UserRepository,
{
    pub auth_service: Arc<AuthService<U>>,
    pub user_service: Arc<UserService<U>>,
    pub cookie_policy: CookiePolicy,
    pub environment: Environment,
}

impl<U> AppState<U>
where
    U: UserRepository,
{
    pub fn new(
        auth_service: Arc<AuthService<U>>,
        user_service: Arc<UserService<U>>,
        cookie_policy: CookiePolicy,
        environment: Environment,
    ) -> Self {
        Self {
            auth_service,
            user_service,
            cookie_policy,
            environment,
        }
    }
}

/// `200` with the token body and both session cookies set
pub(crate) fn session_response(policy: &CookiePolicy, tokens: &TokenPair) -> HttpResponse {
    let mut response = HttpResponse::Ok().json(TokenResponse::from(tokens));
    if let Err(e) = policy.set_session_cookies(&mut response, tokens) {
        log::error!("Failed to set session cookies: {}", e);
        return error_response(
            StatusCode::INTERNAL_SERVER_ERROR,
            "internal_error",
            "An internal error occurred",
        );
    }
    response
}
