use actix_web::{web, HttpResponse};
use pr_core::repositories::UserRepository;

use crate::dto::auth::{LoginRequest, OAuth2PasswordForm};
use crate::handlers::error::handle_domain_error;

use super::{session_response, AppState};

/// Handler for POST /api/login
///
/// Returns `{access_token, refresh_token, token_type}` and sets both
/// session cookies.
///
/// ## Errors
/// - 401 Unauthorized: Incorrect email or password
pub async fn login<U>(
    state: web::Data<AppState<U>>,
    request: web::Json<LoginRequest>,
) -> HttpResponse
where
    U: UserRepository + 'static,
{
    authenticate(&state, &request.email, &request.password).await
}

/// Handler for POST /api/login/OAuth2
///
/// Form-encoded variant; `username` carries the email.
pub async fn login_form<U>(
    state: web::Data<AppState<U>>,
    form: web::Form<OAuth2PasswordForm>,
) -> HttpResponse
where
    U: UserRepository + 'static,
{
    authenticate(&state, &form.username, &form.password).await
}

async fn authenticate<U>(state: &AppState<U>, email: &str, password: &str) -> HttpResponse
where
    U: UserRepository + 'static,
{
    match state.auth_service.login(email, password).await {
        Ok((_, tokens)) => session_response(&state.cookie_policy, &tokens),
        Err(error) => handle_domain_error(&error),
    }
}
