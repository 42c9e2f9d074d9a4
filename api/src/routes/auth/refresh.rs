use actix_web::{web, HttpRequest, HttpResponse};
use pr_core::errors::{DomainError, TokenError};
use pr_core::repositories::UserRepository;

use crate::dto::auth::RefreshTokenRequest;
use crate::handlers::error::handle_domain_error;

use super::{session_response, AppState};

/// Handler for POST /api/refresh
///
/// The refresh token is read from the JSON body when given, otherwise
/// from the refresh cookie. A brand-new pair is issued every time.
///
/// ## Errors
/// - 401 Unauthorized: Missing, invalid or expired refresh token, or the
///   user no longer exists
pub async fn refresh<U>(
    req: HttpRequest,
    state: web::Data<AppState<U>>,
    body: Option<web::Json<RefreshTokenRequest>>,
) -> HttpResponse
where
    U: UserRepository + 'static,
{
    let from_body = body
        .and_then(|b| b.into_inner().refresh_token)
        .filter(|t| !t.is_empty());
    let token = from_body.or_else(|| {
        req.cookie(&state.cookie_policy.refresh_cookie_name)
            .map(|c| c.value().to_string())
            .filter(|t| !t.is_empty())
    });

    let Some(token) = token else {
        return handle_domain_error(&DomainError::Token(TokenError::MissingCredentials));
    };

    match state.auth_service.refresh(&token).await {
        Ok((_, tokens)) => session_response(&state.cookie_policy, &tokens),
        Err(error) => handle_domain_error(&error),
    }
}
