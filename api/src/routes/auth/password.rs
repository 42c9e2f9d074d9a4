use actix_web::{http::StatusCode, web, HttpResponse};
use pr_core::errors::{DomainError, TokenError};
use pr_core::repositories::UserRepository;
use validator::Validate;

use crate::dto::auth::{
    MessageResponse, PasswordRecoveryRequest, PasswordRecoveryResponse, PasswordResetRequest,
};
use crate::handlers::error::{error_response, handle_domain_error};

use super::AppState;

/// Handler for POST /api/password-recovery
///
/// Mints a short-lived recovery token. No mail is sent; outside production
/// the token is echoed in the response so the flow can be exercised.
///
/// ## Errors
/// - 400 Bad Request: Malformed email
/// - 404 Not Found: No user with that email
pub async fn password_recovery<U>(
    state: web::Data<AppState<U>>,
    request: web::Json<PasswordRecoveryRequest>,
) -> HttpResponse
where
    U: UserRepository + 'static,
{
    if request.validate().is_err() {
        return error_response(StatusCode::BAD_REQUEST, "invalid_email", "Invalid email format");
    }

    match state
        .auth_service
        .request_password_recovery(&request.email)
        .await
    {
        Ok(token) => {
            let token = (!state.environment.is_production()).then_some(token);
            HttpResponse::Ok().json(PasswordRecoveryResponse {
                message: "Recovery email sent".to_string(),
                token,
            })
        }
        Err(error) => handle_domain_error(&error),
    }
}

/// Handler for POST /api/password-reset
///
/// Recovery tokens carry no purpose claim, so any unexpired token this
/// service signed (including a session access or refresh token) is accepted.
///
/// ## Errors
/// - 400 Bad Request: Invalid or expired token, or a password that is too short
/// - 401 Unauthorized: The user behind the token no longer exists
pub async fn password_reset<U>(
    state: web::Data<AppState<U>>,
    request: web::Json<PasswordResetRequest>,
) -> HttpResponse
where
    U: UserRepository + 'static,
{
    match state
        .auth_service
        .reset_password(&request.token, &request.new_password)
        .await
    {
        Ok(()) => HttpResponse::Ok().json(MessageResponse::new("Password reset successful")),
        Err(DomainError::Token(TokenError::InvalidToken)) => error_response(
            StatusCode::BAD_REQUEST,
            "invalid_token",
            "Invalid or expired token",
        ),
        Err(error) => handle_domain_error(&error),
    }
}
