use actix_web::{http::StatusCode, web, HttpResponse};
use pr_core::repositories::UserRepository;

use crate::dto::auth::MessageResponse;
use crate::handlers::error::error_response;

use super::AppState;

/// Handler for POST /api/logout
///
/// Clears both session cookies. Tokens already issued are not revoked and
/// stay usable until they expire.
///
/// # Response
///
/// ## Success (200 OK)
/// ```json
/// {
///     "message": "Logged out successfully"
/// }
/// ```
pub async fn logout<U>(state: web::Data<AppState<U>>) -> HttpResponse
where
    U: UserRepository + 'static,
{
    let mut response = HttpResponse::Ok().json(MessageResponse::new("Logged out successfully"));
    if let Err(e) = state.cookie_policy.clear_session_cookies(&mut response) {
        log::error!("Failed to clear session cookies: {}", e);
        return error_response(
            StatusCode::INTERNAL_SERVER_ERROR,
            "internal_error",
            "An internal error occurred",
        );
    }
    response
}
