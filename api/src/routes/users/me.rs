use actix_web::{web, HttpResponse};
use pr_core::repositories::UserRepository;

use crate::dto::user::UserOut;
use crate::handlers::error::handle_domain_error;
use crate::middleware::auth::AuthContext;
use crate::routes::auth::AppState;

/// Handler for GET /api/users/me
///
/// Requires a valid access token, as a bearer header or cookie.
///
/// ## Errors
/// - 401 Unauthorized: Missing or invalid token, or the user was deleted
pub async fn me<U>(state: web::Data<AppState<U>>, auth: AuthContext) -> HttpResponse
where
    U: UserRepository + 'static,
{
    match state.auth_service.current_user(auth.user_id).await {
        Ok(user) => HttpResponse::Ok().json(UserOut::from(user)),
        Err(error) => handle_domain_error(&error),
    }
}
