use actix_web::{web, HttpResponse};
use pr_core::repositories::UserRepository;
use pr_core::services::auth::RegisterUser;

use crate::dto::user::UserOut;
use crate::handlers::error::handle_domain_error;
use crate::middleware::auth::AuthContext;
use crate::routes::auth::AppState;

/// Handler for GET /api/users/
///
/// ## Errors
/// - 401 Unauthorized: Missing or invalid token
pub async fn list_users<U>(state: web::Data<AppState<U>>, _auth: AuthContext) -> HttpResponse
where
    U: UserRepository + 'static,
{
    match state.user_service.list().await {
        Ok(users) => {
            HttpResponse::Ok().json(users.into_iter().map(UserOut::from).collect::<Vec<_>>())
        }
        Err(error) => handle_domain_error(&error),
    }
}

/// Handler for POST /api/users/
///
/// Same body as `/api/register`; creates the account without logging in.
///
/// ## Errors
/// - 400 Bad Request: Invalid input or email already registered
/// - 401 Unauthorized: Missing or invalid token
pub async fn create_user<U>(
    state: web::Data<AppState<U>>,
    auth: AuthContext,
    request: web::Json<RegisterUser>,
) -> HttpResponse
where
    U: UserRepository + 'static,
{
    match state.user_service.create(request.into_inner()).await {
        Ok(user) => {
            log::info!("User {} created by {}", user.id, auth.user_id);
            HttpResponse::Ok().json(UserOut::from(user))
        }
        Err(error) => handle_domain_error(&error),
    }
}
