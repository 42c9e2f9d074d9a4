use actix_web::{web, HttpResponse};
use pr_core::domain::entities::token::PrincipalId;
use pr_core::repositories::UserRepository;
use pr_core::services::user::UpdateUser;

use crate::dto::auth::MessageResponse;
use crate::dto::user::UserOut;
use crate::handlers::error::handle_domain_error;
use crate::middleware::auth::AuthContext;
use crate::routes::auth::AppState;

/// Handler for GET /api/users/{user_id}
///
/// ## Errors
/// - 401 Unauthorized: Missing or invalid token
/// - 404 Not Found: No such user
pub async fn get_user<U>(
    state: web::Data<AppState<U>>,
    _auth: AuthContext,
    path: web::Path<PrincipalId>,
) -> HttpResponse
where
    U: UserRepository + 'static,
{
    match state.user_service.get(path.into_inner()).await {
        Ok(user) => HttpResponse::Ok().json(UserOut::from(user)),
        Err(error) => handle_domain_error(&error),
    }
}

/// Handler for PUT /api/users/{user_id}
///
/// Replaces the profile fields; the password is left untouched.
///
/// ## Errors
/// - 400 Bad Request: Invalid input or email taken by another user
/// - 401 Unauthorized: Missing or invalid token
/// - 404 Not Found: No such user
pub async fn update_user<U>(
    state: web::Data<AppState<U>>,
    _auth: AuthContext,
    path: web::Path<PrincipalId>,
    request: web::Json<UpdateUser>,
) -> HttpResponse
where
    U: UserRepository + 'static,
{
    match state
        .user_service
        .update(path.into_inner(), request.into_inner())
        .await
    {
        Ok(user) => HttpResponse::Ok().json(UserOut::from(user)),
        Err(error) => handle_domain_error(&error),
    }
}

/// Handler for DELETE /api/users/{user_id}
///
/// Tokens already issued to the deleted user keep their signature but no
/// longer resolve to a principal.
///
/// ## Errors
/// - 401 Unauthorized: Missing or invalid token
/// - 404 Not Found: No such user
pub async fn delete_user<U>(
    state: web::Data<AppState<U>>,
    auth: AuthContext,
    path: web::Path<PrincipalId>,
) -> HttpResponse
where
    U: UserRepository + 'static,
{
    let user_id = path.into_inner();
    match state.user_service.delete(user_id).await {
        Ok(()) => {
            log::info!("User {} deleted by {}", user_id, auth.user_id);
            HttpResponse::Ok().json(MessageResponse::new("User deleted successfully"))
        }
        Err(error) => handle_domain_error(&error),
    }
}
