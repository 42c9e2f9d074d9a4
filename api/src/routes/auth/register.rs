use actix_web::{web, HttpResponse};
use pr_core::repositories::UserRepository;
use pr_core::services::auth::RegisterUser;

use crate::dto::user::UserOut;
use crate::handlers::error::handle_domain_error;

use super::AppState;

/// Handler for POST /api/register
///
/// # Request Body
///
/// ```json
/// {
///     "first_name": "Ana",
///     "last_name": "Lima",
///     "email": "ana@example.com",
///     "phone": "+55 11 99999-0000",
///     "full_address": "Rua das Flores 10",
///     "recovery_bounty": 50.0,
///     "password": "at-least-8-chars"
/// }
/// ```
///
/// ## Errors
/// - 400 Bad Request: Invalid input or email already registered
pub async fn register<U>(
    state: web::Data<AppState<U>>,
    request: web::Json<RegisterUser>,
) -> HttpResponse
where
    U: UserRepository + 'static,
{
    match state.auth_service.register(request.into_inner()).await {
        Ok(user) => HttpResponse::Ok().json(UserOut::from(user)),
        Err(error) => handle_domain_error(&error),
    }
}
