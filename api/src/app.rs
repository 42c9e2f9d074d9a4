//! Application factory
//!
//! Builds the Actix-web application from shared state. Used by `main` and by
//! the integration tests.

use actix_web::{
    body::MessageBody,
    dev::{ServiceFactory, ServiceRequest, ServiceResponse},
    error::InternalError,
    http::StatusCode,
    middleware::Logger,
    web, App, Error, HttpResponse,
};

use pr_core::repositories::UserRepository;

use crate::handlers::error::error_response;
use crate::middleware::auth::JwtAuth;
use crate::routes::auth::{
    login::{login, login_form},
    logout::logout,
    password::{password_recovery, password_reset},
    refresh::refresh,
    register::register,
    AppState,
};
use crate::routes::health::health_check;
use crate::routes::users::{
    collection::{create_user, list_users},
    item::{delete_user, get_user, update_user},
    me::me,
};

/// Create and configure the application with all dependencies
pub fn create_app<U>(
    app_state: web::Data<AppState<U>>,
) -> App<
    impl ServiceFactory<
        ServiceRequest,
        Config = (),
        Response = ServiceResponse<impl MessageBody>,
        Error = Error,
        InitError = (),
    >,
>
where
    U: UserRepository + 'static,
{
    let jwt_auth = JwtAuth::new(
        app_state.auth_service.token_service().clone(),
        &app_state.cookie_policy.access_cookie_name,
    );

    App::new()
        .app_data(app_state)
        .app_data(json_config())
        .app_data(form_config())
        .app_data(path_config())
        .wrap(Logger::default())
        .route("/_health", web::get().to(health_check))
        .service(
            web::scope("/api")
                .route("/register", web::post().to(register::<U>))
                .route("/login", web::post().to(login::<U>))
                .route("/login/OAuth2", web::post().to(login_form::<U>))
                .route("/refresh", web::post().to(refresh::<U>))
                .route("/logout", web::post().to(logout::<U>))
                .route("/password-recovery", web::post().to(password_recovery::<U>))
                .route("/password-reset", web::post().to(password_reset::<U>))
                .service(
                    web::scope("/users")
                        .wrap(jwt_auth)
                        .route("/me", web::get().to(me::<U>))
                        .service(
                            web::resource(["", "/"])
                                .route(web::get().to(list_users::<U>))
                                .route(web::post().to(create_user::<U>)),
                        )
                        .service(
                            web::resource("/{user_id}")
                                .route(web::get().to(get_user::<U>))
                                .route(web::put().to(update_user::<U>))
                                .route(web::delete().to(delete_user::<U>)),
                        ),
                ),
        )
        .default_service(web::route().to(not_found))
}

/// Malformed JSON bodies get the standard error envelope
fn json_config() -> web::JsonConfig {
    web::JsonConfig::default().error_handler(|err, _req| {
        let response = error_response(StatusCode::BAD_REQUEST, "invalid_request", err.to_string());
        InternalError::from_response(err, response).into()
    })
}

fn form_config() -> web::FormConfig {
    web::FormConfig::default().error_handler(|err, _req| {
        let response = error_response(StatusCode::BAD_REQUEST, "invalid_request", err.to_string());
        InternalError::from_response(err, response).into()
    })
}

/// Unparseable path segments (e.g. a non-numeric user id) are plain 404s
fn path_config() -> web::PathConfig {
    web::PathConfig::default().error_handler(|err, _req| {
        let response = error_response(StatusCode::NOT_FOUND, "not_found", err.to_string());
        InternalError::from_response(err, response).into()
    })
}

async fn not_found() -> HttpResponse {
    error_response(
        StatusCode::NOT_FOUND,
        "not_found",
        "The requested resource was not found",
    )
}
