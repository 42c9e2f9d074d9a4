use actix_web::{
    http::{header, StatusCode},
    HttpResponse,
};
use pr_core::errors::{AuthError, DomainError, TokenError, ValidationError};
use pr_shared::ErrorResponse;
use serde_json::json;
use std::collections::HashMap;

/// Message shared by every token rejection, whatever the internal cause
pub const INVALID_CREDENTIALS_MESSAGE: &str = "Could not validate credentials";

/// Build a JSON error response with the given status
pub fn error_response(
    status: StatusCode,
    error: &str,
    message: impl Into<String>,
) -> HttpResponse {
    HttpResponse::build(status).json(ErrorResponse::new(error, message))
}

/// `401` carrying the bearer challenge header
pub fn unauthorized(error: &str, message: impl Into<String>) -> HttpResponse {
    HttpResponse::Unauthorized()
        .insert_header((header::WWW_AUTHENTICATE, "Bearer"))
        .json(ErrorResponse::new(error, message))
}

/// Handle domain errors and convert them to appropriate HTTP responses
pub fn handle_domain_error(error: &DomainError) -> HttpResponse {
    match error {
        DomainError::Token(token_error) => match token_error {
            TokenError::InvalidToken => unauthorized("invalid_token", INVALID_CREDENTIALS_MESSAGE),
            TokenError::MissingCredentials => {
                unauthorized("missing_credentials", "Not authenticated")
            }
            TokenError::TokenGenerationFailed => {
                log::error!("Token generation failed");
                error_response(
                    StatusCode::INTERNAL_SERVER_ERROR,
                    "token_generation_failed",
                    "Could not issue tokens",
                )
            }
        },
        DomainError::Auth(auth_error) => match auth_error {
            AuthError::PrincipalNotFound => unauthorized("principal_not_found", "User not found"),
            AuthError::InvalidCredentials => {
                unauthorized("invalid_credentials", "Incorrect email or password")
            }
            AuthError::EmailAlreadyRegistered => error_response(
                StatusCode::BAD_REQUEST,
                "email_already_registered",
                "Email already registered",
            ),
            AuthError::RegistrationDisabled => error_response(
                StatusCode::SERVICE_UNAVAILABLE,
                "registration_disabled",
                "Registration is currently disabled",
            ),
        },
        DomainError::ValidationErr(validation_error) => match validation_error {
            ValidationError::RequiredField { field } => error_response(
                StatusCode::BAD_REQUEST,
                "required_field",
                format!("Required field: {}", field),
            ),
            ValidationError::InvalidEmail => {
                error_response(StatusCode::BAD_REQUEST, "invalid_email", "Invalid email format")
            }
            ValidationError::InvalidLength { field, min, max } => {
                let details = HashMap::from([
                    ("field".to_string(), json!(field)),
                    ("min".to_string(), json!(min)),
                    ("max".to_string(), json!(max)),
                ]);
                HttpResponse::BadRequest().json(
                    ErrorResponse::new(
                        "invalid_length",
                        format!("Invalid length for field {} (min: {}, max: {})", field, min, max),
                    )
                    .with_details(details),
                )
            }
        },
        DomainError::Validation { message } => {
            error_response(StatusCode::BAD_REQUEST, "validation_error", message.clone())
        }
        DomainError::NotFound { resource } => error_response(
            StatusCode::NOT_FOUND,
            "not_found",
            format!("{} not found", resource),
        ),
        DomainError::Database(message) => {
            log::error!("Database error: {}", message);
            error_response(
                StatusCode::INTERNAL_SERVER_ERROR,
                "internal_error",
                "An internal error occurred",
            )
        }
        DomainError::Internal { message } => {
            log::error!("Internal error: {}", message);
            error_response(
                StatusCode::INTERNAL_SERVER_ERROR,
                "internal_error",
                "An internal error occurred",
            )
        }
    }
}
