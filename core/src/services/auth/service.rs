//! Main authentication service implementation

use std::sync::{Arc, OnceLock};

use serde::Deserialize;
use validator::{Validate, ValidationErrors};

use crate::domain::entities::token::{PrincipalId, TokenPair};
use crate::domain::entities::user::{normalize_email, User};
use crate::errors::{AuthError, DomainError, DomainResult, ValidationError};
use crate::repositories::UserRepository;
use crate::services::password::{BcryptPasswordHasher, PasswordHasher};
use crate::services::token::TokenService;
use crate::services::user::create_account;

use super::config::AuthServiceConfig;

/// Registration input
#[derive(Debug, Clone, Deserialize, Validate)]
pub struct RegisterUser {
    #[validate(length(min = 1, max = 255))]
    pub first_name: String,
    #[validate(length(min = 1, max = 255))]
    pub last_name: String,
    #[validate(email)]
    pub email: String,
    #[validate(length(min = 1, max = 255))]
    pub phone: String,
    #[validate(length(min = 1, max = 1024))]
    pub full_address: String,
    #[serde(default)]
    pub recovery_bounty: Option<f64>,
    #[validate(length(min = 8, max = 128))]
    pub password: String,
}

#[derive(Validate)]
struct NewPassword {
    #[validate(length(min = 8, max = 128))]
    password: String,
}

/// Authentication service for account and session flows
pub struct AuthService<U, H = BcryptPasswordHasher>
where
    U: UserRepository,
    H: PasswordHasher,
{
    /// User repository for persistence
    user_repository: Arc<U>,
    /// Password hash primitive
    password_hasher: Arc<H>,
    /// Token service for JWT management
    token_service: Arc<TokenService>,
    /// Service configuration
    config: AuthServiceConfig,
    /// Hash checked against on unknown emails so both login failures cost the same
    decoy_hash: OnceLock<String>,
}

impl<U, H> AuthService<U, H>
where
    U: UserRepository,
    H: PasswordHasher,
{
    /// Create a new authentication service
    pub fn new(
        user_repository: Arc<U>,
        password_hasher: Arc<H>,
        token_service: Arc<TokenService>,
        config: AuthServiceConfig,
    ) -> Self {
        Self {
            user_repository,
            password_hasher,
            token_service,
            config,
            decoy_hash: OnceLock::new(),
        }
    }

    /// Token service used for minting and validation
    pub fn token_service(&self) -> &Arc<TokenService> {
        &self.token_service
    }

    /// Register a new user
    ///
    /// # Errors
    /// * `ValidationError` - malformed input
    /// * `AuthError::EmailAlreadyRegistered` - email taken
    /// * `AuthError::RegistrationDisabled` - registration switched off
    pub async fn register(&self, input: RegisterUser) -> DomainResult<User> {
        if !self.config.allow_registration {
            return Err(DomainError::Auth(AuthError::RegistrationDisabled));
        }

        let user = create_account(
            self.user_repository.as_ref(),
            self.password_hasher.as_ref(),
            input,
        )
        .await?;
        tracing::info!(user_id = user.id, "User registered");
        Ok(user)
    }

    /// Authenticate with email and password and issue a session
    ///
    /// Unknown email and wrong password both yield
    /// `AuthError::InvalidCredentials`.
    pub async fn login(&self, email: &str, password: &str) -> DomainResult<(User, TokenPair)> {
        let Some(user) = self
            .user_repository
            .find_by_email(&normalize_email(email))
            .await?
        else {
            self.verify_against_decoy(password);
            return Err(DomainError::Auth(AuthError::InvalidCredentials));
        };

        if !self.password_hasher.verify(password, &user.password_hash)? {
            tracing::info!(user_id = user.id, "Login rejected: wrong password");
            return Err(DomainError::Auth(AuthError::InvalidCredentials));
        }

        let tokens = self.token_service.issue_session(user.id)?;
        tracing::info!(user_id = user.id, "User logged in");
        Ok((user, tokens))
    }

    /// Exchange a refresh token for a brand-new token pair
    pub async fn refresh(&self, refresh_token: &str) -> DomainResult<(User, TokenPair)> {
        let user = self.authenticate(refresh_token).await?;
        let tokens = self.token_service.issue_session(user.id)?;
        tracing::debug!(user_id = user.id, "Session refreshed");
        Ok((user, tokens))
    }

    /// Validate a token and load the user it names
    pub async fn authenticate(&self, token: &str) -> DomainResult<User> {
        let principal_id = self.token_service.validate_and_extract(token)?;
        self.current_user(principal_id).await
    }

    /// Load the user behind an already-validated principal id
    ///
    /// # Errors
    /// * `AuthError::PrincipalNotFound` - the user no longer exists
    pub async fn current_user(&self, principal_id: PrincipalId) -> DomainResult<User> {
        self.user_repository
            .find_by_id(principal_id)
            .await?
            .ok_or(DomainError::Auth(AuthError::PrincipalNotFound))
    }

    /// Mint a short-lived recovery token for the account behind `email`
    pub async fn request_password_recovery(&self, email: &str) -> DomainResult<String> {
        let user = self
            .user_repository
            .find_by_email(&normalize_email(email))
            .await?
            .ok_or_else(|| DomainError::NotFound {
                resource: "User".to_string(),
            })?;

        let token = self
            .token_service
            .mint_access_token(user.id, self.config.recovery_token_ttl)?;
        tracing::info!(user_id = user.id, "Password recovery requested");
        Ok(token)
    }

    /// Replace the password of the user named by a recovery token
    pub async fn reset_password(&self, token: &str, new_password: &str) -> DomainResult<()> {
        NewPassword {
            password: new_password.to_string(),
        }
        .validate()
        .map_err(first_validation_error)?;

        let user = self.authenticate(token).await?;
        let password_hash = self.password_hasher.hash(new_password)?;

        if !self
            .user_repository
            .update_password(user.id, &password_hash)
            .await?
        {
            return Err(DomainError::Auth(AuthError::PrincipalNotFound));
        }

        tracing::info!(user_id = user.id, "Password reset");
        Ok(())
    }
}

/// Plain text behind the decoy hash; never matches a real login
const DECOY_PASSWORD: &str = "decoy-password-for-unknown-accounts";

impl<U, H> AuthService<U, H>
where
    U: UserRepository,
    H: PasswordHasher,
{
    /// Run one hash check on a missing account, discarding the outcome
    fn verify_against_decoy(&self, password: &str) {
        let hash = match self.decoy_hash.get() {
            Some(hash) => hash,
            None => match self.password_hasher.hash(DECOY_PASSWORD) {
                Ok(hash) => self.decoy_hash.get_or_init(|| hash),
                Err(_) => return,
            },
        };
        let _ = self.password_hasher.verify(password, hash);
    }
}

/// Reduce `validator` output to a single domain error, picking fields in name order
pub(crate) fn first_validation_error(errors: ValidationErrors) -> DomainError {
    let field_errors = errors.field_errors();
    let mut fields: Vec<&&str> = field_errors.keys().collect();
    fields.sort();

    let Some(field) = fields.first() else {
        return DomainError::Validation {
            message: errors.to_string(),
        };
    };
    let field = **field;

    if field == "email" {
        return DomainError::ValidationErr(ValidationError::InvalidEmail);
    }

    let error = field_errors[field].first();
    match error {
        Some(e) if e.code == "length" => {
            let bound = |name: &str| e.params.get(name).and_then(|v| v.as_u64()).unwrap_or(0);
            DomainError::ValidationErr(ValidationError::InvalidLength {
                field: field.to_string(),
                min: bound("min"),
                max: bound("max"),
            })
        }
        _ => DomainError::ValidationErr(ValidationError::RequiredField {
            field: field.to_string(),
        }),
    }
}
