//! User management service implementation

use std::sync::Arc;

use serde::Deserialize;
use validator::Validate;

use crate::domain::entities::token::PrincipalId;
use crate::domain::entities::user::{normalize_email, NewUser, User, UserProfile};
use crate::errors::{AuthError, DomainError, DomainResult};
use crate::repositories::UserRepository;
use crate::services::auth::{first_validation_error, RegisterUser};
use crate::services::password::{BcryptPasswordHasher, PasswordHasher};

/// Profile update input; the password is changed through reset only
#[derive(Debug, Clone, Deserialize, Validate)]
pub struct UpdateUser {
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
}

impl From<UpdateUser> for UserProfile {
    fn from(input: UpdateUser) -> Self {
        Self {
            first_name: input.first_name,
            last_name: input.last_name,
            email: normalize_email(&input.email),
            phone: input.phone,
            full_address: input.full_address,
            recovery_bounty: input.recovery_bounty,
        }
    }
}

/// Validate, hash and store a new account
pub(crate) async fn create_account<U, H>(
    repository: &U,
    hasher: &H,
    input: RegisterUser,
) -> DomainResult<User>
where
    U: UserRepository + ?Sized,
    H: PasswordHasher + ?Sized,
{
    input.validate().map_err(first_validation_error)?;

    let email = normalize_email(&input.email);
    if repository.exists_by_email(&email).await? {
        return Err(DomainError::Auth(AuthError::EmailAlreadyRegistered));
    }

    let password_hash = hasher.hash(&input.password)?;
    let new_user = NewUser::new(
        input.first_name,
        input.last_name,
        email,
        input.phone,
        input.full_address,
        input.recovery_bounty,
        password_hash,
    );

    repository.create(new_user).await
}

fn user_not_found() -> DomainError {
    DomainError::NotFound {
        resource: "User".to_string(),
    }
}

/// Service for managing user accounts
pub struct UserService<U, H = BcryptPasswordHasher>
where
    U: UserRepository,
    H: PasswordHasher,
{
    user_repository: Arc<U>,
    password_hasher: Arc<H>,
}

impl<U, H> UserService<U, H>
where
    U: UserRepository,
    H: PasswordHasher,
{
    pub fn new(user_repository: Arc<U>, password_hasher: Arc<H>) -> Self {
        Self {
            user_repository,
            password_hasher,
        }
    }

    /// Create an account on behalf of an authenticated caller
    ///
    /// Unlike self-registration this is not affected by the registration
    /// switch.
    pub async fn create(&self, input: RegisterUser) -> DomainResult<User> {
        let user = create_account(
            self.user_repository.as_ref(),
            self.password_hasher.as_ref(),
            input,
        )
        .await?;
        tracing::info!(user_id = user.id, "User created");
        Ok(user)
    }

    /// All users, ordered by id
    pub async fn list(&self) -> DomainResult<Vec<User>> {
        self.user_repository.list().await
    }

    /// # Errors
    /// * `DomainError::NotFound` - no user with that id
    pub async fn get(&self, id: PrincipalId) -> DomainResult<User> {
        self.user_repository
            .find_by_id(id)
            .await?
            .ok_or_else(user_not_found)
    }

    /// Replace the profile fields of a user
    ///
    /// # Errors
    /// * `ValidationError` - malformed input
    /// * `AuthError::EmailAlreadyRegistered` - email belongs to another user
    /// * `DomainError::NotFound` - no user with that id
    pub async fn update(&self, id: PrincipalId, input: UpdateUser) -> DomainResult<User> {
        input.validate().map_err(first_validation_error)?;

        let user = self
            .user_repository
            .update_profile(id, &UserProfile::from(input))
            .await?
            .ok_or_else(user_not_found)?;
        tracing::info!(user_id = id, "User updated");
        Ok(user)
    }

    /// Delete a user; tokens already issued to them stop resolving
    ///
    /// # Errors
    /// * `DomainError::NotFound` - no user with that id
    pub async fn delete(&self, id: PrincipalId) -> DomainResult<()> {
        if !self.user_repository.delete(id).await? {
            return Err(user_not_found());
        }
        tracing::info!(user_id = id, "User deleted");
        Ok(())
    }
}
