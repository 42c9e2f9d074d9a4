//! User repository trait defining the interface for user data persistence.
//!
//! The trait is async-first; implementations live in the infrastructure
//! layer (SQLite) and in [`super::mock`] (in-memory).

use async_trait::async_trait;

use crate::domain::entities::token::PrincipalId;
use crate::domain::entities::user::{NewUser, User, UserProfile};
use crate::errors::DomainError;

/// Repository trait for User entity persistence operations
#[async_trait]
pub trait UserRepository: Send + Sync {
    /// Find a user by their unique identifier
    ///
    /// # Returns
    /// * `Ok(Some(User))` - User found
    /// * `Ok(None)` - No user with that id
    /// * `Err(DomainError)` - Storage failure
    async fn find_by_id(&self, id: PrincipalId) -> Result<Option<User>, DomainError>;

    /// Find a user by (normalized) email
    async fn find_by_email(&self, email: &str) -> Result<Option<User>, DomainError>;

    /// Persist a new user and return it with its assigned id
    ///
    /// Fails with `AuthError::EmailAlreadyRegistered` when the email is taken.
    async fn create(&self, user: NewUser) -> Result<User, DomainError>;

    /// Replace the stored password hash
    ///
    /// # Returns
    /// * `Ok(true)` - Password updated
    /// * `Ok(false)` - User not found
    async fn update_password(
        &self,
        id: PrincipalId,
        password_hash: &str,
    ) -> Result<bool, DomainError>;

    /// All users, ordered by id
    async fn list(&self) -> Result<Vec<User>, DomainError>;

    /// Replace the profile fields of a user
    ///
    /// # Returns
    /// * `Ok(Some(User))` - The updated user
    /// * `Ok(None)` - User not found
    /// * `Err(AuthError::EmailAlreadyRegistered)` - Email belongs to another user
    async fn update_profile(
        &self,
        id: PrincipalId,
        profile: &UserProfile,
    ) -> Result<Option<User>, DomainError>;

    /// Delete a user; `Ok(false)` when there was nothing to delete
    async fn delete(&self, id: PrincipalId) -> Result<bool, DomainError>;

    /// Check if a user exists with the given email
    async fn exists_by_email(&self, email: &str) -> Result<bool, DomainError> {
        Ok(self.find_by_email(email).await?.is_some())
    }
}
