//! In-memory implementation of UserRepository for tests and local runs

use async_trait::async_trait;
use std::collections::HashMap;
use std::sync::Arc;
use tokio::sync::RwLock;

use crate::domain::entities::token::PrincipalId;
use crate::domain::entities::user::{normalize_email, NewUser, User, UserProfile};
use crate::errors::{AuthError, DomainError};

use super::trait_::UserRepository;

#[derive(Default)]
struct Store {
    users: HashMap<PrincipalId, User>,
    last_id: PrincipalId,
}

/// Mock user repository; ids start at 1 and only grow
#[derive(Clone, Default)]
pub struct MockUserRepository {
    store: Arc<RwLock<Store>>,
}

impl MockUserRepository {
    /// Create a new mock repository
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of stored users
    pub async fn len(&self) -> usize {
        self.store.read().await.users.len()
    }

    pub async fn is_empty(&self) -> bool {
        self.len().await == 0
    }
}

#[async_trait]
impl UserRepository for MockUserRepository {
    async fn find_by_id(&self, id: PrincipalId) -> Result<Option<User>, DomainError> {
        let store = self.store.read().await;
        Ok(store.users.get(&id).cloned())
    }

    async fn find_by_email(&self, email: &str) -> Result<Option<User>, DomainError> {
        let store = self.store.read().await;
        Ok(store.users.values().find(|u| u.email == email).cloned())
    }

    async fn create(&self, user: NewUser) -> Result<User, DomainError> {
        let mut store = self.store.write().await;

        if store.users.values().any(|u| u.email == user.email) {
            return Err(DomainError::Auth(AuthError::EmailAlreadyRegistered));
        }

        store.last_id += 1;
        let user = User::from_new(store.last_id, user);
        store.users.insert(user.id, user.clone());
        Ok(user)
    }

    async fn update_password(
        &self,
        id: PrincipalId,
        password_hash: &str,
    ) -> Result<bool, DomainError> {
        let mut store = self.store.write().await;
        match store.users.get_mut(&id) {
            Some(user) => {
                user.password_hash = password_hash.to_string();
                Ok(true)
            }
            None => Ok(false),
        }
    }

    async fn list(&self) -> Result<Vec<User>, DomainError> {
        let store = self.store.read().await;
        let mut users: Vec<User> = store.users.values().cloned().collect();
        users.sort_by_key(|u| u.id);
        Ok(users)
    }

    async fn update_profile(
        &self,
        id: PrincipalId,
        profile: &UserProfile,
    ) -> Result<Option<User>, DomainError> {
        let mut store = self.store.write().await;

        let email = normalize_email(&profile.email);
        if store.users.values().any(|u| u.id != id && u.email == email) {
            return Err(DomainError::Auth(AuthError::EmailAlreadyRegistered));
        }

        Ok(store.users.get_mut(&id).map(|user| {
            user.apply_profile(profile);
            user.clone()
        }))
    }

    async fn delete(&self, id: PrincipalId) -> Result<bool, DomainError> {
        Ok(self.store.write().await.users.remove(&id).is_some())
    }
}
