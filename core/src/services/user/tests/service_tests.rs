//! Unit tests for the user management service

use std::sync::Arc;

use crate::errors::{AuthError, DomainError, ValidationError};
use crate::repositories::{MockUserRepository, UserRepository};
use crate::services::auth::RegisterUser;
use crate::services::password::BcryptPasswordHasher;
use crate::services::user::{UpdateUser, UserService};

fn create_service() -> (UserService<MockUserRepository>, Arc<MockUserRepository>) {
    let repository = Arc::new(MockUserRepository::new());
    let service = UserService::new(repository.clone(), Arc::new(BcryptPasswordHasher::new(4)));
    (service, repository)
}

fn account(email: &str) -> RegisterUser {
    RegisterUser {
        first_name: "Caio".to_string(),
        last_name: "Prado".to_string(),
        email: email.to_string(),
        phone: "+55 31 97777-0000".to_string(),
        full_address: "Rua da Bahia 1200".to_string(),
        recovery_bounty: None,
        password: "long-enough-password".to_string(),
    }
}

fn update(email: &str) -> UpdateUser {
    UpdateUser {
        first_name: "Caio".to_string(),
        last_name: "Moreira".to_string(),
        email: email.to_string(),
        phone: "+55 31 96666-0000".to_string(),
        full_address: "Praca da Liberdade 1".to_string(),
        recovery_bounty: Some(300.0),
    }
}

#[tokio::test]
async fn test_create_hashes_password_and_rejects_duplicates() {
    let (service, _) = create_service();

    let user = service.create(account(" Caio@Example.com")).await.unwrap();
    assert_eq!(user.email, "caio@example.com");
    assert!(user.password_hash.starts_with("$2"));

    let duplicate = service.create(account("caio@example.com")).await;
    assert!(matches!(
        duplicate,
        Err(DomainError::Auth(AuthError::EmailAlreadyRegistered))
    ));
}

#[tokio::test]
async fn test_list_and_get() {
    let (service, _) = create_service();
    let first = service.create(account("a@example.com")).await.unwrap();
    service.create(account("b@example.com")).await.unwrap();

    let users = service.list().await.unwrap();
    assert_eq!(users.len(), 2);
    assert_eq!(users[0].id, first.id);

    assert_eq!(service.get(first.id).await.unwrap().email, "a@example.com");
    assert!(matches!(
        service.get(42).await,
        Err(DomainError::NotFound { .. })
    ));
}

#[tokio::test]
async fn test_update_profile() {
    let (service, repository) = create_service();
    let user = service.create(account("a@example.com")).await.unwrap();

    let updated = service.update(user.id, update("new@example.com")).await.unwrap();

    assert_eq!(updated.last_name, "Moreira");
    assert_eq!(updated.recovery_bounty, Some(300.0));
    assert_eq!(updated.password_hash, user.password_hash);
    assert!(repository.exists_by_email("new@example.com").await.unwrap());
}

#[tokio::test]
async fn test_update_errors() {
    let (service, _) = create_service();
    let user = service.create(account("a@example.com")).await.unwrap();
    service.create(account("b@example.com")).await.unwrap();

    assert!(matches!(
        service.update(user.id, update("b@example.com")).await,
        Err(DomainError::Auth(AuthError::EmailAlreadyRegistered))
    ));
    assert!(matches!(
        service.update(user.id, update("not-an-email")).await,
        Err(DomainError::ValidationErr(ValidationError::InvalidEmail))
    ));
    assert!(matches!(
        service.update(99, update("c@example.com")).await,
        Err(DomainError::NotFound { .. })
    ));
}

#[tokio::test]
async fn test_delete() {
    let (service, repository) = create_service();
    let user = service.create(account("a@example.com")).await.unwrap();

    service.delete(user.id).await.unwrap();

    assert!(repository.is_empty().await);
    assert!(matches!(
        service.delete(user.id).await,
        Err(DomainError::NotFound { .. })
    ));
}
