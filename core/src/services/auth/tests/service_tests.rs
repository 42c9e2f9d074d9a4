//! Unit tests for authentication service

use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;

use chrono::{Duration, TimeZone, Utc};

use crate::errors::{AuthError, DomainError, DomainResult, TokenError, ValidationError};
use crate::repositories::{MockUserRepository, UserRepository};
use crate::services::auth::{AuthService, AuthServiceConfig, RegisterUser};
use crate::services::password::{BcryptPasswordHasher, PasswordHasher};
use crate::services::token::{ManualClock, TokenService, TokenServiceConfig};

const PASSWORD: &str = "correct-horse-battery";

struct Fixture {
    service: AuthService<MockUserRepository>,
    repository: Arc<MockUserRepository>,
    clock: Arc<ManualClock>,
}

fn create_fixture(config: AuthServiceConfig) -> Fixture {
    let clock = Arc::new(ManualClock::new(
        Utc.with_ymd_and_hms(2024, 6, 1, 9, 0, 0).unwrap(),
    ));
    let repository = Arc::new(MockUserRepository::new());
    let token_service = Arc::new(TokenService::with_clock(
        TokenServiceConfig::new("auth-test-secret"),
        clock.clone(),
    ));
    let service = AuthService::new(
        repository.clone(),
        Arc::new(BcryptPasswordHasher::new(4)),
        token_service,
        config,
    );
    Fixture {
        service,
        repository,
        clock,
    }
}

fn registration(email: &str) -> RegisterUser {
    RegisterUser {
        first_name: "Ana".to_string(),
        last_name: "Lima".to_string(),
        email: email.to_string(),
        phone: "+55 11 99999-0000".to_string(),
        full_address: "Rua das Flores 10, Sao Paulo".to_string(),
        recovery_bounty: Some(150.0),
        password: PASSWORD.to_string(),
    }
}

#[tokio::test]
async fn test_register_stores_hashed_password() {
    let fx = create_fixture(AuthServiceConfig::default());

    let user = fx
        .service
        .register(registration("  Ana@Example.com "))
        .await
        .unwrap();

    assert_eq!(user.id, 1);
    assert_eq!(user.email, "ana@example.com");
    assert_ne!(user.password_hash, PASSWORD);
    assert!(user.password_hash.starts_with("$2"));
    assert_eq!(user.hash.len(), 64);
}

#[tokio::test]
async fn test_register_rejects_duplicate_email() {
    let fx = create_fixture(AuthServiceConfig::default());
    fx.service
        .register(registration("ana@example.com"))
        .await
        .unwrap();

    let result = fx.service.register(registration("ANA@example.com")).await;

    assert!(matches!(
        result,
        Err(DomainError::Auth(AuthError::EmailAlreadyRegistered))
    ));
}

#[tokio::test]
async fn test_register_validates_input() {
    let fx = create_fixture(AuthServiceConfig::default());

    let result = fx.service.register(registration("not-an-email")).await;
    assert!(matches!(
        result,
        Err(DomainError::ValidationErr(ValidationError::InvalidEmail))
    ));

    let mut short = registration("ana@example.com");
    short.password = "short".to_string();
    match fx.service.register(short).await {
        Err(DomainError::ValidationErr(ValidationError::InvalidLength { field, min, max })) => {
            assert_eq!(field, "password");
            assert_eq!(min, 8);
            assert_eq!(max, 128);
        }
        other => panic!("expected InvalidLength, got {other:?}"),
    }

    assert_eq!(fx.repository.len().await, 0);
}

#[tokio::test]
async fn test_register_disabled() {
    let fx = create_fixture(AuthServiceConfig {
        allow_registration: false,
        ..AuthServiceConfig::default()
    });

    let result = fx.service.register(registration("ana@example.com")).await;

    assert!(matches!(
        result,
        Err(DomainError::Auth(AuthError::RegistrationDisabled))
    ));
}

#[tokio::test]
async fn test_login_issues_session_for_user() {
    let fx = create_fixture(AuthServiceConfig::default());
    let user = fx
        .service
        .register(registration("ana@example.com"))
        .await
        .unwrap();

    let (logged_in, tokens) = fx
        .service
        .login("Ana@Example.com", PASSWORD)
        .await
        .unwrap();

    assert_eq!(logged_in.id, user.id);
    assert_eq!(tokens.token_type, "bearer");
    assert_eq!(
        fx.service
            .token_service()
            .validate_and_extract(&tokens.access_token)
            .unwrap(),
        user.id
    );
}

#[tokio::test]
async fn test_login_rejects_wrong_password_and_unknown_email() {
    let fx = create_fixture(AuthServiceConfig::default());
    fx.service
        .register(registration("ana@example.com"))
        .await
        .unwrap();

    let wrong_password = fx.service.login("ana@example.com", "not-the-password").await;
    let unknown_email = fx.service.login("bob@example.com", PASSWORD).await;

    assert!(matches!(
        wrong_password,
        Err(DomainError::Auth(AuthError::InvalidCredentials))
    ));
    assert!(matches!(
        unknown_email,
        Err(DomainError::Auth(AuthError::InvalidCredentials))
    ));
}

/// Bcrypt hasher that counts `verify` calls
#[derive(Default)]
struct CountingHasher {
    verifies: AtomicUsize,
}

impl PasswordHasher for CountingHasher {
    fn hash(&self, plain: &str) -> DomainResult<String> {
        BcryptPasswordHasher::new(4).hash(plain)
    }

    fn verify(&self, plain: &str, hash: &str) -> DomainResult<bool> {
        self.verifies.fetch_add(1, Ordering::SeqCst);
        BcryptPasswordHasher::new(4).verify(plain, hash)
    }
}

#[tokio::test]
async fn test_unknown_email_still_checks_a_password_hash() {
    let hasher = Arc::new(CountingHasher::default());
    let service = AuthService::new(
        Arc::new(MockUserRepository::new()),
        hasher.clone(),
        Arc::new(TokenService::new(TokenServiceConfig::new("auth-test-secret"))),
        AuthServiceConfig::default(),
    );

    for _ in 0..2 {
        let result = service.login("nobody@example.com", PASSWORD).await;
        assert!(matches!(
            result,
            Err(DomainError::Auth(AuthError::InvalidCredentials))
        ));
    }

    assert_eq!(hasher.verifies.load(Ordering::SeqCst), 2);
}

#[tokio::test]
async fn test_refresh_rotates_tokens() {
    let fx = create_fixture(AuthServiceConfig::default());
    fx.service
        .register(registration("ana@example.com"))
        .await
        .unwrap();
    let (_, first) = fx.service.login("ana@example.com", PASSWORD).await.unwrap();

    fx.clock.advance(Duration::hours(1));
    let (user, second) = fx.service.refresh(&first.refresh_token).await.unwrap();

    assert_eq!(user.email, "ana@example.com");
    assert_ne!(second.refresh_token, first.refresh_token);
    assert_ne!(second.access_token, first.access_token);

    // the old access token has expired by now
    assert!(matches!(
        fx.service.authenticate(&first.access_token).await,
        Err(DomainError::Token(TokenError::InvalidToken))
    ));
    assert_eq!(
        fx.service.authenticate(&second.access_token).await.unwrap().id,
        user.id
    );
}

#[tokio::test]
async fn test_refresh_with_expired_token_fails() {
    let fx = create_fixture(AuthServiceConfig::default());
    fx.service
        .register(registration("ana@example.com"))
        .await
        .unwrap();
    let (_, tokens) = fx.service.login("ana@example.com", PASSWORD).await.unwrap();

    fx.clock.advance(Duration::days(3));

    assert!(matches!(
        fx.service.refresh(&tokens.refresh_token).await,
        Err(DomainError::Token(TokenError::InvalidToken))
    ));
}

#[tokio::test]
async fn test_authenticate_deleted_user_is_principal_not_found() {
    let fx = create_fixture(AuthServiceConfig::default());
    let user = fx
        .service
        .register(registration("ana@example.com"))
        .await
        .unwrap();
    let (_, tokens) = fx.service.login("ana@example.com", PASSWORD).await.unwrap();

    assert!(fx.repository.delete(user.id).await.unwrap());

    assert!(matches!(
        fx.service.authenticate(&tokens.access_token).await,
        Err(DomainError::Auth(AuthError::PrincipalNotFound))
    ));
    assert!(matches!(
        fx.service.refresh(&tokens.refresh_token).await,
        Err(DomainError::Auth(AuthError::PrincipalNotFound))
    ));
}

#[tokio::test]
async fn test_password_recovery_and_reset() {
    let fx = create_fixture(AuthServiceConfig::default());
    fx.service
        .register(registration("ana@example.com"))
        .await
        .unwrap();

    let token = fx
        .service
        .request_password_recovery("ana@example.com")
        .await
        .unwrap();
    fx.service
        .reset_password(&token, "a-brand-new-password")
        .await
        .unwrap();

    assert!(fx.service.login("ana@example.com", PASSWORD).await.is_err());
    assert!(fx
        .service
        .login("ana@example.com", "a-brand-new-password")
        .await
        .is_ok());
}

#[tokio::test]
async fn test_password_recovery_unknown_email() {
    let fx = create_fixture(AuthServiceConfig::default());

    let result = fx
        .service
        .request_password_recovery("nobody@example.com")
        .await;

    assert!(matches!(result, Err(DomainError::NotFound { .. })));
}

#[tokio::test]
async fn test_reset_password_with_expired_recovery_token() {
    let fx = create_fixture(AuthServiceConfig::default());
    let user = fx
        .service
        .register(registration("ana@example.com"))
        .await
        .unwrap();
    let token = fx
        .service
        .request_password_recovery("ana@example.com")
        .await
        .unwrap();

    fx.clock.advance(Duration::minutes(15));

    assert!(matches!(
        fx.service.reset_password(&token, "a-brand-new-password").await,
        Err(DomainError::Token(TokenError::InvalidToken))
    ));
    let stored = fx.repository.find_by_id(user.id).await.unwrap().unwrap();
    assert_eq!(stored.password_hash, user.password_hash);
}

#[tokio::test]
async fn test_reset_password_rejects_short_password() {
    let fx = create_fixture(AuthServiceConfig::default());
    fx.service
        .register(registration("ana@example.com"))
        .await
        .unwrap();
    let token = fx
        .service
        .request_password_recovery("ana@example.com")
        .await
        .unwrap();

    let result = fx.service.reset_password(&token, "short").await;

    assert!(matches!(
        result,
        Err(DomainError::ValidationErr(ValidationError::InvalidLength { .. }))
    ));
}
