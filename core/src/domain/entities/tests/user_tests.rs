//! Unit tests for the user entity

use crate::domain::entities::user::{normalize_email, NewUser, User, UserProfile};

fn new_user() -> NewUser {
    NewUser::new(
        "Ada".to_string(),
        "Lovelace".to_string(),
        "  Ada@Example.COM ".to_string(),
        "555-0100".to_string(),
        "1 Analytical Way".to_string(),
        Some(50.0),
        "$2b$04$hash".to_string(),
    )
}

#[test]
fn test_new_user_normalizes_email_and_generates_hash() {
    let user = new_user();

    assert_eq!(user.email, "ada@example.com");
    assert_eq!(user.hash.len(), 64);
    assert!(user.hash.chars().all(|c| c.is_ascii_hexdigit()));
    assert_ne!(user.hash, new_user().hash);
}

#[test]
fn test_user_from_new_keeps_fields() {
    let user = User::from_new(3, new_user());

    assert_eq!(user.id, 3);
    assert_eq!(user.full_name(), "Ada Lovelace");
    assert_eq!(user.recovery_bounty, Some(50.0));
}

#[test]
fn test_password_hash_is_never_serialized() {
    let user = User::from_new(3, new_user());
    let json = serde_json::to_value(&user).unwrap();

    assert!(json.get("password_hash").is_none());
    assert_eq!(json["email"], "ada@example.com");
}

#[test]
fn test_normalize_email() {
    assert_eq!(normalize_email(" Foo@Bar.io"), "foo@bar.io");
}

#[test]
fn test_apply_profile_keeps_identity_and_password() {
    let mut user = User::from_new(3, new_user());
    let original = user.clone();

    user.apply_profile(&UserProfile {
        first_name: "Augusta".to_string(),
        last_name: "King".to_string(),
        email: " Augusta@Example.com".to_string(),
        phone: "555-0101".to_string(),
        full_address: "2 Difference Rd".to_string(),
        recovery_bounty: None,
    });

    assert_eq!(user.first_name, "Augusta");
    assert_eq!(user.email, "augusta@example.com");
    assert_eq!(user.recovery_bounty, None);
    assert_eq!(user.id, original.id);
    assert_eq!(user.hash, original.hash);
    assert_eq!(user.password_hash, original.password_hash);
    assert_eq!(user.created_at, original.created_at);
}
