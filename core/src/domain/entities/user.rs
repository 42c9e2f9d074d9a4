//! User entity representing a registered pet owner.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sha2::{Digest, Sha256};
use uuid::Uuid;

use super::token::PrincipalId;

/// User entity representing a registered user
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct User {
    /// Unique identifier for the user
    pub id: PrincipalId,

    pub first_name: String,

    pub last_name: String,

    /// Login email, unique across users
    pub email: String,

    pub phone: String,

    pub full_address: String,

    /// Reward offered to whoever returns the pet
    pub recovery_bounty: Option<f64>,

    /// Public share identifier (64 hex chars)
    pub hash: String,

    /// Bcrypt hash of the password
    #[serde(skip_serializing, default)]
    pub password_hash: String,

    /// Timestamp when the user was created
    pub created_at: DateTime<Utc>,
}

impl User {
    /// Builds a persisted user from a registration payload and its new id
    pub fn from_new(id: PrincipalId, new_user: NewUser) -> Self {
        Self {
            id,
            first_name: new_user.first_name,
            last_name: new_user.last_name,
            email: new_user.email,
            phone: new_user.phone,
            full_address: new_user.full_address,
            recovery_bounty: new_user.recovery_bounty,
            hash: new_user.hash,
            password_hash: new_user.password_hash,
            created_at: new_user.created_at,
        }
    }

    /// Full display name
    pub fn full_name(&self) -> String {
        format!("{} {}", self.first_name, self.last_name)
    }
}

/// A user that has not been persisted yet
#[derive(Debug, Clone, PartialEq)]
pub struct NewUser {
    pub first_name: String,
    pub last_name: String,
    pub email: String,
    pub phone: String,
    pub full_address: String,
    pub recovery_bounty: Option<f64>,
    pub hash: String,
    pub password_hash: String,
    pub created_at: DateTime<Utc>,
}

impl NewUser {
    /// Creates a registration record with a fresh share hash
    #[allow(clippy::too_many_arguments)]
    pub fn new(
        first_name: String,
        last_name: String,
        email: String,
        phone: String,
        full_address: String,
        recovery_bounty: Option<f64>,
        password_hash: String,
    ) -> Self {
        Self {
            first_name,
            last_name,
            email: normalize_email(&email),
            phone,
            full_address,
            recovery_bounty,
            hash: generate_share_hash(),
            password_hash,
            created_at: Utc::now(),
        }
    }
}

/// Editable profile fields of a user
///
/// Identity (`id`, `hash`, `created_at`) and the password are never changed
/// through a profile update.
#[derive(Debug, Clone, PartialEq)]
pub struct UserProfile {
    pub first_name: String,
    pub last_name: String,
    pub email: String,
    pub phone: String,
    pub full_address: String,
    pub recovery_bounty: Option<f64>,
}

impl User {
    /// Overwrites the profile fields with `profile`
    pub fn apply_profile(&mut self, profile: &UserProfile) {
        self.first_name = profile.first_name.clone();
        self.last_name = profile.last_name.clone();
        self.email = normalize_email(&profile.email);
        self.phone = profile.phone.clone();
        self.full_address = profile.full_address.clone();
        self.recovery_bounty = profile.recovery_bounty;
    }
}

/// Lower-cases and trims an email for storage and lookup
pub fn normalize_email(email: &str) -> String {
    email.trim().to_lowercase()
}

/// SHA-256 of a random UUID, hex encoded
fn generate_share_hash() -> String {
    let digest = Sha256::digest(Uuid::new_v4().to_string().as_bytes());
    hex::encode(digest)
}
