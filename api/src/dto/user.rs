use pr_core::domain::entities::user::User;
use serde::{Deserialize, Serialize};

/// Public view of a user; never carries the password hash
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct UserOut {
    pub id: i64,
    pub first_name: String,
    pub last_name: String,
    pub email: String,
    pub phone: String,
    pub full_address: String,
    pub recovery_bounty: Option<f64>,
    pub hash: String,
}

impl From<User> for UserOut {
    fn from(user: User) -> Self {
        Self {
            id: user.id,
            first_name: user.first_name,
            last_name: user.last_name,
            email: user.email,
            phone: user.phone,
            full_address: user.full_address,
            recovery_bounty: user.recovery_bounty,
            hash: user.hash,
        }
    }
}
