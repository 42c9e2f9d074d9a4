//! User management service module
//!
//! Administrative CRUD over user accounts for authenticated callers:
//! - Create an account (same rules as registration)
//! - List and fetch users
//! - Update profile fields
//! - Delete an account

mod service;

#[cfg(test)]
mod tests;

pub(crate) use service::create_account;
pub use service::{UpdateUser, UserService};
