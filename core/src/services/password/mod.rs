//! Password hashing primitives

mod hasher;

pub use hasher::{BcryptPasswordHasher, PasswordHasher};
