//! Database module - SQLite implementations using SQLx
//!
//! This module provides:
//! - Connection pool management and schema bootstrap
//! - Repository implementations over the pool

pub mod connection;
pub mod sqlite;

#[cfg(test)]
mod tests;

// Re-export commonly used types
pub use connection::{DatabasePool, PoolStatistics};
pub use sqlite::SqliteUserRepository;
