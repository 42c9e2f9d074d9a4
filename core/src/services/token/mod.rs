//! Token service module for JWT management
//!
//! This module handles all token-related operations:
//! - Access and refresh token minting (HS256)
//! - Signature and expiry validation against an injectable clock
//! - Session issuance with refresh token rotation

mod clock;
mod config;
mod service;

#[cfg(test)]
mod tests;

pub use clock::{Clock, ManualClock, SystemClock};
pub use config::TokenServiceConfig;
pub use service::TokenService;
