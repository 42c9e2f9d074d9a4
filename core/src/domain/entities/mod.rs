//! Domain entities representing core business objects.

pub mod token;
pub mod user;

#[cfg(test)]
mod tests;

pub use token::{Claims, PrincipalId, TokenKind, TokenPair, TOKEN_TYPE_BEARER};
pub use user::{NewUser, User, UserProfile};
