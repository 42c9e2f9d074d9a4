//! User route handlers
//!
//! Every endpoint here sits behind the JWT middleware.

pub mod collection;
pub mod item;
pub mod me;
