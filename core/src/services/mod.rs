//! Business services containing domain logic and use cases.

pub mod audit;
pub mod auth;
pub mod password;
pub mod token;
pub mod user;

// Re-export commonly used types
pub use audit::{NoOpSecurityAuditor, RecordingSecurityAuditor, SecurityAuditor, TracingSecurityAuditor};
pub use auth::{AuthService, AuthServiceConfig, RegisterUser};
pub use password::{BcryptPasswordHasher, PasswordHasher};
pub use token::{Clock, ManualClock, SystemClock, TokenService, TokenServiceConfig};
pub use user::{UpdateUser, UserService};
