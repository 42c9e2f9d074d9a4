//! Security audit hooks
//!
//! The token service reports every rejected token to a [`SecurityAuditor`]
//! instead of logging on its own. The reason passed along is for the audit
//! trail only and never reaches the client.

mod auditor;

pub use auditor::{
    NoOpSecurityAuditor, RecordingSecurityAuditor, SecurityAuditor, TracingSecurityAuditor,
    SECURITY_LOG_TARGET,
};
