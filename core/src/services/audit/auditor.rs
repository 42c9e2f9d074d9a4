use std::sync::Mutex;

/// Log target used for security events
pub const SECURITY_LOG_TARGET: &str = "security";

/// Receiver of security-relevant events
pub trait SecurityAuditor: Send + Sync {
    /// A presented token failed validation
    fn invalid_token(&self, reason: &str);
}

/// Writes security events through `tracing` under the `security` target
#[derive(Debug, Clone, Copy, Default)]
pub struct TracingSecurityAuditor;

impl SecurityAuditor for TracingSecurityAuditor {
    fn invalid_token(&self, reason: &str) {
        tracing::warn!(target: SECURITY_LOG_TARGET, reason, "JWT validation failed");
    }
}

/// Discards all events
#[derive(Debug, Clone, Copy, Default)]
pub struct NoOpSecurityAuditor;

impl SecurityAuditor for NoOpSecurityAuditor {
    fn invalid_token(&self, _reason: &str) {}
}

/// Keeps events in memory
#[derive(Debug, Default)]
pub struct RecordingSecurityAuditor {
    reasons: Mutex<Vec<String>>,
}

impl RecordingSecurityAuditor {
    pub fn new() -> Self {
        Self::default()
    }

    /// Reasons recorded so far, oldest first
    pub fn reasons(&self) -> Vec<String> {
        self.reasons
            .lock()
            .unwrap_or_else(|e| e.into_inner())
            .clone()
    }

    pub fn count(&self) -> usize {
        self.reasons.lock().unwrap_or_else(|e| e.into_inner()).len()
    }
}

impl SecurityAuditor for RecordingSecurityAuditor {
    fn invalid_token(&self, reason: &str) {
        self.reasons
            .lock()
            .unwrap_or_else(|e| e.into_inner())
            .push(reason.to_string());
    }
}
