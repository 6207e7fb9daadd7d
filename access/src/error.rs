//! Configuration errors for access policies.

/// Raised when a policy is configured with an unusable redirect target.
/// Evaluation itself never fails.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum AccessError {
    #[error("invalid redirect target: {0:?} (expected a same-origin path starting with '/')")]
    InvalidRedirectTarget(String),
}
