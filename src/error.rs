//! Structured error classification.

/// Grepable error code and retryable flag for domain errors.
///
/// Codes are stable identifiers for logs and host-UI dispatch; the
/// `Display` text is for humans and may change.
pub trait ErrorCode: std::fmt::Display {
    fn error_code(&self) -> &'static str;

    fn retryable(&self) -> bool {
        false
    }
}
