//! Retry classification.

use crate::{FolioError, FolioErrorKind, HttpError};

/// Trait for errors that support retry logic.
///
/// # Examples
///
/// ```
/// use folio_error::{HttpError, RetryableError};
///
/// assert!(HttpError::new(429, "Too Many Requests", "").is_retryable());
/// assert!(!HttpError::new(500, "Internal Server Error", "").is_retryable());
/// ```
pub trait RetryableError {
    /// Returns true if this error should trigger a retry.
    fn is_retryable(&self) -> bool;
}

impl RetryableError for HttpError {
    fn is_retryable(&self) -> bool {
        self.is_rate_limited()
    }
}

impl RetryableError for FolioError {
    fn is_retryable(&self) -> bool {
        match self.kind() {
            FolioErrorKind::Http(e) => e.is_retryable(),
            _ => false,
        }
    }
}
