//! Network-level failures raised below the HTTP status layer.

/// Fixed message reported when a request exceeds its configured deadline.
pub const TIMEOUT_MESSAGE: &str = "Request timeout: The request was aborted due to timeout";

/// Transport failure conditions.
#[derive(Debug, Clone, PartialEq, Eq, Hash, derive_more::Display)]
pub enum TransportErrorKind {
    /// The request never produced an HTTP response
    #[display("{}", _0)]
    Network(String),
    /// The configured deadline elapsed before the response arrived
    #[display("{}", TIMEOUT_MESSAGE)]
    Timeout,
}

/// Transport error carrying only a message, with source location tracking.
///
/// # Examples
///
/// ```
/// use folio_error::{TransportError, TransportErrorKind, TIMEOUT_MESSAGE};
///
/// let err = TransportError::new(TransportErrorKind::Timeout);
/// assert_eq!(err.message(), TIMEOUT_MESSAGE);
/// assert!(err.is_timeout());
/// ```
#[derive(Debug, Clone, derive_more::Display, derive_more::Error)]
#[display("Transport Error: {} at line {} in {}", kind, line, file)]
pub struct TransportError {
    /// The kind of failure
    pub kind: TransportErrorKind,
    /// Line number where the error occurred
    pub line: u32,
    /// File where the error occurred
    pub file: &'static str,
}

impl TransportError {
    /// Create a new TransportError at the current location.
    #[track_caller]
    pub fn new(kind: TransportErrorKind) -> Self {
        let location = std::panic::Location::caller();
        Self {
            kind,
            line: location.line(),
            file: location.file(),
        }
    }

    /// Shorthand for a network failure.
    #[track_caller]
    pub fn network(message: impl Into<String>) -> Self {
        Self::new(TransportErrorKind::Network(message.into()))
    }

    /// Shorthand for a deadline expiry.
    #[track_caller]
    pub fn timeout() -> Self {
        Self::new(TransportErrorKind::Timeout)
    }

    /// The caller-facing message, without location details.
    pub fn message(&self) -> String {
        self.kind.to_string()
    }

    /// Whether this failure was caused by the request deadline.
    pub fn is_timeout(&self) -> bool {
        matches!(self.kind, TransportErrorKind::Timeout)
    }
}
