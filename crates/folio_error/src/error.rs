//! Top-level error wrapper types.

use crate::{ConfigError, HttpError, JsonError, ThrottleError, TransportError};

/// Every failure a Folio operation can surface.
///
/// # Examples
///
/// ```
/// use folio_error::{FolioError, TransportError};
///
/// let err: FolioError = TransportError::network("connection refused").into();
/// assert!(format!("{}", err).contains("connection refused"));
/// ```
#[derive(Debug, derive_more::From, derive_more::Display, derive_more::Error)]
pub enum FolioErrorKind {
    /// Network or timeout failure
    #[from(TransportError)]
    Transport(TransportError),
    /// Non-success HTTP status
    #[from(HttpError)]
    Http(HttpError),
    /// Request cancelled while queued
    #[from(ThrottleError)]
    Throttle(ThrottleError),
    /// Configuration error
    #[from(ConfigError)]
    Config(ConfigError),
    /// JSON serialization/deserialization error
    #[from(JsonError)]
    Json(JsonError),
}

/// Folio error with kind discrimination.
#[derive(Debug, derive_more::Display, derive_more::Error)]
#[display("Folio Error: {}", _0)]
pub struct FolioError(Box<FolioErrorKind>);

impl FolioError {
    /// Create a new error from a kind.
    pub fn new(kind: FolioErrorKind) -> Self {
        Self(Box::new(kind))
    }

    /// Get the error kind.
    pub fn kind(&self) -> &FolioErrorKind {
        &self.0
    }

    /// HTTP status, when the failure came from a non-success response.
    pub fn status(&self) -> Option<u16> {
        match self.kind() {
            FolioErrorKind::Http(e) => Some(e.status),
            _ => None,
        }
    }

    /// Caller-facing message for transport failures.
    pub fn transport_message(&self) -> Option<String> {
        match self.kind() {
            FolioErrorKind::Transport(e) => Some(e.message()),
            _ => None,
        }
    }
}

// Generic From implementation for any type that converts to FolioErrorKind
impl<T> From<T> for FolioError
where
    T: Into<FolioErrorKind>,
{
    fn from(err: T) -> Self {
        Self::new(err.into())
    }
}

/// Result type for Folio operations.
pub type FolioResult<T> = std::result::Result<T, FolioError>;
