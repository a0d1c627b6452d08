//! HTTP status errors.

/// Response with a status outside the accepted success range.
///
/// # Examples
///
/// ```
/// use folio_error::HttpError;
///
/// let err = HttpError::new(404, "Not Found", "{}");
/// assert_eq!(err.status, 404);
/// assert_eq!(err.status_text, "Not Found");
/// ```
#[derive(Debug, Clone, derive_more::Display, derive_more::Error)]
#[display("HTTP Error: {} {} at line {} in {}", status, status_text, line, file)]
pub struct HttpError {
    /// Status code returned by the server
    pub status: u16,
    /// Reason phrase returned by the server
    pub status_text: String,
    /// Raw response body
    pub body: String,
    /// Line number where the error occurred
    pub line: u32,
    /// File where the error occurred
    pub file: &'static str,
}

impl HttpError {
    /// Create a new HttpError at the current location.
    #[track_caller]
    pub fn new(status: u16, status_text: impl Into<String>, body: impl Into<String>) -> Self {
        let location = std::panic::Location::caller();
        Self {
            status,
            status_text: status_text.into(),
            body: body.into(),
            line: location.line(),
            file: location.file(),
        }
    }

    /// True for `429 Too Many Requests`.
    pub fn is_rate_limited(&self) -> bool {
        self.status == 429
    }
}
