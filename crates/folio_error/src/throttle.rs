//! Throttle queue errors.

/// Throttle failure conditions.
#[derive(Debug, Clone, PartialEq, Eq, Hash, derive_more::Display)]
pub enum ThrottleErrorKind {
    /// Pending work was cancelled by an abort of all queues
    #[display("Request aborted while waiting in the {} req/s queue", ceiling)]
    Aborted {
        /// Ceiling of the queue the request was waiting in
        ceiling: u32,
    },
}

/// Throttle error with location tracking.
#[derive(Debug, Clone, derive_more::Display, derive_more::Error)]
#[display("Throttle Error: {} at line {} in {}", kind, line, file)]
pub struct ThrottleError {
    /// The kind of error that occurred
    pub kind: ThrottleErrorKind,
    /// Line number where the error occurred
    pub line: u32,
    /// File where the error occurred
    pub file: &'static str,
}

impl ThrottleError {
    /// Create a new ThrottleError at the current location.
    #[track_caller]
    pub fn new(kind: ThrottleErrorKind) -> Self {
        let location = std::panic::Location::caller();
        Self {
            kind,
            line: location.line(),
            file: location.file(),
        }
    }

    /// Shorthand for an aborted admission.
    #[track_caller]
    pub fn aborted(ceiling: u32) -> Self {
        Self::new(ThrottleErrorKind::Aborted { ceiling })
    }
}
