//! Error types for the Folio content API client.
//!
//! # Error Hierarchy
//!
//! All errors follow the `ErrorKind` + wrapper struct pattern:
//! - `*ErrorKind` enum defines specific error conditions
//! - `*Error` struct wraps the kind with source location tracking
//! - All errors use `#[track_caller]` for automatic location capture
//!
//! # Examples
//!
//! ```
//! use folio_error::{FolioResult, HttpError};
//!
//! fn fetch_story() -> FolioResult<String> {
//!     Err(HttpError::new(404, "Not Found", ""))?
//! }
//!
//! assert!(fetch_story().is_err());
//! ```

#![forbid(unsafe_code)]
#![warn(missing_docs)]

mod config;
mod error;
mod http;
mod json;
mod retry;
mod throttle;
mod transport;

pub use config::ConfigError;
pub use error::{FolioError, FolioErrorKind, FolioResult};
pub use http::HttpError;
pub use json::JsonError;
pub use retry::RetryableError;
pub use throttle::{ThrottleError, ThrottleErrorKind};
pub use transport::{TIMEOUT_MESSAGE, TransportError, TransportErrorKind};
