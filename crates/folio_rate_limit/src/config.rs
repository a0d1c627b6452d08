//! Inputs to rate limit classification that are not part of the request.

use serde::{Deserialize, Serialize};

/// Caller and server supplied ceilings.
///
/// # Example
///
/// ```
/// use folio_rate_limit::RateLimitConfig;
///
/// let config = RateLimitConfig::default().with_user_rate_limit(Some(20));
/// assert_eq!(*config.user_rate_limit(), Some(20));
/// assert_eq!(*config.server_headers_rate_limit(), None);
/// ```
#[derive(
    Debug,
    Clone,
    Copy,
    Default,
    PartialEq,
    Eq,
    Serialize,
    Deserialize,
    derive_getters::Getters,
    derive_setters::Setters,
)]
#[setters(prefix = "with_")]
pub struct RateLimitConfig {
    /// Explicit ceiling configured by the caller
    #[serde(default)]
    user_rate_limit: Option<u32>,

    /// Ceiling last reported by the server's rate limit policy header
    #[serde(default)]
    server_headers_rate_limit: Option<u32>,
}
