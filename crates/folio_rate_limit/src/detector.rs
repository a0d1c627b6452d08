//! Extraction of rate limit signals from response headers.
//!
//! The delivery API reports its policy as
//! `x-ratelimit: "concurrent-requests";r=<remaining>` and
//! `x-ratelimit-policy: "concurrent-requests";q=<max>`.

use reqwest::header::HeaderMap;
use regex::Regex;
use std::sync::{Arc, LazyLock};
use tokio::sync::RwLock;
use tracing::{debug, instrument};

static REMAINING: LazyLock<Option<Regex>> = LazyLock::new(|| Regex::new(r"r=(\d+)").ok());
static MAX: LazyLock<Option<Regex>> = LazyLock::new(|| Regex::new(r"q=(\d+)").ok());

/// Rate limit values carried by a response.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct RateLimitHeaders {
    /// Requests still available in the current window
    pub remaining: Option<u32>,
    /// Requests allowed per window
    pub max: Option<u32>,
}

impl RateLimitHeaders {
    /// Parse the rate limit headers.
    ///
    /// Returns `None` when neither header yields a value. Header names are
    /// matched case-insensitively.
    ///
    /// ```
    /// use folio_rate_limit::RateLimitHeaders;
    /// use reqwest::header::{HeaderMap, HeaderValue};
    ///
    /// let mut headers = HeaderMap::new();
    /// headers.insert("X-RateLimit-Policy", HeaderValue::from_static("\"concurrent-requests\";q=30"));
    /// let parsed = RateLimitHeaders::parse(&headers).unwrap();
    /// assert_eq!(parsed.max, Some(30));
    /// assert_eq!(parsed.remaining, None);
    /// ```
    pub fn parse(headers: &HeaderMap) -> Option<Self> {
        let parsed = Self {
            remaining: capture_u32(headers, "x-ratelimit", &REMAINING),
            max: capture_u32(headers, "x-ratelimit-policy", &MAX),
        };
        (parsed.remaining.is_some() || parsed.max.is_some()).then_some(parsed)
    }
}

fn capture_u32(headers: &HeaderMap, key: &str, pattern: &LazyLock<Option<Regex>>) -> Option<u32> {
    let value = headers.get(key)?.to_str().ok()?;
    let captures = pattern.as_ref()?.captures(value)?;
    captures.get(1)?.as_str().parse().ok()
}

/// Remembers the ceiling most recently advertised by the server.
///
/// Clones share the same cached value.
#[derive(Debug, Clone, Default)]
pub struct HeaderRateLimitDetector {
    detected_max: Arc<RwLock<Option<u32>>>,
}

impl HeaderRateLimitDetector {
    /// Create a detector with nothing detected yet.
    pub fn new() -> Self {
        Self::default()
    }

    /// Inspect response headers, caching an advertised maximum.
    ///
    /// Responses without a usable policy header leave the cached value as is.
    #[instrument(skip(self, headers))]
    pub async fn detect(&self, headers: &HeaderMap) -> Option<RateLimitHeaders> {
        let parsed = RateLimitHeaders::parse(headers)?;
        if let Some(max) = parsed.max {
            let mut slot = self.detected_max.write().await;
            if *slot != Some(max) {
                debug!(max, remaining = ?parsed.remaining, "Server advertised rate limit");
            }
            *slot = Some(max);
        }
        Some(parsed)
    }

    /// Last advertised maximum, if any.
    pub async fn get_cached(&self) -> Option<u32> {
        *self.detected_max.read().await
    }

    /// Forget the advertised maximum.
    pub async fn clear_cache(&self) {
        *self.detected_max.write().await = None;
    }
}
