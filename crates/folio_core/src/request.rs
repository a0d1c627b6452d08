//! Raw and decoded request/response types.

use crate::Method;
use reqwest::header::HeaderMap;
use serde_json::Value;

/// A fully composed request handed to the fetch capability.
#[derive(Debug, Clone, PartialEq)]
pub struct FetchRequest {
    /// HTTP verb
    pub method: Method,
    /// Absolute URL including the query string
    pub url: String,
    /// Request headers
    pub headers: HeaderMap,
    /// JSON body for write requests
    pub body: Option<String>,
}

/// The raw outcome of a fetch that reached the server.
#[derive(Debug, Clone, Default)]
pub struct FetchResponse {
    /// Status code
    pub status: u16,
    /// Reason phrase
    pub status_text: String,
    /// Response headers
    pub headers: HeaderMap,
    /// Raw body text
    pub body: String,
}

impl FetchResponse {
    /// Response with a JSON body and the canonical reason phrase.
    pub fn json(status: u16, body: &Value) -> Self {
        Self {
            status,
            status_text: reqwest::StatusCode::from_u16(status)
                .ok()
                .and_then(|s| s.canonical_reason())
                .unwrap_or_default()
                .to_string(),
            headers: HeaderMap::new(),
            body: body.to_string(),
        }
    }

    /// Add a header, ignoring names or values that are not valid HTTP.
    pub fn with_header(mut self, name: &str, value: &str) -> Self {
        if let (Ok(name), Ok(value)) = (
            reqwest::header::HeaderName::from_bytes(name.as_bytes()),
            reqwest::header::HeaderValue::from_str(value),
        ) {
            self.headers.insert(name, value);
        }
        self
    }
}

/// A decoded successful response.
#[derive(Debug, Clone, Default)]
pub struct ApiResponse {
    /// Decoded JSON body
    pub data: Value,
    /// Response headers
    pub headers: HeaderMap,
    /// Status code
    pub status: u16,
    /// Page size reported by the `per-page` header
    pub per_page: Option<u64>,
    /// Item count reported by the `total` header
    pub total: Option<u64>,
}

impl ApiResponse {
    /// Read a header as an unsigned integer.
    pub fn header_u64(&self, name: &str) -> Option<u64> {
        self.headers
            .get(name)
            .and_then(|v| v.to_str().ok())
            .and_then(|v| v.trim().parse().ok())
    }

    /// Lift the `per-page` and `total` headers into their fields.
    pub fn with_pagination(mut self) -> Self {
        self.per_page = self.header_u64("per-page");
        self.total = self.header_u64("total");
        self
    }
}
