//! Fetch implementation backed by reqwest.

use async_trait::async_trait;
use folio_core::{FetchRequest, FetchResponse};
use folio_error::TransportError;
use folio_interface::Fetch;
use reqwest::Client;
use tracing::{debug, error, instrument};

/// Executes requests with a shared [`reqwest::Client`].
#[derive(Debug, Clone, Default)]
pub struct ReqwestFetch {
    client: Client,
}

impl ReqwestFetch {
    /// Creates a fetcher with a default client.
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl Fetch for ReqwestFetch {
    #[instrument(skip(self, request), fields(method = %request.method, url = %request.url))]
    async fn fetch(&self, request: FetchRequest) -> Result<FetchResponse, TransportError> {
        let mut builder = self
            .client
            .request(request.method.into(), &request.url)
            .headers(request.headers);
        if let Some(body) = request.body {
            builder = builder.body(body);
        }

        let response = builder.send().await.map_err(|e| {
            error!(error = ?e, "Request failed before a response arrived");
            if e.is_timeout() {
                TransportError::timeout()
            } else {
                TransportError::network(e.to_string())
            }
        })?;

        let status = response.status();
        let headers = response.headers().clone();
        let body = response.text().await.map_err(|e| {
            error!(error = ?e, "Failed to read response body");
            TransportError::network(e.to_string())
        })?;
        debug!(status = status.as_u16(), bytes = body.len(), "Received response");

        Ok(FetchResponse {
            status: status.as_u16(),
            status_text: status.canonical_reason().unwrap_or_default().to_string(),
            headers,
            body,
        })
    }
}
