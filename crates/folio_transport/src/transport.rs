//! Request composition, deadlines and response decoding.

use crate::{ReqwestFetch, join_url, to_query_string};
use folio_core::{ApiResponse, FetchRequest, FetchResponse, Method, Params};
use folio_error::{FolioResult, HttpError, JsonError, TransportError};
use folio_interface::Fetch;
use reqwest::header::{CONTENT_TYPE, HeaderMap, HeaderName, HeaderValue};
use serde_json::Value;
use std::sync::Arc;
use std::time::Duration;
use tracing::{debug, error, instrument, warn};

/// Hook applied to every response before its status is checked.
pub type ResponseInterceptor = Arc<dyn Fn(ApiResponse) -> ApiResponse + Send + Sync>;

/// Whether `status` counts as success (200 through 206).
///
/// ```
/// use folio_transport::is_ok_status;
///
/// assert!(is_ok_status(204));
/// assert!(!is_ok_status(207));
/// assert!(!is_ok_status(404));
/// ```
pub fn is_ok_status(status: u16) -> bool {
    (200..=206).contains(&status)
}

/// Executes API operations against a base URL.
///
/// # Example
///
/// ```
/// use folio_transport::Transport;
/// use std::time::Duration;
///
/// let transport = Transport::new("https://api.storyblok.com/v2")
///     .with_header("x-client", "folio")
///     .with_timeout_secs(2.5);
/// assert_eq!(transport.timeout(), Some(Duration::from_millis(2500)));
/// ```
#[derive(Clone)]
pub struct Transport {
    base_url: String,
    headers: HeaderMap,
    timeout: Option<Duration>,
    interceptor: Option<ResponseInterceptor>,
    fetch: Arc<dyn Fetch>,
}

impl std::fmt::Debug for Transport {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Transport")
            .field("base_url", &self.base_url)
            .field("headers", &self.headers)
            .field("timeout", &self.timeout)
            .field("interceptor", &self.interceptor.is_some())
            .finish_non_exhaustive()
    }
}

impl Transport {
    /// Transport using [`ReqwestFetch`], without deadline or extra headers.
    pub fn new(base_url: impl Into<String>) -> Self {
        Self {
            base_url: base_url.into(),
            headers: HeaderMap::new(),
            timeout: None,
            interceptor: None,
            fetch: Arc::new(ReqwestFetch::new()),
        }
    }

    /// Replace the raw fetch capability.
    pub fn with_fetch(mut self, fetch: Arc<dyn Fetch>) -> Self {
        self.fetch = fetch;
        self
    }

    /// Add a header sent with every request. Invalid names or values are dropped.
    pub fn with_header(mut self, name: &str, value: &str) -> Self {
        match (
            HeaderName::from_bytes(name.as_bytes()),
            HeaderValue::from_str(value),
        ) {
            (Ok(name), Ok(value)) => {
                self.headers.insert(name, value);
            }
            _ => warn!(name, "Ignoring invalid header"),
        }
        self
    }

    /// Set the deadline. `None` or a zero duration disables it.
    pub fn with_timeout(mut self, timeout: Option<Duration>) -> Self {
        self.timeout = timeout.filter(|t| !t.is_zero());
        self
    }

    /// Set the deadline in seconds. Zero, negative or non-finite values disable it.
    pub fn with_timeout_secs(self, secs: f64) -> Self {
        let timeout = (secs.is_finite() && secs > 0.0).then(|| Duration::from_secs_f64(secs));
        self.with_timeout(timeout)
    }

    /// Install a response interceptor.
    pub fn with_interceptor(mut self, interceptor: Option<ResponseInterceptor>) -> Self {
        self.interceptor = interceptor;
        self
    }

    /// Base URL requests are composed against.
    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    /// Default headers.
    pub fn headers(&self) -> &HeaderMap {
        &self.headers
    }

    /// Active deadline.
    pub fn timeout(&self) -> Option<Duration> {
        self.timeout
    }

    /// `GET` with parameters serialized onto the query string.
    pub async fn get(&self, path: &str, params: &Params) -> FolioResult<ApiResponse> {
        self.execute(Method::Get, path, params, None).await
    }

    /// `POST` with a JSON payload.
    pub async fn post(&self, path: &str, payload: Option<&Value>) -> FolioResult<ApiResponse> {
        self.execute(Method::Post, path, &Params::new(), payload).await
    }

    /// `PUT` with a JSON payload.
    pub async fn put(&self, path: &str, payload: Option<&Value>) -> FolioResult<ApiResponse> {
        self.execute(Method::Put, path, &Params::new(), payload).await
    }

    /// `DELETE` with a JSON payload.
    pub async fn delete(&self, path: &str, payload: Option<&Value>) -> FolioResult<ApiResponse> {
        self.execute(Method::Delete, path, &Params::new(), payload).await
    }

    /// Execute one operation.
    ///
    /// `params` are only used for `GET`; writes send `payload` (or `{}`) as
    /// a JSON body. Network failures and deadline expiry surface as
    /// [`TransportError`], statuses outside 200..=206 as [`HttpError`].
    #[instrument(skip(self, params, payload), fields(%method, path))]
    pub async fn execute(
        &self,
        method: Method,
        path: &str,
        params: &Params,
        payload: Option<&Value>,
    ) -> FolioResult<ApiResponse> {
        let request = self.compose(method, path, params, payload);
        debug!(url = %request.url, "Dispatching request");

        let raw = match self.timeout {
            Some(limit) => tokio::time::timeout(limit, self.fetch.fetch(request))
                .await
                .map_err(|_| {
                    warn!(timeout_ms = limit.as_millis() as u64, "Request deadline elapsed");
                    TransportError::timeout()
                })?,
            None => self.fetch.fetch(request).await,
        }
        .inspect_err(|e| error!(error = %e.message(), "Transport failure"))?;

        self.decode(raw)
    }

    fn compose(&self, method: Method, path: &str, params: &Params, payload: Option<&Value>) -> FetchRequest {
        let mut url = join_url(&self.base_url, path);
        let mut headers = self.headers.clone();
        let body = if method.is_write() {
            headers.insert(CONTENT_TYPE, HeaderValue::from_static("application/json"));
            Some(payload.map_or_else(|| "{}".to_string(), Value::to_string))
        } else {
            let query = to_query_string(params);
            if !query.is_empty() {
                url.push('?');
                url.push_str(&query);
            }
            None
        };
        FetchRequest {
            method,
            url,
            headers,
            body,
        }
    }

    fn decode(&self, raw: FetchResponse) -> FolioResult<ApiResponse> {
        let ok = is_ok_status(raw.status);
        let data = if raw.status == 204 || raw.body.trim().is_empty() {
            Value::Object(Default::default())
        } else {
            match serde_json::from_str(&raw.body) {
                Ok(value) => value,
                Err(e) if ok => {
                    error!(error = %e, "Response body is not valid JSON");
                    return Err(JsonError::new(format!("Invalid response body: {e}")).into());
                }
                Err(_) => Value::Null,
            }
        };

        let response = ApiResponse {
            data,
            headers: raw.headers,
            status: raw.status,
            per_page: None,
            total: None,
        }
        .with_pagination();
        let response = match &self.interceptor {
            Some(intercept) => intercept(response),
            None => response,
        };

        if is_ok_status(response.status) {
            Ok(response)
        } else {
            warn!(status = response.status, status_text = %raw.status_text, "Request rejected");
            Err(HttpError::new(response.status, raw.status_text, raw.body).into())
        }
    }
}
