//! Test utilities for transport tests.

use async_trait::async_trait;
use folio_core::{FetchRequest, FetchResponse};
use folio_error::TransportError;
use folio_interface::Fetch;
use std::sync::Mutex;
use std::time::Duration;

type Responder = Box<dyn Fn(&FetchRequest) -> Result<FetchResponse, TransportError> + Send + Sync>;

/// Fetch double that records requests and answers from a closure.
pub struct MockFetch {
    responder: Responder,
    delay: Option<Duration>,
    calls: Mutex<Vec<FetchRequest>>,
}

impl MockFetch {
    pub fn new(
        responder: impl Fn(&FetchRequest) -> Result<FetchResponse, TransportError> + Send + Sync + 'static,
    ) -> Self {
        Self {
            responder: Box::new(responder),
            delay: None,
            calls: Mutex::new(Vec::new()),
        }
    }

    /// Always answer with `response`.
    pub fn always(response: FetchResponse) -> Self {
        Self::new(move |_| Ok(response.clone()))
    }

    /// Wait this long before answering.
    pub fn with_delay(mut self, delay: Duration) -> Self {
        self.delay = Some(delay);
        self
    }

    pub fn call_count(&self) -> usize {
        self.calls.lock().unwrap().len()
    }

    pub fn requests(&self) -> Vec<FetchRequest> {
        self.calls.lock().unwrap().clone()
    }
}

#[async_trait]
impl Fetch for MockFetch {
    async fn fetch(&self, request: FetchRequest) -> Result<FetchResponse, TransportError> {
        self.calls.lock().unwrap().push(request.clone());
        if let Some(delay) = self.delay {
            tokio::time::sleep(delay).await;
        }
        (self.responder)(&request)
    }
}
