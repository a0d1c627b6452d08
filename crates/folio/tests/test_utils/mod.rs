//! Test utilities for client tests.

#![allow(dead_code)]

use async_trait::async_trait;
use folio::{ClientConfig, ClientConfigBuilder, FetchRequest, FetchResponse, Fetch, FolioClient, TransportError};
use std::sync::{Arc, Mutex};
use std::time::Duration;

type Responder = Box<dyn Fn(&FetchRequest, usize) -> Result<FetchResponse, TransportError> + Send + Sync>;

/// Fetch double that records requests and answers from a closure.
///
/// The closure receives the request and its zero-based call index.
pub struct MockFetch {
    responder: Responder,
    delay: Option<Duration>,
    calls: Mutex<Vec<FetchRequest>>,
}

impl MockFetch {
    pub fn new(
        responder: impl Fn(&FetchRequest, usize) -> Result<FetchResponse, TransportError>
        + Send
        + Sync
        + 'static,
    ) -> Self {
        Self {
            responder: Box::new(responder),
            delay: None,
            calls: Mutex::new(Vec::new()),
        }
    }

    /// Always answer with `response`.
    pub fn always(response: FetchResponse) -> Self {
        Self::new(move |_, _| Ok(response.clone()))
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

    pub fn urls(&self) -> Vec<String> {
        self.requests().into_iter().map(|r| r.url).collect()
    }
}

#[async_trait]
impl Fetch for MockFetch {
    async fn fetch(&self, request: FetchRequest) -> Result<FetchResponse, TransportError> {
        let index = {
            let mut calls = self.calls.lock().unwrap();
            calls.push(request.clone());
            calls.len() - 1
        };
        if let Some(delay) = self.delay {
            tokio::time::sleep(delay).await;
        }
        (self.responder)(&request, index)
    }
}

/// Decoded value of query parameter `key` in `url`.
pub fn query_value(url: &str, key: &str) -> Option<String> {
    let (_, query) = url.split_once('?')?;
    query.split('&').find_map(|pair| {
        let (k, v) = pair.split_once('=')?;
        (k == key).then(|| v.replace("%2C", ",").replace("%2F", "/"))
    })
}

/// Delivery API config with a test token.
pub fn cdn_config() -> ClientConfigBuilder {
    let mut builder = ClientConfigBuilder::default();
    builder.access_token("test-token").endpoint("https://api.test/v2");
    builder
}

/// Client over `fetch`.
pub fn client(config: ClientConfig, fetch: &Arc<MockFetch>) -> FolioClient {
    FolioClient::new(config).with_fetch(fetch.clone())
}
