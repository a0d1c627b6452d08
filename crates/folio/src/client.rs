//! The content API client.

use crate::params::requested_version;
use crate::retry::with_retry;
use crate::{ClientConfig, fetch_all_pages, prepare_cdn_params};
use async_trait::async_trait;
use folio_cache::{CacheKey, ResponseCache, is_cacheable};
use folio_core::{ApiResponse, Method, Params, entity_key, is_cdn_path};
use folio_error::FolioResult;
use folio_interface::{Fetch, StoryLookup};
use folio_rate_limit::{
    DEFAULT_PER_PAGE, HeaderRateLimitDetector, MANAGEMENT_API_DEFAULT_RATE_LIMIT,
    ThrottleQueueManager, determine_rate_limit,
};
use folio_resolve::{ResolveOptions, Resolver, UUID_CHUNK_SIZE};
use folio_transport::Transport;
use serde_json::Value;
use std::collections::HashMap;
use std::sync::{Arc, Mutex, MutexGuard, PoisonError};
use tracing::{debug, info, instrument};

/// Rate governed client for the delivery and management APIs.
///
/// Every request is classified into a requests-per-second ceiling and
/// admitted through the throttle queue for that ceiling. Published reads are
/// cached per access token, and relations, links and assets requested
/// through `resolve_*` parameters are resolved before a read returns.
///
/// # Example
///
/// ```no_run
/// use folio::{ClientConfigBuilder, FolioClient, Params};
///
/// # #[tokio::main]
/// # async fn main() -> Result<(), Box<dyn std::error::Error>> {
/// let config = ClientConfigBuilder::default().access_token("my-token").build()?;
/// let client = FolioClient::new(config);
///
/// let home = client.get_story("home", Params::new()).await?;
/// let posts = client
///     .get_all("cdn/stories", Params::new().with("starts_with", "blog/"), None)
///     .await?;
/// println!("{} has {} posts", home.data["story"]["name"], posts.len());
/// # Ok(())
/// # }
/// ```
#[derive(Debug)]
pub struct FolioClient {
    config: ClientConfig,
    transport: Transport,
    throttle: ThrottleQueueManager,
    cache: Mutex<ResponseCache>,
    detector: HeaderRateLimitDetector,
}

impl FolioClient {
    /// Create a client from configuration, fetching over HTTP with reqwest.
    #[instrument(skip(config), fields(base_url = %config.base_url()))]
    pub fn new(config: ClientConfig) -> Self {
        let mut transport = Transport::new(config.base_url()).with_timeout(config.timeout());
        if let Some(oauth_token) = config.oauth_token() {
            transport = transport.with_header("authorization", oauth_token);
        }
        for (name, value) in config.headers() {
            transport = transport.with_header(name, value);
        }
        info!(management = config.is_management(), "Creating content client");

        Self {
            throttle: ThrottleQueueManager::new(config.throttle_interval()),
            cache: Mutex::new(ResponseCache::new(config.cache().clone())),
            detector: HeaderRateLimitDetector::new(),
            transport,
            config,
        }
    }

    /// Replace the raw fetch capability.
    pub fn with_fetch(mut self, fetch: Arc<dyn Fetch>) -> Self {
        self.transport = self.transport.with_fetch(fetch);
        self
    }

    /// Apply `interceptor` to every response before its status is checked.
    pub fn with_interceptor(
        mut self,
        interceptor: impl Fn(ApiResponse) -> ApiResponse + Send + Sync + 'static,
    ) -> Self {
        self.transport = self.transport.with_interceptor(Some(Arc::new(interceptor)));
        self
    }

    /// Active configuration.
    pub fn config(&self) -> &ClientConfig {
        &self.config
    }

    /// Transport used for every request.
    pub fn transport(&self) -> &Transport {
        &self.transport
    }

    /// Throttle queues of this client.
    pub fn throttle(&self) -> &ThrottleQueueManager {
        &self.throttle
    }

    /// The access token, if configured.
    pub fn get_token(&self) -> Option<&str> {
        self.config.access_token().as_deref()
    }

    /// Read `path`.
    ///
    /// Delivery API reads get their parameters prepared, may be answered from
    /// the cache, and have requested relations, links and assets resolved.
    #[instrument(skip(self, params))]
    pub async fn get(&self, path: &str, params: Params) -> FolioResult<ApiResponse> {
        let cdn = is_cdn_path(path);
        let params = if cdn {
            prepare_cdn_params(
                params,
                *self.config.version(),
                self.get_token(),
                self.known_cache_version(),
            )
        } else {
            params
        };
        let version = requested_version(&params, *self.config.version());
        let scope = self.scope();
        let key = (cdn && is_cacheable(Method::Get, path, version))
            .then(|| CacheKey::new(scope, path, &params));

        let cached = key.as_ref().and_then(|key| self.lock_cache().get(key));
        if let Some(hit) = cached {
            debug!("Serving cached response");
            return Ok(hit);
        }

        let mut response = self.dispatch(Method::Get, path, &params, None).await?;

        if !cdn {
            return Ok(response);
        }
        if let Some(cv) = response.data.get("cv").and_then(Value::as_u64) {
            self.lock_cache().observe_version(scope, cv, version);
        }

        let options =
            ResolveOptions::from_params(&params).with_inline_assets(*self.config.inline_assets());
        if !options.is_empty() {
            Resolver::new(self, options).resolve(&mut response.data).await?;
        }

        if let Some(key) = key {
            let mut cache = self.lock_cache();
            let cv = cache.versions().get(scope);
            cache.set(key, response.clone(), cv);
        }
        Ok(response)
    }

    /// Read every page of a collection and return its entities in page order.
    ///
    /// `key` names the collection in each page body and defaults to the last
    /// path segment, so `cdn/stories` yields the `stories` arrays.
    #[instrument(skip(self, params))]
    pub async fn get_all(
        &self,
        path: &str,
        params: Params,
        key: Option<&str>,
    ) -> FolioResult<Vec<Value>> {
        let key = key.unwrap_or_else(|| entity_key(path));
        let per_page = params
            .get_u64("per_page")
            .filter(|n| *n > 0)
            .unwrap_or(DEFAULT_PER_PAGE);
        let params = params.with("per_page", per_page);

        fetch_all_pages(key, per_page, |page| {
            self.get(path, params.clone().with("page", page))
        })
        .await
    }

    /// Read a single story by slug, full slug or id.
    pub async fn get_story(&self, slug: &str, params: Params) -> FolioResult<ApiResponse> {
        let path = format!("cdn/stories/{}", slug.trim_start_matches('/'));
        self.get(&path, params).await
    }

    /// Create content.
    pub async fn post(&self, path: &str, payload: Option<&Value>) -> FolioResult<ApiResponse> {
        self.write(Method::Post, path, payload).await
    }

    /// Replace content.
    pub async fn put(&self, path: &str, payload: Option<&Value>) -> FolioResult<ApiResponse> {
        self.write(Method::Put, path, payload).await
    }

    /// Remove content.
    pub async fn delete(&self, path: &str, payload: Option<&Value>) -> FolioResult<ApiResponse> {
        self.write(Method::Delete, path, payload).await
    }

    /// Last content version seen for `token`, 0 when none.
    pub fn cache_version(&self, token: &str) -> u64 {
        self.lock_cache().versions().get(token)
    }

    /// Every recorded content version, by token.
    pub fn cache_versions(&self) -> HashMap<String, u64> {
        self.lock_cache().versions().all()
    }

    /// Record `cv` as the content version of the access token.
    ///
    /// Cached reads stored under an older version are no longer served.
    pub fn set_cache_version(&self, cv: u64) {
        let scope = self.scope();
        self.lock_cache().set_version(scope, cv);
    }

    /// Forget the content version of `token`.
    pub fn clear_cache_version(&self, token: &str) {
        self.lock_cache().versions_mut().clear(token);
    }

    /// Drop every cached response and every recorded content version.
    #[instrument(skip(self))]
    pub fn flush_cache(&self) {
        let mut cache = self.lock_cache();
        cache.flush();
        cache.versions_mut().clear_all();
    }

    /// Number of cached responses.
    pub fn cached_responses(&self) -> usize {
        self.lock_cache().len()
    }

    /// Reject every request still waiting for admission.
    pub fn abort_all(&self) {
        self.throttle.abort_all();
    }

    /// Ceiling most recently advertised by the server.
    pub async fn server_rate_limit(&self) -> Option<u32> {
        self.detector.get_cached().await
    }

    async fn write(&self, method: Method, path: &str, payload: Option<&Value>) -> FolioResult<ApiResponse> {
        let response = self.dispatch(method, path, &Params::new(), payload).await?;
        self.lock_cache().on_write();
        Ok(response)
    }

    /// Classify, throttle and execute one request, retrying rate limit rejections.
    async fn dispatch(
        &self,
        method: Method,
        path: &str,
        params: &Params,
        payload: Option<&Value>,
    ) -> FolioResult<ApiResponse> {
        let ceiling = self.ceiling_for(method, path, params).await;
        debug!(%method, path, ceiling, "Queueing request");

        let response = with_retry(*self.config.max_retries(), self.config.retries_delay(), || {
            self.throttle.execute(ceiling, || {
                self.transport.execute(method, path, params, payload)
            })
        })
        .await?;

        self.detector.detect(&response.headers).await;
        Ok(response)
    }

    async fn ceiling_for(&self, method: Method, path: &str, params: &Params) -> u32 {
        let config = self
            .config
            .rate_limit_config()
            .with_server_headers_rate_limit(self.detector.get_cached().await);
        let fallback = (method.is_write() || !is_cdn_path(path))
            .then_some(MANAGEMENT_API_DEFAULT_RATE_LIMIT);
        determine_rate_limit(Some(path), Some(params), &config, fallback)
    }

    fn scope(&self) -> &str {
        self.get_token().unwrap_or_default()
    }

    fn known_cache_version(&self) -> Option<u64> {
        let cache = self.lock_cache();
        let versions = cache.versions();
        versions
            .contains(self.scope())
            .then(|| versions.get(self.scope()))
    }

    fn lock_cache(&self) -> MutexGuard<'_, ResponseCache> {
        self.cache.lock().unwrap_or_else(PoisonError::into_inner)
    }
}

#[async_trait]
impl StoryLookup for FolioClient {
    #[instrument(skip(self, uuids, params), fields(count = uuids.len()))]
    async fn stories_by_uuids(&self, uuids: &[String], params: &Params) -> FolioResult<Vec<Value>> {
        let params = params
            .clone()
            .with("by_uuids", uuids.join(","))
            .with("per_page", UUID_CHUNK_SIZE as u64);
        let params = prepare_cdn_params(
            params,
            *self.config.version(),
            self.get_token(),
            self.known_cache_version(),
        );

        let response = self.dispatch(Method::Get, "cdn/stories", &params, None).await?;
        Ok(response
            .data
            .get("stories")
            .and_then(Value::as_array)
            .cloned()
            .unwrap_or_default())
    }
}
