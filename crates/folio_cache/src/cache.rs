//! Versioned response cache implementation.

use crate::{CacheKey, CacheVersions};
use derive_getters::Getters;
use folio_core::{ApiResponse, CacheClear, Version};
use serde::{Deserialize, Serialize};
use std::collections::HashMap;

/// Cached response with the content version it was stored under.
#[derive(Debug, Clone, Getters)]
pub struct CacheEntry {
    value: ApiResponse,
    version: u64,
}

/// Configuration for the response cache.
#[derive(
    Debug, Clone, Serialize, Deserialize, Getters, derive_setters::Setters, derive_builder::Builder,
)]
#[setters(prefix = "with_")]
#[builder(default)]
pub struct ResponseCacheConfig {
    /// Invalidation policy
    #[serde(default)]
    clear: CacheClear,

    /// Maximum number of entries before the least recently used is evicted
    #[serde(default = "default_max_size")]
    max_size: usize,

    /// Whether caching is enabled
    #[serde(default = "default_enabled")]
    enabled: bool,
}

fn default_max_size() -> usize {
    1000
}

fn default_enabled() -> bool {
    true
}

impl Default for ResponseCacheConfig {
    fn default() -> Self {
        Self {
            clear: CacheClear::default(),
            max_size: default_max_size(),
            enabled: default_enabled(),
        }
    }
}

/// Cache of read responses.
///
/// # Example
///
/// ```
/// use folio_cache::{CacheKey, ResponseCache, ResponseCacheConfig};
/// use folio_core::{ApiResponse, Params};
///
/// let mut cache = ResponseCache::new(ResponseCacheConfig::default());
/// let key = CacheKey::new("token", "cdn/stories/home", &Params::new());
///
/// cache.set(key.clone(), ApiResponse::default(), 0);
/// assert!(cache.get(&key).is_some());
///
/// cache.flush();
/// assert!(cache.get(&key).is_none());
/// ```
#[derive(Debug)]
pub struct ResponseCache {
    config: ResponseCacheConfig,
    entries: HashMap<CacheKey, CacheEntry>,
    access_order: Vec<CacheKey>,
    versions: CacheVersions,
}

impl ResponseCache {
    /// Create a new cache with configuration.
    pub fn new(config: ResponseCacheConfig) -> Self {
        tracing::debug!(
            clear = %config.clear,
            max_size = config.max_size,
            enabled = config.enabled,
            "Creating new ResponseCache"
        );
        Self {
            config,
            entries: HashMap::new(),
            access_order: Vec::new(),
            versions: CacheVersions::new(),
        }
    }

    /// Active configuration.
    pub fn config(&self) -> &ResponseCacheConfig {
        &self.config
    }

    /// Look up a cached response.
    ///
    /// Entries stored under a content version older than the one now
    /// recorded for their scope are stale: they are dropped, never served.
    #[tracing::instrument(skip(self, key), fields(path = key.path(), cache_size = self.entries.len()))]
    pub fn get(&mut self, key: &CacheKey) -> Option<ApiResponse> {
        if !self.config.enabled {
            return None;
        }
        let entry = self.entries.get(key)?;
        let current = self.versions.get(key.scope());
        if entry.version < current {
            tracing::debug!(stored = entry.version, current, "Dropping stale entry");
            self.remove(key);
            return None;
        }
        let value = entry.value.clone();

        if let Some(pos) = self.access_order.iter().position(|k| k == key) {
            let key = self.access_order.remove(pos);
            self.access_order.push(key);
        }
        tracing::debug!("Cache hit");
        Some(value)
    }

    /// Store a response under `key`, tagged with `version`.
    #[tracing::instrument(skip(self, key, value), fields(path = key.path(), cache_size = self.entries.len()))]
    pub fn set(&mut self, key: CacheKey, value: ApiResponse, version: u64) {
        if !self.config.enabled {
            tracing::debug!("Cache disabled, skipping insert");
            return;
        }

        if self.entries.len() >= self.config.max_size && !self.entries.contains_key(&key) {
            self.evict_lru();
        }

        if let Some(pos) = self.access_order.iter().position(|k| k == &key) {
            self.access_order.remove(pos);
        }
        self.access_order.push(key.clone());
        self.entries.insert(key, CacheEntry { value, version });
    }

    /// Record the content version reported for `scope`.
    ///
    /// A version newer than the one on record makes every older entry of the
    /// scope stale. When the clear policy applies to reads of `read_version`
    /// those entries are also dropped right away. Older or equal versions are
    /// ignored. Returns whether entries were dropped.
    #[tracing::instrument(skip(self))]
    pub fn observe_version(&mut self, scope: &str, version: u64, read_version: Version) -> bool {
        let known = self.versions.get(scope);
        if self.versions.contains(scope) && version <= known {
            return false;
        }
        self.versions.set(scope, version);

        let had_version = known != 0;
        if had_version && self.config.clear.flushes_on_version_change(read_version) {
            let dropped = self.flush_scope(scope);
            tracing::debug!(previous = known, dropped, "Content version changed, flushed scope");
            return dropped > 0;
        }
        false
    }

    /// Record `version` for `scope` as set by the caller.
    ///
    /// Unlike [`ResponseCache::observe_version`] this may move the version
    /// backwards. A raise makes older entries stale and, under the automatic
    /// policy, drops them.
    pub fn set_version(&mut self, scope: &str, version: u64) {
        let previous = self.versions.set(scope, version);
        if version > previous && self.config.clear == CacheClear::Auto {
            let dropped = self.flush_scope(scope);
            tracing::debug!(previous, version, dropped, "Cache version raised, flushed scope");
        }
    }

    /// Invalidate after a write when the policy is automatic.
    pub fn on_write(&mut self) {
        if self.config.clear == CacheClear::Auto {
            tracing::debug!("Write under auto policy, flushing cache");
            self.flush();
        }
    }

    /// Drop every entry stored under `scope`. Returns the number dropped.
    pub fn flush_scope(&mut self, scope: &str) -> usize {
        let before = self.entries.len();
        self.entries.retain(|k, _| k.scope() != scope);
        self.access_order.retain(|k| k.scope() != scope);
        before - self.entries.len()
    }

    /// Drop all entries. Recorded versions are kept.
    pub fn flush(&mut self) {
        let count = self.entries.len();
        self.entries.clear();
        self.access_order.clear();
        tracing::info!(cleared = count, "Flushed response cache");
    }

    /// Recorded content versions.
    pub fn versions(&self) -> &CacheVersions {
        &self.versions
    }

    /// Mutable access to the recorded content versions.
    pub fn versions_mut(&mut self) -> &mut CacheVersions {
        &mut self.versions
    }

    /// Get number of cached entries.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Check if cache is empty.
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    fn remove(&mut self, key: &CacheKey) {
        self.entries.remove(key);
        self.access_order.retain(|k| k != key);
    }

    fn evict_lru(&mut self) {
        if !self.access_order.is_empty() {
            let key = self.access_order.remove(0);
            tracing::debug!(path = key.path(), "Evicting LRU entry");
            self.entries.remove(&key);
        }
    }
}

impl Default for ResponseCache {
    fn default() -> Self {
        Self::new(ResponseCacheConfig::default())
    }
}
