//! Response caching for idempotent reads.
//!
//! Entries are scoped by credential and tagged with the content version
//! (`cv`) the server reported when they were stored. A newer version for a
//! scope invalidates every entry of that scope when the clear policy asks for
//! it.

#![warn(missing_docs)]

mod cache;
mod key;
mod versions;

pub use cache::{CacheEntry, ResponseCache, ResponseCacheConfig, ResponseCacheConfigBuilder};
pub use key::{CacheKey, is_cacheable};
pub use versions::CacheVersions;
