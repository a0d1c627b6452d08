//! Cache keys.

use folio_core::{Method, Params, Version, normalize_path};

/// Parameters that describe the credential or the cache version rather than
/// the content being read.
const UNKEYED_PARAMS: [&str; 2] = ["token", "cv"];

/// Identity of a cached read.
///
/// Built from the credential scope, the normalized path and the sorted
/// parameters, so parameter order never produces distinct keys.
///
/// ```
/// use folio_cache::CacheKey;
/// use folio_core::Params;
///
/// let a = CacheKey::new("tok", "/cdn/stories/", &Params::new().with("page", 1).with("per_page", 25));
/// let b = CacheKey::new("tok", "cdn/stories", &Params::new().with("per_page", 25).with("page", 1));
/// assert_eq!(a, b);
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct CacheKey {
    scope: String,
    path: String,
    signature: String,
}

impl CacheKey {
    /// Key for a read of `path` with `params` under the credential `scope`.
    pub fn new(scope: &str, path: &str, params: &Params) -> Self {
        let signature = params
            .sorted()
            .into_iter()
            .filter(|(k, _)| !UNKEYED_PARAMS.contains(k))
            .map(|(k, v)| format!("{k}={v}"))
            .collect::<Vec<_>>()
            .join("&");
        Self {
            scope: scope.to_string(),
            path: normalize_path(path).to_string(),
            signature,
        }
    }

    /// Credential scope.
    pub fn scope(&self) -> &str {
        &self.scope
    }

    /// Normalized path.
    pub fn path(&self) -> &str {
        &self.path
    }
}

/// Whether a request may be served from and stored in the cache.
///
/// Only published reads are cached, and never the space lookup.
///
/// ```
/// use folio_cache::is_cacheable;
/// use folio_core::{Method, Version};
///
/// assert!(is_cacheable(Method::Get, "cdn/stories", Version::Published));
/// assert!(!is_cacheable(Method::Get, "cdn/stories", Version::Draft));
/// assert!(!is_cacheable(Method::Get, "/cdn/spaces/me", Version::Published));
/// assert!(!is_cacheable(Method::Post, "cdn/stories", Version::Published));
/// ```
pub fn is_cacheable(method: Method, path: &str, version: Version) -> bool {
    method == Method::Get && version == Version::Published && normalize_path(path) != "cdn/spaces/me"
}
