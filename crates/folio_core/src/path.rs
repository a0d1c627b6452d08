//! Request path helpers.

/// Strip leading and trailing slashes.
///
/// ```
/// use folio_core::normalize_path;
///
/// assert_eq!(normalize_path("/cdn/stories/"), "cdn/stories");
/// ```
pub fn normalize_path(path: &str) -> &str {
    path.trim_matches('/')
}

/// Whether the path targets the content delivery API.
///
/// ```
/// use folio_core::is_cdn_path;
///
/// assert!(is_cdn_path("cdn/stories"));
/// assert!(is_cdn_path("/cdn/links/"));
/// assert!(!is_cdn_path("spaces/123/stories"));
/// ```
pub fn is_cdn_path(path: &str) -> bool {
    let path = normalize_path(path);
    path == "cdn" || path.starts_with("cdn/") || path.contains("/cdn/")
}

/// Result key for a collection path: its last segment.
///
/// ```
/// use folio_core::entity_key;
///
/// assert_eq!(entity_key("cdn/stories/"), "stories");
/// assert_eq!(entity_key("cdn/datasource_entries"), "datasource_entries");
/// ```
pub fn entity_key(path: &str) -> &str {
    let path = path.trim_end_matches('/');
    path.rsplit('/').next().unwrap_or(path)
}
