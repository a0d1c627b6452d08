//! Mapping of a request onto its requests-per-second ceiling.

use crate::{ContentTier, DEFAULT_PER_PAGE, MAX_RATE_LIMIT, RateLimitConfig};
use folio_core::{Params, normalize_path};
use tracing::{debug, instrument};

/// Whether the request addresses a single story.
///
/// True for `cdn/stories/<id>` style paths and for any request carrying a
/// `find_by` parameter.
///
/// ```
/// use folio_core::Params;
/// use folio_rate_limit::is_single_story_request;
///
/// let none = Params::new();
/// assert!(is_single_story_request("/cdn/stories/home", &none));
/// assert!(!is_single_story_request("/cdn/stories", &none));
/// assert!(is_single_story_request("/cdn/stories", &Params::new().with("find_by", "uuid")));
/// ```
pub fn is_single_story_request(path: &str, params: &Params) -> bool {
    if params.contains_key("find_by") {
        return true;
    }
    let path = normalize_path(path);
    let rest = if let Some(rest) = path.strip_prefix("cdn/stories/") {
        rest
    } else if let Some((_, rest)) = path.split_once("/cdn/stories/") {
        rest
    } else {
        return false;
    };
    !rest.is_empty()
}

/// Determine the ceiling for a request.
///
/// Precedence:
/// 1. the caller's configured ceiling, capped at [`MAX_RATE_LIMIT`];
/// 2. the server-reported ceiling, capped at [`MAX_RATE_LIMIT`];
/// 3. `default_rate_limit`, returned as given;
/// 4. 50 when the path or params are unknown, or for single story requests;
/// 5. the [`ContentTier`] of the effective page size.
///
/// ```
/// use folio_core::Params;
/// use folio_rate_limit::{RateLimitConfig, determine_rate_limit};
///
/// let params = Params::new().with("per_page", 60);
/// let config = RateLimitConfig::default();
/// assert_eq!(determine_rate_limit(Some("cdn/stories"), Some(&params), &config, None), 10);
/// assert_eq!(determine_rate_limit(Some("cdn/stories"), Some(&params), &config, Some(3)), 3);
/// ```
#[instrument(level = "trace", skip(params, config))]
pub fn determine_rate_limit(
    path: Option<&str>,
    params: Option<&Params>,
    config: &RateLimitConfig,
    default_rate_limit: Option<u32>,
) -> u32 {
    if let Some(user) = config.user_rate_limit() {
        return (*user).min(MAX_RATE_LIMIT);
    }
    if let Some(server) = config.server_headers_rate_limit() {
        return (*server).min(MAX_RATE_LIMIT);
    }
    if let Some(default) = default_rate_limit {
        return default;
    }

    let (Some(path), Some(params)) = (path, params) else {
        return ContentTier::SingleOrSmall.ceiling();
    };
    if is_single_story_request(path, params) {
        return ContentTier::SingleOrSmall.ceiling();
    }

    let per_page = params
        .get_u64("per_page")
        .filter(|n| *n > 0)
        .unwrap_or(DEFAULT_PER_PAGE);
    let tier = ContentTier::for_page_size(per_page);
    debug!(per_page, %tier, "Classified listing request");
    tier.ceiling().min(MAX_RATE_LIMIT)
}
