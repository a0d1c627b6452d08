//! Parameter preparation for delivery API reads.

use folio_core::{Params, Version};
use serde_json::Value;

/// Fill in the parameters every delivery API read carries.
///
/// - `version` defaults to `version`;
/// - `token` is the access token, when one is configured;
/// - `cv` is the last content version seen for that token, when known;
/// - a list of `resolve_relations` is joined with commas, and
///   `resolve_level` defaults to 2 whenever relations are requested.
///
/// Parameters the caller set explicitly are kept.
///
/// ```
/// use folio::prepare_cdn_params;
/// use folio_core::{Params, Version};
/// use serde_json::json;
///
/// let params = Params::new().with("resolve_relations", json!(["page.hero", "post.author"]));
/// let params = prepare_cdn_params(params, Version::Draft, Some("tok"), Some(42));
///
/// assert_eq!(params.get_str("version"), Some("draft"));
/// assert_eq!(params.get_str("token"), Some("tok"));
/// assert_eq!(params.get_u64("cv"), Some(42));
/// assert_eq!(params.get_str("resolve_relations"), Some("page.hero,post.author"));
/// assert_eq!(params.get_u64("resolve_level"), Some(2));
/// ```
pub fn prepare_cdn_params(
    mut params: Params,
    version: Version,
    token: Option<&str>,
    cache_version: Option<u64>,
) -> Params {
    if !params.contains_key("version") {
        params.insert("version", version.to_string());
    }
    if let Some(token) = token
        && !params.contains_key("token")
    {
        params.insert("token", token);
    }
    if let Some(cv) = cache_version
        && !params.contains_key("cv")
    {
        params.insert("cv", cv);
    }

    if let Some(Value::Array(relations)) = params.get("resolve_relations") {
        let joined = relations
            .iter()
            .filter_map(Value::as_str)
            .collect::<Vec<_>>()
            .join(",");
        params.insert("resolve_relations", joined);
    }
    if params.contains_key("resolve_relations") && !params.contains_key("resolve_level") {
        params.insert("resolve_level", 2);
    }
    params
}

/// Content version a prepared read asks for.
pub(crate) fn requested_version(params: &Params, default: Version) -> Version {
    params
        .get_str("version")
        .and_then(|v| v.parse().ok())
        .unwrap_or(default)
}
