//! Per-request resolution settings.

use derive_getters::Getters;
use folio_core::{Params, RelationPattern, ResolveLinks};

/// Read options forwarded from the originating request to identifier lookups.
pub const LOOKUP_PARAMS: [&str; 5] = [
    "version",
    "language",
    "fallback_lang",
    "starts_with",
    "excluding_fields",
];

/// What to resolve for one response.
///
/// # Example
///
/// ```
/// use folio_core::Params;
/// use folio_resolve::ResolveOptions;
///
/// let params = Params::new()
///     .with("resolve_relations", "article.author,article.categories")
///     .with("version", "draft")
///     .with("per_page", 10);
/// let options = ResolveOptions::from_params(&params);
///
/// assert_eq!(options.relations().len(), 2);
/// assert_eq!(*options.depth(), 2);
/// assert_eq!(options.lookup_params().get_str("version"), Some("draft"));
/// assert!(!options.lookup_params().contains_key("per_page"));
/// ```
#[derive(Debug, Clone, Default, PartialEq, Getters, derive_setters::Setters)]
#[setters(prefix = "with_")]
pub struct ResolveOptions {
    /// Fields holding relation identifiers
    relations: Vec<RelationPattern>,
    /// Link resolution mode, if requested
    links: Option<ResolveLinks>,
    /// How many levels of relations to expand
    depth: u32,
    /// Whether to merge response assets into asset fields
    inline_assets: bool,
    /// Parameters forwarded to identifier lookups
    lookup_params: Params,
}

impl ResolveOptions {
    /// Derive options from request parameters.
    ///
    /// Depth comes from `resolve_level`; without it, depth is 2 when
    /// relations were requested and 1 otherwise.
    pub fn from_params(params: &Params) -> Self {
        let relations = params
            .get("resolve_relations")
            .map(RelationPattern::parse_list)
            .unwrap_or_default();
        let links = params.get("resolve_links").and_then(ResolveLinks::from_param);
        let default_depth = if relations.is_empty() { 1 } else { 2 };
        let depth = params
            .get_u64("resolve_level")
            .map(|level| level.clamp(1, u64::from(u32::MAX)) as u32)
            .unwrap_or(default_depth);
        let lookup_params = LOOKUP_PARAMS
            .iter()
            .filter_map(|key| params.get(key).map(|v| (*key, v.clone())))
            .collect();

        Self {
            relations,
            links,
            depth,
            inline_assets: false,
            lookup_params,
        }
    }

    /// Whether any resolution work is requested.
    pub fn is_empty(&self) -> bool {
        self.relations.is_empty() && self.links.is_none() && !self.inline_assets
    }
}
