//! Chunked relation and link resolution.

use crate::ResolveOptions;
use crate::node::{mark_stopped, scan_links, scan_relations, substitute_links, substitute_relations};
use folio_error::FolioResult;
use folio_interface::StoryLookup;
use futures::future::try_join_all;
use serde_json::Value;
use std::collections::{HashMap, HashSet};
use tracing::{debug, instrument};

/// Most identifiers the backing service resolves in one request.
pub const UUID_CHUNK_SIZE: usize = 50;

/// Resolves the references of one response.
///
/// Works on the decoded response body: the content lives under `story` or
/// `stories`, inline entities under `rels` / `links`, and identifiers the
/// server could not inline under `rel_uuids` / `link_uuids`.
pub struct Resolver<'a> {
    lookup: &'a dyn StoryLookup,
    options: ResolveOptions,
}

impl<'a> Resolver<'a> {
    /// Resolver fetching missing entities through `lookup`.
    pub fn new(lookup: &'a dyn StoryLookup, options: ResolveOptions) -> Self {
        Self { lookup, options }
    }

    /// Options in effect.
    pub fn options(&self) -> &ResolveOptions {
        &self.options
    }

    /// Resolve relations, links and assets in place.
    ///
    /// Lookups for a level run concurrently; any failed lookup fails the
    /// whole resolution. Identifiers that no lookup returns stay as they are.
    #[instrument(
        skip_all,
        fields(
            relations = self.options.relations().len(),
            links = ?self.options.links(),
            depth = *self.options.depth()
        )
    )]
    pub async fn resolve(&self, data: &mut Value) -> FolioResult<()> {
        if !self.options.relations().is_empty() {
            self.resolve_relations(data).await?;
        }
        if self.options.links().is_some() {
            self.resolve_links(data).await?;
        }
        if *self.options.inline_assets() {
            crate::inline_assets(data);
        }
        if let Value::Object(map) = data {
            map.remove("rel_uuids");
            map.remove("link_uuids");
        }
        Ok(())
    }

    async fn resolve_relations(&self, data: &mut Value) -> FolioResult<()> {
        let patterns = self.options.relations();
        let mut raw = index_entities(data.get("rels"));

        let mut wanted = string_list(data.get("rel_uuids"));
        for root in content_roots(data) {
            scan_relations(root, patterns, &mut wanted);
        }
        let fetched = self.fetch_missing(wanted, &raw).await?;
        raw.extend(fetched);

        // Expand references held by the entities themselves, one level at a time.
        let mut frontier: Vec<String> = raw.keys().cloned().collect();
        for level in 2..=*self.options.depth() {
            let mut wanted = Vec::new();
            for id in &frontier {
                if let Some(content) = raw.get(id).and_then(|e| e.get("content")) {
                    scan_relations(content, patterns, &mut wanted);
                }
            }
            let fetched = self.fetch_missing(wanted, &raw).await?;
            if fetched.is_empty() {
                break;
            }
            debug!(level, fetched = fetched.len(), "Fetched nested relations");
            frontier = fetched.keys().cloned().collect();
            raw.extend(fetched);
        }

        // Build entities whose own references are resolved down to `depth`.
        let mut resolved = raw.clone();
        for _ in 1..*self.options.depth() {
            resolved = raw
                .iter()
                .map(|(id, entity)| {
                    let mut entity = entity.clone();
                    if let Some(content) = entity.get_mut("content") {
                        substitute_relations(content, patterns, &resolved);
                    }
                    (id.clone(), entity)
                })
                .collect();
        }

        for root in content_roots_mut(data) {
            substitute_relations(root, patterns, &resolved);
        }
        Ok(())
    }

    async fn resolve_links(&self, data: &mut Value) -> FolioResult<()> {
        let mut table = index_entities(data.get("links"));
        let mut wanted = string_list(data.get("link_uuids"));
        for root in content_roots(data) {
            scan_links(root, &mut wanted);
        }
        let fetched = self.fetch_missing(wanted, &table).await?;
        table.extend(fetched);

        for root in content_roots_mut(data) {
            substitute_links(root, &table);
        }
        Ok(())
    }

    /// Fetch identifiers not yet in `known`, deduplicated, in chunks.
    async fn fetch_missing(
        &self,
        wanted: Vec<String>,
        known: &HashMap<String, Value>,
    ) -> FolioResult<HashMap<String, Value>> {
        let mut seen = HashSet::new();
        let pending: Vec<String> = wanted
            .into_iter()
            .filter(|id| !known.contains_key(id) && seen.insert(id.clone()))
            .collect();
        if pending.is_empty() {
            return Ok(HashMap::new());
        }

        let chunks: Vec<&[String]> = pending.chunks(UUID_CHUNK_SIZE).collect();
        debug!(identifiers = pending.len(), chunks = chunks.len(), "Fetching referenced stories");
        let lookup_params = self.options.lookup_params();
        let pages = try_join_all(
            chunks
                .iter()
                .map(|chunk| self.lookup.stories_by_uuids(chunk, lookup_params)),
        )
        .await?;

        Ok(pages
            .into_iter()
            .flatten()
            .filter_map(|story| {
                let uuid = story.get("uuid")?.as_str()?.to_string();
                Some((uuid, mark_stopped(story)))
            })
            .collect())
    }
}

fn index_entities(list: Option<&Value>) -> HashMap<String, Value> {
    list.and_then(Value::as_array)
        .map(|items| {
            items
                .iter()
                .filter_map(|e| Some((e.get("uuid")?.as_str()?.to_string(), mark_stopped(e.clone()))))
                .collect()
        })
        .unwrap_or_default()
}

fn string_list(value: Option<&Value>) -> Vec<String> {
    value
        .and_then(Value::as_array)
        .map(|ids| ids.iter().filter_map(Value::as_str).map(str::to_string).collect())
        .unwrap_or_default()
}

fn content_roots(data: &Value) -> Vec<&Value> {
    ["story", "stories"]
        .into_iter()
        .filter_map(|key| data.get(key))
        .collect()
}

fn content_roots_mut(data: &mut Value) -> Vec<&mut Value> {
    match data {
        Value::Object(map) => map
            .iter_mut()
            .filter(|(k, _)| *k == "story" || *k == "stories")
            .map(|(_, v)| v)
            .collect(),
        _ => Vec::new(),
    }
}
