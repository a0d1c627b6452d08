//! Content node helpers and tree walks.

use folio_core::RelationPattern;
use serde_json::{Map, Value};
use std::collections::HashMap;

/// Key set on substituted entities to forbid further expansion.
pub const STOP_MARKER: &str = "_stopResolving";

/// A content node has a string `component` and a `_uid`.
pub fn is_content_node(map: &Map<String, Value>) -> bool {
    map.get("component").is_some_and(Value::is_string) && map.contains_key("_uid")
}

/// Whether the value carries the stop marker.
pub fn is_stopped(value: &Value) -> bool {
    value
        .get(STOP_MARKER)
        .is_some_and(|v| v.as_bool().unwrap_or(false))
}

/// Tag an entity so no walk descends into it.
pub fn mark_stopped(mut entity: Value) -> Value {
    if let Value::Object(map) = &mut entity {
        map.insert(STOP_MARKER.to_string(), Value::Bool(true));
    }
    entity
}

fn matching_fields<'m>(map: &'m Map<String, Value>, patterns: &[RelationPattern]) -> Vec<&'m str> {
    let Some(component) = map.get("component").and_then(Value::as_str) else {
        return Vec::new();
    };
    map.keys()
        .filter(|field| patterns.iter().any(|p| p.matches(component, field)))
        .map(String::as_str)
        .collect()
}

/// Collect the identifiers held by pattern-matched fields, in walk order.
pub(crate) fn scan_relations(value: &Value, patterns: &[RelationPattern], out: &mut Vec<String>) {
    match value {
        Value::Array(items) => items.iter().for_each(|v| scan_relations(v, patterns, out)),
        Value::Object(map) => {
            if is_stopped(value) {
                return;
            }
            if is_content_node(map) {
                for field in matching_fields(map, patterns) {
                    match map.get(field) {
                        Some(Value::String(id)) => out.push(id.clone()),
                        Some(Value::Array(ids)) => out.extend(
                            ids.iter().filter_map(Value::as_str).map(str::to_string),
                        ),
                        _ => {}
                    }
                }
            }
            map.values().for_each(|v| scan_relations(v, patterns, out));
        }
        _ => {}
    }
}

/// Replace identifiers in pattern-matched fields with their entities.
///
/// Identifiers without an entity are left as they are.
pub(crate) fn substitute_relations(
    value: &mut Value,
    patterns: &[RelationPattern],
    table: &HashMap<String, Value>,
) {
    match value {
        Value::Array(items) => items
            .iter_mut()
            .for_each(|v| substitute_relations(v, patterns, table)),
        Value::Object(map) => {
            if map.get(STOP_MARKER).and_then(Value::as_bool).unwrap_or(false) {
                return;
            }
            let fields: Vec<String> = if is_content_node(map) {
                matching_fields(map, patterns).into_iter().map(str::to_string).collect()
            } else {
                Vec::new()
            };
            for field in &fields {
                if let Some(slot) = map.get_mut(field) {
                    replace_ids(slot, table);
                }
            }
            // Substituted entities are stop-marked, so this only descends
            // into bloks and unresolved values.
            map.values_mut()
                .for_each(|child| substitute_relations(child, patterns, table));
        }
        _ => {}
    }
}

fn replace_ids(slot: &mut Value, table: &HashMap<String, Value>) {
    match slot {
        Value::String(id) => {
            if let Some(entity) = table.get(id.as_str()) {
                *slot = entity.clone();
            }
        }
        Value::Array(items) => {
            for item in items.iter_mut() {
                if let Value::String(id) = item
                    && let Some(entity) = table.get(id.as_str())
                {
                    *item = entity.clone();
                }
            }
        }
        _ => {}
    }
}

/// Identifier of a story link, if `map` is one.
///
/// Multilink fields carry the story uuid as `id`; rich text link marks carry
/// it as `uuid`.
fn link_id(map: &Map<String, Value>) -> Option<&str> {
    if map.get("linktype").and_then(Value::as_str) != Some("story") {
        return None;
    }
    let is_multilink = map.get("fieldtype").and_then(Value::as_str) == Some("multilink");
    match (is_multilink, map.get("id"), map.get("uuid")) {
        (true, Some(Value::String(id)), _) if !id.is_empty() => Some(id),
        (_, _, Some(Value::String(uuid))) if !uuid.is_empty() => Some(uuid),
        _ => None,
    }
}

/// Collect story link identifiers, in walk order.
pub(crate) fn scan_links(value: &Value, out: &mut Vec<String>) {
    match value {
        Value::Array(items) => items.iter().for_each(|v| scan_links(v, out)),
        Value::Object(map) => {
            if is_stopped(value) {
                return;
            }
            if let Some(id) = link_id(map) {
                out.push(id.to_string());
            }
            map.values().for_each(|v| scan_links(v, out));
        }
        _ => {}
    }
}

/// Attach resolved stories to link objects under `story`.
pub(crate) fn substitute_links(value: &mut Value, table: &HashMap<String, Value>) {
    match value {
        Value::Array(items) => items
            .iter_mut()
            .for_each(|v| substitute_links(v, table)),
        Value::Object(map) => {
            if map.get(STOP_MARKER).and_then(Value::as_bool).unwrap_or(false) {
                return;
            }
            let resolved = link_id(map).and_then(|id| table.get(id)).cloned();
            for child in map.values_mut() {
                substitute_links(child, table);
            }
            if let Some(entity) = resolved {
                map.insert("story".to_string(), entity);
            }
        }
        _ => {}
    }
}
