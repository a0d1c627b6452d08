//! Inline asset enrichment.

use serde_json::{Map, Value};
use std::collections::HashMap;
use tracing::debug;

/// Merge entries of the response's `assets` array into matching asset fields.
///
/// A field matches when it has `fieldtype = "asset"` and an `id` equal to an
/// asset's `id`. The asset's members come first and the field's own members
/// override them. Returns the number of fields enriched.
///
/// ```
/// use folio_resolve::inline_assets;
/// use serde_json::json;
///
/// let mut data = json!({
///     "story": {"content": {"image": {"id": 7, "fieldtype": "asset", "alt": "mine"}}},
///     "assets": [{"id": 7, "alt": "theirs", "content_type": "image/png"}]
/// });
/// assert_eq!(inline_assets(&mut data), 1);
/// assert_eq!(data["story"]["content"]["image"]["alt"], "mine");
/// assert_eq!(data["story"]["content"]["image"]["content_type"], "image/png");
/// ```
pub fn inline_assets(data: &mut Value) -> usize {
    let assets: HashMap<String, Map<String, Value>> = data
        .get("assets")
        .and_then(Value::as_array)
        .map(|items| {
            items
                .iter()
                .filter_map(|a| Some((a.get("id")?.to_string(), a.as_object()?.clone())))
                .collect()
        })
        .unwrap_or_default();
    if assets.is_empty() {
        return 0;
    }

    let mut count = 0;
    for root in ["story", "stories"] {
        if let Some(value) = data.get_mut(root) {
            count += enrich(value, &assets);
        }
    }
    debug!(enriched = count, available = assets.len(), "Inlined assets");
    count
}

fn enrich(value: &mut Value, assets: &HashMap<String, Map<String, Value>>) -> usize {
    match value {
        Value::Array(items) => items.iter_mut().map(|v| enrich(v, assets)).sum(),
        Value::Object(map) => {
            let is_asset = map.get("fieldtype").and_then(Value::as_str) == Some("asset");
            if is_asset
                && let Some(asset) = map.get("id").and_then(|id| assets.get(&id.to_string()))
            {
                let mut merged = asset.clone();
                merged.extend(std::mem::take(map));
                *map = merged;
                return 1;
            }
            map.values_mut().map(|v| enrich(v, assets)).sum()
        }
        _ => 0,
    }
}
