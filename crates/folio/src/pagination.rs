//! Fetch every page of a collection.

use folio_core::ApiResponse;
use folio_error::FolioResult;
use futures::future::try_join_all;
use serde_json::Value;
use std::future::Future;
use tracing::{debug, instrument};

/// Number of pages needed for `total` items at `per_page` items a page.
///
/// ```
/// use folio::page_count;
///
/// assert_eq!(page_count(1000, 100), 10);
/// assert_eq!(page_count(100, 25), 4);
/// assert_eq!(page_count(101, 25), 5);
/// assert_eq!(page_count(0, 25), 1);
/// ```
pub fn page_count(total: u64, per_page: u64) -> u64 {
    total.div_ceil(per_page.max(1)).max(1)
}

/// Entities stored under `key` in a page body.
///
/// Arrays are returned as they are; objects contribute their values.
pub fn page_entities(data: &Value, key: &str) -> Vec<Value> {
    match data.get(key) {
        Some(Value::Array(items)) => items.clone(),
        Some(Value::Object(map)) => map.values().cloned().collect(),
        _ => Vec::new(),
    }
}

/// Fetch page 1, then every remaining page concurrently.
///
/// The page size reported by the first response wins over `requested_per_page`.
/// Entities are concatenated in page order. Any failed page fails the whole call.
#[instrument(skip(fetch_page))]
pub async fn fetch_all_pages<F, Fut>(
    key: &str,
    requested_per_page: u64,
    fetch_page: F,
) -> FolioResult<Vec<Value>>
where
    F: Fn(u64) -> Fut,
    Fut: Future<Output = FolioResult<ApiResponse>>,
{
    let first = fetch_page(1).await?;
    let per_page = first
        .per_page
        .filter(|n| *n > 0)
        .unwrap_or(requested_per_page);
    let pages = page_count(first.total.unwrap_or(0), per_page);
    debug!(total = ?first.total, per_page, pages, "Fetching remaining pages");

    let rest = try_join_all((2..=pages).map(&fetch_page)).await?;

    Ok(std::iter::once(&first)
        .chain(rest.iter())
        .flat_map(|page| page_entities(&page.data, key))
        .collect())
}
