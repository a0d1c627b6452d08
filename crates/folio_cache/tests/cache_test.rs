//! Tests for the versioned response cache.

use folio_cache::{CacheKey, ResponseCache, ResponseCacheConfig, ResponseCacheConfigBuilder};
use folio_core::{ApiResponse, CacheClear, Params, Version};
use serde_json::json;

fn response(body: serde_json::Value) -> ApiResponse {
    ApiResponse {
        data: body,
        status: 200,
        ..ApiResponse::default()
    }
}

fn cache_with(clear: CacheClear) -> ResponseCache {
    ResponseCache::new(ResponseCacheConfig::default().with_clear(clear))
}

#[test]
fn test_hit_and_miss() {
    let mut cache = ResponseCache::default();
    let key = CacheKey::new("tok", "cdn/stories/home", &Params::new());
    assert!(cache.get(&key).is_none());

    cache.set(key.clone(), response(json!({"story": {"id": 1}})), 10);
    let hit = cache.get(&key).unwrap();
    assert_eq!(hit.data["story"]["id"], 1);
}

#[test]
fn test_key_ignores_parameter_order_token_and_cv() {
    let a = CacheKey::new(
        "tok",
        "cdn/stories",
        &Params::new().with("token", "tok").with("cv", 1).with("page", 2).with("per_page", 25),
    );
    let b = CacheKey::new(
        "tok",
        "/cdn/stories/",
        &Params::new().with("per_page", 25).with("page", 2).with("cv", 99),
    );
    assert_eq!(a, b);

    let other_page = CacheKey::new("tok", "cdn/stories", &Params::new().with("page", 3).with("per_page", 25));
    assert_ne!(a, other_page);
    let other_scope = CacheKey::new("other", "cdn/stories", &Params::new().with("page", 2).with("per_page", 25));
    assert_ne!(a, other_scope);
}

#[test]
fn test_manual_policy_stops_serving_older_versions() {
    let mut cache = cache_with(CacheClear::Manual);
    let key = CacheKey::new("tok", "cdn/stories", &Params::new());
    let theirs = CacheKey::new("other", "cdn/stories", &Params::new());
    cache.observe_version("tok", 100, Version::Published);
    cache.set(key.clone(), response(json!({})), 100);
    cache.set(theirs.clone(), response(json!({})), 0);

    assert!(!cache.observe_version("tok", 200, Version::Published));
    assert_eq!(cache.len(), 2);
    assert!(cache.get(&key).is_none());
    assert_eq!(cache.len(), 1);
    assert!(cache.get(&theirs).is_some());
    assert_eq!(cache.versions().get("tok"), 200);

    cache.set(key.clone(), response(json!({})), 200);
    assert!(cache.get(&key).is_some());
    cache.flush();
    assert!(cache.get(&key).is_none());
}

#[test]
fn test_set_version_invalidates_scope() {
    let key = CacheKey::new("tok", "cdn/stories", &Params::new());

    let mut auto = cache_with(CacheClear::Auto);
    auto.observe_version("tok", 1, Version::Published);
    auto.set(key.clone(), response(json!({})), 1);
    auto.set_version("tok", 5);
    assert!(auto.is_empty());

    let mut manual = cache_with(CacheClear::Manual);
    manual.observe_version("tok", 1, Version::Published);
    manual.set(key.clone(), response(json!({})), 1);
    manual.set_version("tok", 5);
    assert_eq!(manual.len(), 1);
    assert!(manual.get(&key).is_none());

    manual.set(key.clone(), response(json!({})), 5);
    manual.set_version("tok", 2);
    assert_eq!(manual.versions().get("tok"), 2);
    assert!(manual.get(&key).is_some());
}

#[test]
fn test_auto_policy_invalidates_whole_scope_only() {
    let mut cache = cache_with(CacheClear::Auto);
    let mine_a = CacheKey::new("tok", "cdn/stories/a", &Params::new());
    let mine_b = CacheKey::new("tok", "cdn/stories/b", &Params::new());
    let theirs = CacheKey::new("other", "cdn/stories/a", &Params::new());

    cache.observe_version("tok", 100, Version::Published);
    cache.observe_version("other", 100, Version::Published);
    cache.set(mine_a.clone(), response(json!({})), 100);
    cache.set(mine_b.clone(), response(json!({})), 100);
    cache.set(theirs.clone(), response(json!({})), 100);

    assert!(cache.observe_version("tok", 101, Version::Published));
    assert!(cache.get(&mine_a).is_none());
    assert!(cache.get(&mine_b).is_none());
    assert!(cache.get(&theirs).is_some());
}

#[test]
fn test_versions_never_decrease() {
    let mut cache = cache_with(CacheClear::Auto);
    let key = CacheKey::new("tok", "cdn/stories", &Params::new());
    cache.observe_version("tok", 200, Version::Published);
    cache.set(key.clone(), response(json!({})), 200);

    assert!(!cache.observe_version("tok", 150, Version::Published));
    assert_eq!(cache.versions().get("tok"), 200);
    assert!(cache.get(&key).is_some());
}

#[test]
fn test_onpreview_flushes_only_for_draft_reads() {
    let mut cache = cache_with(CacheClear::OnPreview);
    let key = CacheKey::new("tok", "cdn/stories", &Params::new());
    cache.observe_version("tok", 1, Version::Draft);
    cache.set(key.clone(), response(json!({})), 1);

    assert!(!cache.observe_version("tok", 2, Version::Published));
    assert_eq!(cache.len(), 1);
    cache.set(key.clone(), response(json!({})), 2);
    assert!(cache.get(&key).is_some());
    assert!(cache.observe_version("tok", 3, Version::Draft));
    assert!(cache.get(&key).is_none());
}

#[test]
fn test_unseen_token_version_defaults_to_zero() {
    let mut cache = ResponseCache::default();
    assert_eq!(cache.versions().get("nobody"), 0);
    cache.versions_mut().set("tok", 7);
    assert_eq!(cache.versions().all().len(), 1);
    cache.versions_mut().clear("tok");
    assert_eq!(cache.versions().get("tok"), 0);
}

#[test]
fn test_writes_flush_only_under_auto() {
    let key = CacheKey::new("tok", "cdn/stories", &Params::new());

    let mut manual = cache_with(CacheClear::Manual);
    manual.set(key.clone(), response(json!({})), 0);
    manual.on_write();
    assert_eq!(manual.len(), 1);

    let mut auto = cache_with(CacheClear::Auto);
    auto.set(key, response(json!({})), 0);
    auto.on_write();
    assert!(auto.is_empty());
}

#[test]
fn test_lru_eviction_and_disabled_cache() {
    let config = ResponseCacheConfigBuilder::default().max_size(2).build().unwrap();
    let mut cache = ResponseCache::new(config);
    let keys: Vec<_> = (0..3)
        .map(|i| CacheKey::new("tok", &format!("cdn/stories/{i}"), &Params::new()))
        .collect();

    cache.set(keys[0].clone(), response(json!(0)), 0);
    cache.set(keys[1].clone(), response(json!(1)), 0);
    cache.get(&keys[0]);
    cache.set(keys[2].clone(), response(json!(2)), 0);

    assert!(cache.get(&keys[0]).is_some());
    assert!(cache.get(&keys[1]).is_none());
    assert!(cache.get(&keys[2]).is_some());

    let mut disabled = ResponseCache::new(ResponseCacheConfig::default().with_enabled(false));
    disabled.set(keys[0].clone(), response(json!(0)), 0);
    assert!(disabled.get(&keys[0]).is_none());
}
