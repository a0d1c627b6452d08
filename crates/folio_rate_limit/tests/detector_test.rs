//! Tests for rate limit header detection.

use folio_rate_limit::{HeaderRateLimitDetector, RateLimitHeaders};
use reqwest::header::{HeaderMap, HeaderValue};

fn headers(pairs: &[(&'static str, &'static str)]) -> HeaderMap {
    let mut map = HeaderMap::new();
    for (k, v) in pairs {
        map.insert(*k, HeaderValue::from_static(v));
    }
    map
}

#[test]
fn test_parse_both_headers() {
    let map = headers(&[
        ("x-ratelimit", "\"concurrent-requests\";r=29"),
        ("x-ratelimit-policy", "\"concurrent-requests\";q=30"),
    ]);
    assert_eq!(
        RateLimitHeaders::parse(&map),
        Some(RateLimitHeaders {
            remaining: Some(29),
            max: Some(30)
        })
    );
}

#[test]
fn test_parse_is_case_insensitive() {
    let map = headers(&[("X-RateLimit", "\"concurrent-requests\";r=5")]);
    let parsed = RateLimitHeaders::parse(&map).unwrap();
    assert_eq!(parsed.remaining, Some(5));
    assert_eq!(parsed.max, None);
}

#[test]
fn test_malformed_or_absent_headers_give_no_signal() {
    assert_eq!(RateLimitHeaders::parse(&HeaderMap::new()), None);
    let map = headers(&[
        ("x-ratelimit", "concurrent-requests"),
        ("x-ratelimit-policy", "q=lots"),
    ]);
    assert_eq!(RateLimitHeaders::parse(&map), None);
}

#[tokio::test]
async fn test_detector_keeps_last_advertised_max() {
    let detector = HeaderRateLimitDetector::new();
    assert_eq!(detector.get_cached().await, None);

    detector
        .detect(&headers(&[("x-ratelimit-policy", "\"concurrent-requests\";q=100")]))
        .await;
    assert_eq!(detector.get_cached().await, Some(100));

    // A response without a policy keeps the previous value.
    detector.detect(&headers(&[("x-ratelimit", "r=3")])).await;
    assert_eq!(detector.get_cached().await, Some(100));

    detector.clear_cache().await;
    assert_eq!(detector.get_cached().await, None);
}
