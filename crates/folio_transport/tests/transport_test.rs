//! Tests for the transport adapter using a scripted fetch.

mod test_utils;

use folio_core::{FetchResponse, Method, Params};
use folio_error::{FolioErrorKind, TIMEOUT_MESSAGE, TransportError};
use folio_transport::{ResponseInterceptor, Transport};
use serde_json::json;
use std::sync::Arc;
use std::time::Duration;
use test_utils::MockFetch;

const BASE: &str = "https://api.storyblok.com/v2/";

fn transport(mock: &Arc<MockFetch>) -> Transport {
    Transport::new(BASE).with_fetch(mock.clone())
}

#[tokio::test]
async fn test_get_serializes_params_onto_query() -> anyhow::Result<()> {
    let mock = Arc::new(MockFetch::always(FetchResponse::json(200, &json!({"data": "test"}))));
    let params = Params::new().with("is_startpage", false).with("search_term", "test");

    let response = transport(&mock).get("test", &params).await?;

    assert_eq!(response.status, 200);
    assert_eq!(response.data, json!({"data": "test"}));
    let request = &mock.requests()[0];
    assert_eq!(request.method, Method::Get);
    assert_eq!(request.url, "https://api.storyblok.com/v2/test?is_startpage=false&search_term=test");
    assert!(request.body.is_none());
    Ok(())
}

#[tokio::test]
async fn test_writes_send_json_bodies() -> anyhow::Result<()> {
    let mock = Arc::new(MockFetch::always(FetchResponse::json(201, &json!({"story": {}}))));
    let transport = transport(&mock).with_header("Authorization", "oauth-token");

    transport.post("stories", Some(&json!({"title": "New Story"}))).await?;
    transport.put("stories/1", Some(&json!({"title": "Renamed"}))).await?;
    transport.delete("stories/1", None).await?;

    let requests = mock.requests();
    assert_eq!(requests[0].method, Method::Post);
    assert_eq!(requests[0].url, "https://api.storyblok.com/v2/stories");
    assert_eq!(requests[0].body.as_deref(), Some(r#"{"title":"New Story"}"#));
    assert_eq!(requests[0].headers["content-type"], "application/json");
    assert_eq!(requests[0].headers["authorization"], "oauth-token");
    assert_eq!(requests[1].method, Method::Put);
    assert_eq!(requests[2].method, Method::Delete);
    assert_eq!(requests[2].body.as_deref(), Some("{}"));
    Ok(())
}

#[tokio::test(start_paused = true)]
async fn test_deadline_cancels_at_configured_time() {
    let mock = Arc::new(
        MockFetch::always(FetchResponse::json(200, &json!({}))).with_delay(Duration::from_secs(5)),
    );
    let transport = transport(&mock).with_timeout_secs(2.0);

    let started = tokio::time::Instant::now();
    let pending = tokio::spawn(async move { transport.get("cdn/stories", &Params::new()).await });

    tokio::time::sleep(Duration::from_millis(1900)).await;
    assert!(!pending.is_finished());
    assert_eq!(mock.call_count(), 1);

    let err = pending.await.unwrap().unwrap_err();
    assert!(started.elapsed() >= Duration::from_secs(2));
    assert!(started.elapsed() < Duration::from_secs(5));
    assert_eq!(err.transport_message().as_deref(), Some(TIMEOUT_MESSAGE));
}

#[tokio::test(start_paused = true)]
async fn test_fractional_deadline() {
    let mock = Arc::new(
        MockFetch::always(FetchResponse::json(200, &json!({}))).with_delay(Duration::from_secs(5)),
    );
    let err = transport(&mock)
        .with_timeout_secs(0.5)
        .get("cdn/stories", &Params::new())
        .await
        .unwrap_err();
    assert_eq!(err.transport_message().as_deref(), Some(TIMEOUT_MESSAGE));
}

#[tokio::test(start_paused = true)]
async fn test_zero_timeout_disables_deadline() -> anyhow::Result<()> {
    let mock = Arc::new(
        MockFetch::always(FetchResponse::json(200, &json!({"ok": true}))).with_delay(Duration::from_secs(30)),
    );
    let transport = transport(&mock).with_timeout_secs(0.0);
    assert_eq!(transport.timeout(), None);

    let response = transport.get("cdn/stories", &Params::new()).await?;
    assert_eq!(response.data["ok"], true);
    Ok(())
}

#[tokio::test(start_paused = true)]
async fn test_response_before_deadline_succeeds() -> anyhow::Result<()> {
    let mock = Arc::new(
        MockFetch::always(FetchResponse::json(200, &json!({"ok": true}))).with_delay(Duration::from_millis(500)),
    );
    let response = transport(&mock).with_timeout_secs(2.0).get("cdn/stories", &Params::new()).await?;
    assert_eq!(response.status, 200);
    Ok(())
}

#[tokio::test]
async fn test_network_failure_carries_only_message() {
    let mock = Arc::new(MockFetch::new(|_| Err(TransportError::network("Network Failure"))));
    let err = transport(&mock).get("cdn/stories", &Params::new()).await.unwrap_err();

    assert_eq!(err.transport_message().as_deref(), Some("Network Failure"));
    assert_eq!(err.status(), None);
}

#[tokio::test]
async fn test_error_status_keeps_status_and_text() {
    let mock = Arc::new(MockFetch::always(FetchResponse::json(404, &json!({"error": "not found"}))));
    let err = transport(&mock).get("cdn/stories/missing", &Params::new()).await.unwrap_err();

    match err.kind() {
        FolioErrorKind::Http(http) => {
            assert_eq!(http.status, 404);
            assert_eq!(http.status_text, "Not Found");
            assert!(http.body.contains("not found"));
        }
        other => panic!("expected http error, got {other}"),
    }
}

#[tokio::test]
async fn test_no_content_yields_empty_object() -> anyhow::Result<()> {
    let mock = Arc::new(MockFetch::always(FetchResponse {
        status: 204,
        status_text: "No Content".into(),
        ..FetchResponse::default()
    }));
    let response = transport(&mock).delete("stories/1", None).await?;
    assert_eq!(response.data, json!({}));
    Ok(())
}

#[tokio::test]
async fn test_pagination_headers_are_lifted() -> anyhow::Result<()> {
    let mock = Arc::new(MockFetch::always(
        FetchResponse::json(200, &json!({"stories": []}))
            .with_header("per-page", "100")
            .with_header("total", "1000"),
    ));
    let response = transport(&mock).get("cdn/stories", &Params::new()).await?;
    assert_eq!(response.per_page, Some(100));
    assert_eq!(response.total, Some(1000));
    Ok(())
}

#[tokio::test]
async fn test_interceptor_runs_before_status_check() -> anyhow::Result<()> {
    let mock = Arc::new(MockFetch::always(FetchResponse::json(404, &json!({"error": "gone"}))));
    let interceptor: ResponseInterceptor = Arc::new(|mut response| {
        response.status = 200;
        response.data = json!({"story": null, "intercepted": true});
        response
    });

    let response = transport(&mock)
        .with_interceptor(Some(interceptor))
        .get("cdn/stories/gone", &Params::new())
        .await?;
    assert_eq!(response.data["intercepted"], true);
    Ok(())
}
