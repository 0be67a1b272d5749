//! Integration tests for the recommendation pipeline.
//!
//! Unlike unit tests, these exercise the whole chain (input, status gate,
//! HTTP round trip, history append) against a real HTTP server: a small
//! axum app bound to an ephemeral localhost port, standing in for the
//! remote recommendation service. No network access beyond loopback and no
//! live service are required, so the suite runs unconditionally.

use axum::extract::{Query, State};
use axum::http::StatusCode;
use axum::response::IntoResponse;
use axum::routing::get;
use axum::{Json, Router};
use imagerec::{
    recommend, ApiStatus, ClientConfig, Document, ImageMode, QueryInput, RecommendClient,
    RecommendError, SessionHistory,
};
use serde_json::{json, Value};
use std::collections::HashMap;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};
use std::time::Duration;

// ── Mock service ─────────────────────────────────────────────────────────

/// Stand-in for the remote recommendation service.
///
/// Records every `/recommend_images` hit (and its query parameters) so
/// tests can assert that short-circuited pipelines generated zero traffic.
struct MockService {
    status_body: Value,
    recommend_status: StatusCode,
    images: Value,
    delay: Duration,
    recommend_hits: AtomicUsize,
    last_params: Mutex<Option<HashMap<String, String>>>,
}

impl MockService {
    /// A healthy service returning `images` for every query.
    fn running(images: Value) -> Self {
        Self {
            status_body: json!({"status": "API is running"}),
            recommend_status: StatusCode::OK,
            images,
            delay: Duration::ZERO,
            recommend_hits: AtomicUsize::new(0),
            last_params: Mutex::new(None),
        }
    }

    fn with_status_body(mut self, body: Value) -> Self {
        self.status_body = body;
        self
    }

    fn with_recommend_status(mut self, status: StatusCode) -> Self {
        self.recommend_status = status;
        self
    }

    fn with_delay(mut self, delay: Duration) -> Self {
        self.delay = delay;
        self
    }

    fn hits(&self) -> usize {
        self.recommend_hits.load(Ordering::SeqCst)
    }

    fn last_params(&self) -> Option<HashMap<String, String>> {
        self.last_params.lock().unwrap().clone()
    }
}

async fn status_handler(State(svc): State<Arc<MockService>>) -> Json<Value> {
    Json(svc.status_body.clone())
}

async fn recommend_handler(
    State(svc): State<Arc<MockService>>,
    Query(params): Query<HashMap<String, String>>,
) -> impl IntoResponse {
    svc.recommend_hits.fetch_add(1, Ordering::SeqCst);
    *svc.last_params.lock().unwrap() = Some(params);
    if !svc.delay.is_zero() {
        tokio::time::sleep(svc.delay).await;
    }
    (svc.recommend_status, Json(svc.images.clone()))
}

/// Serve the mock on an ephemeral port; returns its base URL and a handle
/// for hit-count assertions.
async fn spawn_service(svc: MockService) -> (String, Arc<MockService>) {
    let svc = Arc::new(svc);
    let app = Router::new()
        .route("/status", get(status_handler))
        .route("/recommend_images", get(recommend_handler))
        .with_state(Arc::clone(&svc));

    let listener = tokio::net::TcpListener::bind("127.0.0.1:0")
        .await
        .expect("bind ephemeral port");
    let base_url = format!("http://{}", listener.local_addr().unwrap());
    tokio::spawn(async move {
        axum::serve(listener, app).await.expect("serve mock");
    });

    (base_url, svc)
}

fn client_for(base_url: &str, timeout_secs: u64) -> RecommendClient {
    let config = ClientConfig::builder()
        .base_url(base_url)
        .api_timeout_secs(timeout_secs)
        .build()
        .expect("valid config");
    RecommendClient::new(config).expect("build client")
}

/// An address nothing is listening on.
async fn dead_base_url() -> String {
    let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
    let url = format!("http://{}", listener.local_addr().unwrap());
    drop(listener);
    url
}

// ── Happy path ───────────────────────────────────────────────────────────

#[tokio::test]
async fn successful_query_appends_exactly_one_entry() {
    let (base_url, svc) = spawn_service(MockService::running(json!(["img1.png"]))).await;
    let client = client_for(&base_url, 5);
    let mut history = SessionHistory::new();

    let result = recommend(
        QueryInput::Text("a lighthouse at dusk".into()),
        ImageMode::Ai,
        &client,
        &mut history,
    )
    .await
    .expect("recommendation should succeed");

    assert_eq!(result.images, json!(["img1.png"]));
    assert_eq!(result.image_refs().unwrap(), ["img1.png"]);
    assert_eq!(result.mode, ImageMode::Ai);
    assert_eq!(history.len(), 1);
    assert_eq!(history.entries()[0], result);
    assert_eq!(svc.hits(), 1);
}

#[tokio::test]
async fn plain_text_document_queries_with_its_extracted_text() {
    let (base_url, _svc) = spawn_service(MockService::running(json!(["img1.png"]))).await;
    let client = client_for(&base_url, 5);
    let mut history = SessionHistory::new();

    let doc = Document::from_declared_type("text/plain", b"hello\nworld".to_vec()).unwrap();
    let result = recommend(QueryInput::Document(doc), ImageMode::Ai, &client, &mut history)
        .await
        .expect("recommendation should succeed");

    assert_eq!(result.query, "hello\nworld");
    assert_eq!(history.last().unwrap().images, json!(["img1.png"]));
}

#[tokio::test]
async fn wire_parameters_carry_query_and_mode() {
    let (base_url, svc) = spawn_service(MockService::running(json!(["a.png"]))).await;
    let client = client_for(&base_url, 5);
    let mut history = SessionHistory::new();

    recommend(
        QueryInput::Text("café & sons".into()),
        ImageMode::Ai,
        &client,
        &mut history,
    )
    .await
    .unwrap();

    let params = svc.last_params().expect("service saw a request");
    assert_eq!(params.get("query").map(String::as_str), Some("café & sons"));
    assert_eq!(params.get("use_ai").map(String::as_str), Some("true"));

    recommend(
        QueryInput::Text("café & sons".into()),
        ImageMode::Stock,
        &client,
        &mut history,
    )
    .await
    .unwrap();

    let params = svc.last_params().unwrap();
    assert_eq!(params.get("use_ai").map(String::as_str), Some("false"));
}

#[tokio::test]
async fn history_timestamps_never_decrease() {
    let (base_url, _svc) = spawn_service(MockService::running(json!(["a.png"]))).await;
    let client = client_for(&base_url, 5);
    let mut history = SessionHistory::new();

    recommend(QueryInput::Text("first".into()), ImageMode::Stock, &client, &mut history)
        .await
        .unwrap();
    recommend(QueryInput::Text("second".into()), ImageMode::Stock, &client, &mut history)
        .await
        .unwrap();

    let entries = history.entries();
    assert_eq!(entries.len(), 2);
    assert!(entries[0].timestamp <= entries[1].timestamp);
}

#[tokio::test]
async fn non_array_payload_is_passed_through_opaquely() {
    let payload = json!({"urls": ["a.png", "b.png"], "source": "stock"});
    let (base_url, _svc) = spawn_service(MockService::running(payload.clone())).await;
    let client = client_for(&base_url, 5);
    let mut history = SessionHistory::new();

    let result = recommend(QueryInput::Text("q".into()), ImageMode::Stock, &client, &mut history)
        .await
        .unwrap();

    assert_eq!(result.images, payload);
    assert!(result.image_refs().is_none());
}

// ── Failure paths: no history entry, typed errors ────────────────────────

#[tokio::test]
async fn http_500_surfaces_http_error_and_appends_nothing() {
    let svc = MockService::running(json!(["a.png"]))
        .with_recommend_status(StatusCode::INTERNAL_SERVER_ERROR);
    let (base_url, svc) = spawn_service(svc).await;
    let client = client_for(&base_url, 5);
    let mut history = SessionHistory::new();

    let err = recommend(QueryInput::Text("q".into()), ImageMode::Ai, &client, &mut history)
        .await
        .unwrap_err();

    match err {
        RecommendError::Http { status } => assert_eq!(status, 500),
        other => panic!("expected Http, got: {other}"),
    }
    assert!(history.is_empty());
    assert_eq!(svc.hits(), 1);
}

#[tokio::test]
async fn status_gate_short_circuits_without_fetching() {
    let svc = MockService::running(json!(["a.png"]))
        .with_status_body(json!({"status": "starting up"}));
    let (base_url, svc) = spawn_service(svc).await;
    let client = client_for(&base_url, 5);
    let mut history = SessionHistory::new();

    let err = recommend(QueryInput::Text("q".into()), ImageMode::Ai, &client, &mut history)
        .await
        .unwrap_err();

    match err {
        RecommendError::ServiceUnavailable { status } => {
            assert_eq!(status, ApiStatus::UnknownStatus)
        }
        other => panic!("expected ServiceUnavailable, got: {other}"),
    }
    assert_eq!(svc.hits(), 0);
    assert!(history.is_empty());
}

#[tokio::test]
async fn dead_host_reads_as_not_available() {
    let base_url = dead_base_url().await;
    let client = client_for(&base_url, 2);
    let mut history = SessionHistory::new();

    assert_eq!(client.check_status().await, ApiStatus::NotAvailable);

    let err = recommend(QueryInput::Text("q".into()), ImageMode::Ai, &client, &mut history)
        .await
        .unwrap_err();
    assert!(matches!(
        err,
        RecommendError::ServiceUnavailable {
            status: ApiStatus::NotAvailable
        }
    ));
    assert!(history.is_empty());
}

#[tokio::test]
async fn connection_refused_maps_to_connection_error() {
    let base_url = dead_base_url().await;
    let client = client_for(&base_url, 2);

    let err = client
        .fetch_recommendation("q", ImageMode::Stock)
        .await
        .unwrap_err();
    assert!(matches!(err, RecommendError::Connection { .. }), "got: {err}");
}

#[tokio::test]
async fn slow_service_maps_to_timeout() {
    let svc = MockService::running(json!(["a.png"])).with_delay(Duration::from_secs(3));
    let (base_url, _svc) = spawn_service(svc).await;
    let client = client_for(&base_url, 1);

    let err = client
        .fetch_recommendation("q", ImageMode::Stock)
        .await
        .unwrap_err();
    match err {
        RecommendError::Timeout { secs } => assert_eq!(secs, 1),
        other => panic!("expected Timeout, got: {other}"),
    }
}

#[tokio::test]
async fn empty_and_unsupported_inputs_never_touch_the_network() {
    let (base_url, svc) = spawn_service(MockService::running(json!(["a.png"]))).await;
    let client = client_for(&base_url, 5);
    let mut history = SessionHistory::new();

    // Whitespace-only text is rejected before the status probe.
    let err = recommend(QueryInput::Text("   ".into()), ImageMode::Ai, &client, &mut history)
        .await
        .unwrap_err();
    assert!(matches!(err, RecommendError::EmptyQuery));

    // An unsupported declared type never even becomes a Document.
    let err = Document::from_declared_type("image/png", b"\x89PNG".to_vec()).unwrap_err();
    assert!(matches!(err, RecommendError::UnsupportedType { .. }));

    // A document that fails extraction is rejected before any fetch.
    let doc = Document::from_declared_type("text/plain", vec![0xff, 0xfe]).unwrap();
    let err = recommend(QueryInput::Document(doc), ImageMode::Ai, &client, &mut history)
        .await
        .unwrap_err();
    assert!(matches!(err, RecommendError::Decode { .. }));

    assert_eq!(svc.hits(), 0);
    assert!(history.is_empty());
}
