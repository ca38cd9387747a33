//! Prometheus metrics for request traffic, store calls and comment activity.

use std::{
    sync::{Arc, LazyLock},
    time::Instant,
};

use axum::{
    extract::{MatchedPath, Request, State},
    http::StatusCode,
    middleware::Next,
    response::{IntoResponse, Response},
};
use metrics::{counter, gauge, histogram};
use metrics_exporter_prometheus::{Matcher, PrometheusBuilder, PrometheusHandle};
use regex::Regex;
use tc_db::{
    DocumentStore, StoreResult,
    store::{BoxFuture, Document, Fields, OrderBy},
};

static UUID_SEGMENT: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"[0-9a-f]{8}-[0-9a-f]{4}-[0-9a-f]{4}-[0-9a-f]{4}-[0-9a-f]{12}")
        .expect("uuid pattern is valid")
});
static NUMBER_SEGMENT: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"/\d+").expect("number pattern is valid"));

/// Initialize Prometheus metrics exporter
pub fn init_metrics() -> anyhow::Result<PrometheusHandle> {
    let buckets = &[
        0.005, 0.01, 0.025, 0.05, 0.1, 0.25, 0.5, 1.0, 2.5, 5.0, 10.0,
    ];

    let handle = PrometheusBuilder::new()
        .set_buckets_for_metric(
            Matcher::Full("http_request_duration_seconds".to_string()),
            buckets,
        )?
        .set_buckets_for_metric(
            Matcher::Full("store_call_duration_seconds".to_string()),
            buckets,
        )?
        .install_recorder()?;

    Ok(handle)
}

/// Middleware to record HTTP request metrics
pub async fn track_metrics(req: Request, next: Next) -> Response {
    let start = Instant::now();
    let method = req.method().to_string();
    // The route template keeps subcategory names and ids out of the labels
    let path = req
        .extensions()
        .get::<MatchedPath>()
        .map_or_else(|| normalize_path(req.uri().path()), |p| p.as_str().to_string());

    gauge!("http_requests_in_flight", "method" => method.clone(), "path" => path.clone())
        .increment(1.0);

    let response = next.run(req).await;

    gauge!("http_requests_in_flight", "method" => method.clone(), "path" => path.clone())
        .decrement(1.0);

    let duration = start.elapsed().as_secs_f64();
    let status = response.status().as_u16().to_string();

    counter!(
        "http_requests_total",
        "method" => method.clone(),
        "path" => path.clone(),
        "status" => status.clone()
    )
    .increment(1);

    histogram!(
        "http_request_duration_seconds",
        "method" => method,
        "path" => path,
        "status" => status
    )
    .record(duration);

    response
}

/// Replace UUIDs and numeric ids with placeholders
fn normalize_path(path: &str) -> String {
    let normalized = UUID_SEGMENT.replace_all(path, ":id");
    NUMBER_SEGMENT.replace_all(&normalized, "/:id").into_owned()
}

/// Handler for the /metrics endpoint
pub async fn metrics_handler(State(handle): State<PrometheusHandle>) -> impl IntoResponse {
    (StatusCode::OK, handle.render())
}

/// Record one document store call
pub fn record_store_call(operation: &'static str, duration_secs: f64, success: bool) {
    let status = if success { "success" } else { "error" };

    counter!(
        "store_calls_total",
        "operation" => operation,
        "status" => status
    )
    .increment(1);

    histogram!("store_call_duration_seconds", "operation" => operation).record(duration_secs);
}

/// Record a comment or reply submission
pub fn record_comment_event(kind: &'static str, success: bool) {
    let status = if success { "success" } else { "failure" };

    counter!(
        "comment_events_total",
        "type" => kind,
        "status" => status
    )
    .increment(1);
}

/// Document store wrapper that records a metric for every call.
#[derive(Clone)]
pub struct MeteredDocumentStore {
    inner: Arc<dyn DocumentStore>,
}

impl MeteredDocumentStore {
    pub fn new(inner: Arc<dyn DocumentStore>) -> Self {
        Self { inner }
    }
}

impl std::fmt::Debug for MeteredDocumentStore {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("MeteredDocumentStore").finish_non_exhaustive()
    }
}

async fn metered<T>(
    operation: &'static str,
    call: impl Future<Output = StoreResult<T>>,
) -> StoreResult<T> {
    let start = Instant::now();
    let result = call.await;
    record_store_call(operation, start.elapsed().as_secs_f64(), result.is_ok());
    result
}

impl DocumentStore for MeteredDocumentStore {
    fn ping(&self) -> BoxFuture<'_, StoreResult<()>> {
        Box::pin(metered("ping", self.inner.ping()))
    }

    fn list_documents<'a>(
        &'a self,
        collection: &'a str,
        order_by: Option<OrderBy>,
    ) -> BoxFuture<'a, StoreResult<Vec<Document>>> {
        Box::pin(metered(
            "list_documents",
            self.inner.list_documents(collection, order_by),
        ))
    }

    fn get_document<'a>(
        &'a self,
        collection: &'a str,
        id: &'a str,
    ) -> BoxFuture<'a, StoreResult<Option<Document>>> {
        Box::pin(metered("get_document", self.inner.get_document(collection, id)))
    }

    fn add_document<'a>(
        &'a self,
        collection: &'a str,
        fields: Fields,
    ) -> BoxFuture<'a, StoreResult<String>> {
        Box::pin(metered("add_document", self.inner.add_document(collection, fields)))
    }

    fn set_document<'a>(
        &'a self,
        collection: &'a str,
        id: &'a str,
        fields: Fields,
    ) -> BoxFuture<'a, StoreResult<()>> {
        Box::pin(metered(
            "set_document",
            self.inner.set_document(collection, id, fields),
        ))
    }

    fn update_document<'a>(
        &'a self,
        collection: &'a str,
        id: &'a str,
        fields: Fields,
    ) -> BoxFuture<'a, StoreResult<()>> {
        Box::pin(metered(
            "update_document",
            self.inner.update_document(collection, id, fields),
        ))
    }

    fn delete_document<'a>(
        &'a self,
        collection: &'a str,
        id: &'a str,
    ) -> BoxFuture<'a, StoreResult<()>> {
        Box::pin(metered(
            "delete_document",
            self.inner.delete_document(collection, id),
        ))
    }
}
