use std::sync::Arc;

use axum::{
    Router,
    body::Body,
    http::{Request, StatusCode, header},
};
use chrono::{TimeZone, Utc};
use http_body_util::BodyExt;
use serde::Deserialize;
use tc_api::{AdminAuth, ApiState, auth::hash_token, config::Environment, router};
use tc_db::{InMemoryDocumentStore, InMemoryObjectStore, models::NewTopic, repositories::topic};
use tc_nav::ExcerptConfig;
use tower::ServiceExt;

/// Admin token accepted by states built with the default builder
pub const ADMIN_TOKEN: &str = "admin-test-token";

/// Base URL the in-memory object store hands out
pub const OBJECTS_BASE_URL: &str = "http://localhost:3000/objects";

/// Test state builder over in-memory backends
pub struct TestStateBuilder {
    admin_token: Option<String>,
    excerpt: ExcerptConfig,
}

impl TestStateBuilder {
    pub fn new() -> Self {
        Self {
            admin_token: Some(ADMIN_TOKEN.to_string()),
            excerpt: ExcerptConfig::default(),
        }
    }

    /// Build a state whose admin routes are disabled
    pub fn without_admin(mut self) -> Self {
        self.admin_token = None;
        self
    }

    pub fn excerpt(mut self, excerpt: ExcerptConfig) -> Self {
        self.excerpt = excerpt;
        self
    }

    pub fn build(self) -> ApiState {
        ApiState {
            documents: Arc::new(InMemoryDocumentStore::new()),
            objects: Arc::new(InMemoryObjectStore::new(OBJECTS_BASE_URL)),
            admin: AdminAuth {
                token_sha256: self.admin_token.as_deref().map(hash_token),
            },
            environment: Environment::Development,
            excerpt: self.excerpt,
        }
    }
}

impl Default for TestStateBuilder {
    fn default() -> Self {
        Self::new()
    }
}

/// Router for `state` plus a client to call it
pub fn client(state: &ApiState) -> TestClient {
    TestClient::new(router::router().with_state(state.clone()))
}

/// Helper to make requests to the test app
pub struct TestClient {
    router: Router,
}

impl TestClient {
    pub fn new(router: Router) -> Self {
        Self { router }
    }

    /// Send a request and get the response
    pub async fn request(&self, mut request: Request<Body>) -> TestResponse {
        use axum::extract::ConnectInfo;
        use std::net::{IpAddr, Ipv4Addr, SocketAddr};

        // The rate limiter needs a client address
        let test_addr = SocketAddr::new(IpAddr::V4(Ipv4Addr::new(127, 0, 0, 1)), 8080);
        request.extensions_mut().insert(ConnectInfo(test_addr));

        let response = self
            .router
            .clone()
            .oneshot(request)
            .await
            .expect("Failed to execute request");

        let status = response.status();
        let headers = response.headers().clone();
        let body_bytes = response
            .into_body()
            .collect()
            .await
            .expect("Failed to read response body")
            .to_bytes();

        TestResponse {
            status,
            body: body_bytes.to_vec(),
            headers,
        }
    }

    fn builder(method: &str, uri: &str, token: Option<&str>) -> axum::http::request::Builder {
        let builder = Request::builder()
            .method(method)
            .uri(uri)
            .header("x-forwarded-for", "127.0.0.1");

        match token {
            Some(token) => builder.header(header::AUTHORIZATION, format!("Bearer {token}")),
            None => builder,
        }
    }

    async fn send_json<T: serde::Serialize>(
        &self,
        method: &str,
        uri: &str,
        body: &T,
        token: Option<&str>,
    ) -> TestResponse {
        let json_body = serde_json::to_string(body).expect("Failed to serialize body");
        let request = Self::builder(method, uri, token)
            .header(header::CONTENT_TYPE, "application/json")
            .body(Body::from(json_body))
            .expect("Failed to build request");

        self.request(request).await
    }

    /// Send a GET request
    pub async fn get(&self, uri: &str) -> TestResponse {
        let request = Self::builder("GET", uri, None)
            .body(Body::empty())
            .expect("Failed to build request");

        self.request(request).await
    }

    /// Send a POST request with JSON body
    pub async fn post_json<T: serde::Serialize>(&self, uri: &str, body: &T) -> TestResponse {
        self.send_json("POST", uri, body, None).await
    }

    /// Send a GET request with the admin token
    pub async fn get_as_admin(&self, uri: &str) -> TestResponse {
        self.get_with_token(uri, ADMIN_TOKEN).await
    }

    pub async fn get_with_token(&self, uri: &str, token: &str) -> TestResponse {
        let request = Self::builder("GET", uri, Some(token))
            .body(Body::empty())
            .expect("Failed to build request");

        self.request(request).await
    }

    pub async fn post_json_as_admin<T: serde::Serialize>(
        &self,
        uri: &str,
        body: &T,
    ) -> TestResponse {
        self.send_json("POST", uri, body, Some(ADMIN_TOKEN)).await
    }

    pub async fn put_json_as_admin<T: serde::Serialize>(
        &self,
        uri: &str,
        body: &T,
    ) -> TestResponse {
        self.send_json("PUT", uri, body, Some(ADMIN_TOKEN)).await
    }

    pub async fn delete_as_admin(&self, uri: &str) -> TestResponse {
        let request = Self::builder("DELETE", uri, Some(ADMIN_TOKEN))
            .body(Body::empty())
            .expect("Failed to build request");

        self.request(request).await
    }

    /// Send a multipart body with one part per `(field, file name, bytes)`
    pub async fn post_multipart_as_admin(
        &self,
        uri: &str,
        parts: &[(&str, &str, &[u8])],
    ) -> TestResponse {
        const BOUNDARY: &str = "tc-test-boundary";

        let mut body = Vec::new();
        for (field, file_name, bytes) in parts {
            body.extend_from_slice(
                format!(
                    "--{BOUNDARY}\r\nContent-Disposition: form-data; name=\"{field}\"; filename=\"{file_name}\"\r\nContent-Type: application/octet-stream\r\n\r\n"
                )
                .as_bytes(),
            );
            body.extend_from_slice(bytes);
            body.extend_from_slice(b"\r\n");
        }
        body.extend_from_slice(format!("--{BOUNDARY}--\r\n").as_bytes());

        let request = Self::builder("POST", uri, Some(ADMIN_TOKEN))
            .header(
                header::CONTENT_TYPE,
                format!("multipart/form-data; boundary={BOUNDARY}"),
            )
            .body(Body::from(body))
            .expect("Failed to build multipart request");

        self.request(request).await
    }
}

/// Test response wrapper
pub struct TestResponse {
    pub status: StatusCode,
    pub body: Vec<u8>,
    pub headers: axum::http::HeaderMap,
}

impl TestResponse {
    /// Get response body as string
    pub fn text(&self) -> String {
        String::from_utf8(self.body.clone()).expect("Response body is not valid UTF-8")
    }

    /// Parse response body as JSON
    pub fn json<T: for<'de> Deserialize<'de>>(&self) -> T {
        serde_json::from_slice(&self.body).expect("Failed to parse JSON response")
    }

    /// Assert status code
    pub fn assert_status(&self, expected: StatusCode) {
        assert_eq!(
            self.status,
            expected,
            "Expected status {}, got {}. Body: {}",
            expected,
            self.status,
            self.text()
        );
    }

    /// The `error` message of a JSON error body
    pub fn error(&self) -> String {
        let body: serde_json::Value = self.json();
        body["error"]
            .as_str()
            .expect("Response has no error message")
            .to_string()
    }
}

/// Seed data helpers
pub mod seed {
    use super::*;

    pub struct TopicSeed<'a> {
        pub title: &'a str,
        pub class: &'a str,
        pub category: &'a str,
        pub sub_category: &'a str,
        /// Seconds since the epoch
        pub created: i64,
        pub files: &'a [&'a str],
    }

    impl Default for TopicSeed<'_> {
        fn default() -> Self {
            Self {
                title: "Untitled",
                class: "Class 6",
                category: "Science",
                sub_category: "Plants",
                created: 0,
                files: &[],
            }
        }
    }

    /// Insert a document exactly as given, bypassing the typed models
    pub async fn raw_document(state: &ApiState, collection: &str, value: serde_json::Value) -> String {
        let fields = value
            .as_object()
            .cloned()
            .expect("Raw document must be a JSON object");

        state
            .documents
            .add_document(collection, fields)
            .await
            .expect("Failed to seed document")
    }

    /// Insert a topic straight into the store and return its id
    pub async fn topic(state: &ApiState, seed: TopicSeed<'_>) -> String {
        topic::create(
            state.documents.as_ref(),
            &NewTopic {
                topic: seed.title.to_string(),
                class: seed.class.to_string(),
                category: seed.category.to_string(),
                sub_category: seed.sub_category.to_string(),
                description: format!("About {}", seed.title),
                file_url: seed.files.iter().map(|f| f.to_string()).collect(),
                date: None,
                timestamp: Utc.timestamp_opt(seed.created, 0).unwrap(),
            },
        )
        .await
        .expect("Failed to seed topic")
    }
}
