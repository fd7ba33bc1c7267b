//! Shared test helpers for integration tests.

#![allow(dead_code)]

use std::sync::Arc;

use axum::Router;
use axum::body::Body;
use axum::http::{Request, StatusCode};
use chrono::{DateTime, Utc};
use serde_json::{Value, json};
use tower::ServiceExt;
use uuid::Uuid;

use stockshare_api::{AppState, build_app};
use stockshare_core::config::{AppConfig, StoreProvider};
use stockshare_core::traits::ManualTimeSource;
use stockshare_database::{MemoryStore, Stores};

/// Host header sent with every request.
pub const TEST_HOST: &str = "shop.test";

/// Test application over the in-memory store and a hand-driven clock.
#[derive(Clone)]
pub struct TestApp {
    /// The Axum router for making test requests
    pub router: Router,
    /// Store handle for direct assertions and outage simulation
    pub store: MemoryStore,
    /// Clock behind share token issuance and expiry
    pub clock: ManualTimeSource,
    pub config: AppConfig,
}

impl TestApp {
    pub fn new() -> Self {
        Self::with_config(|_| {})
    }

    /// Build an app after letting `customize` adjust the test configuration.
    pub fn with_config(customize: impl FnOnce(&mut AppConfig)) -> Self {
        let mut config = AppConfig::default();
        config.database.provider = StoreProvider::Memory;
        config.auth.jwt_secret = "integration-test-secret".to_string();
        customize(&mut config);

        let store = MemoryStore::new();
        let clock = ManualTimeSource::new(Utc::now());
        let state = AppState::build(
            config.clone(),
            Stores::memory(store.clone()),
            Arc::new(clock.clone()),
        );
        let router = build_app(state, &config.server.cors);

        Self {
            router,
            store,
            clock,
            config,
        }
    }

    /// Sign up a merchant and return `(token, user_id)`.
    pub async fn signup(&self, email: &str, password: &str) -> (String, Uuid) {
        let response = self
            .request(
                "POST",
                "/api/auth/signup",
                Some(json!({ "email": email, "password": password })),
                None,
            )
            .await;

        assert_eq!(
            response.status,
            StatusCode::CREATED,
            "Signup failed: {:?}",
            response.body
        );

        let token = response.body["token"]
            .as_str()
            .expect("No token in signup response")
            .to_string();
        let user_id = response.body["user"]["id"]
            .as_str()
            .and_then(|id| id.parse().ok())
            .expect("No user id in signup response");

        (token, user_id)
    }

    /// Sign up a throwaway merchant and return its token.
    pub async fn merchant(&self) -> String {
        let email = format!("{}@shop.test", Uuid::new_v4().simple());
        self.signup(&email, "secret123").await.0
    }

    /// Create a product through the API and assert it succeeded.
    pub async fn create_product(&self, token: &str, product: Value) -> Value {
        let response = self
            .request("POST", "/api/products", Some(product), Some(token))
            .await;
        assert_eq!(
            response.status,
            StatusCode::CREATED,
            "Create product failed: {:?}",
            response.body
        );
        response.body
    }

    /// Make a JSON request to the test app
    pub async fn request(
        &self,
        method: &str,
        path: &str,
        body: Option<Value>,
        token: Option<&str>,
    ) -> TestResponse {
        let body_str = body
            .map(|b| serde_json::to_string(&b).expect("Failed to serialize body"))
            .unwrap_or_default();
        self.send(method, path, body_str, token, &[]).await
    }

    /// Make a request with a raw body and extra headers.
    pub async fn send(
        &self,
        method: &str,
        path: &str,
        body: impl Into<String>,
        token: Option<&str>,
        headers: &[(&str, &str)],
    ) -> TestResponse {
        let mut req = Request::builder()
            .method(method)
            .uri(path)
            .header("Host", TEST_HOST)
            .header("Content-Type", "application/json");

        if let Some(token) = token {
            req = req.header("Authorization", format!("Bearer {token}"));
        }
        for (name, value) in headers {
            req = req.header(*name, *value);
        }

        let req = req
            .body(Body::from(body.into()))
            .expect("Failed to build request");

        let response = self
            .router
            .clone()
            .oneshot(req)
            .await
            .expect("Failed to send request");

        let status = response.status();
        let body_bytes = axum::body::to_bytes(response.into_body(), 1024 * 1024)
            .await
            .expect("Failed to read body");

        let body: Value = serde_json::from_slice(&body_bytes).unwrap_or(Value::Null);

        TestResponse { status, body }
    }
}

/// Response from a test request
#[derive(Debug)]
pub struct TestResponse {
    /// HTTP status code
    pub status: StatusCode,
    /// Parsed JSON body (`Null` when empty)
    pub body: Value,
}

impl TestResponse {
    pub fn error_code(&self) -> &str {
        self.body["error"].as_str().unwrap_or_default()
    }

    pub fn message(&self) -> &str {
        self.body["message"].as_str().unwrap_or_default()
    }
}

/// Parse an RFC 3339 timestamp out of a JSON value.
pub fn timestamp(value: &Value) -> DateTime<Utc> {
    value
        .as_str()
        .and_then(|s| DateTime::parse_from_rfc3339(s).ok())
        .map(|t| t.with_timezone(&Utc))
        .expect("Expected an RFC 3339 timestamp")
}
