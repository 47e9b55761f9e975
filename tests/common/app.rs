//! Router harness
//!
//! Builds the real router over a test database and sends requests to it
//! in-process with `oneshot`.

use axum::body::{to_bytes, Body};
use axum::http::{header, Method, Request, StatusCode};
use axum::Router;
use serde_json::Value;
use tower::ServiceExt;

use profiles_api::backend::auth::sessions::TokenService;
use profiles_api::backend::routes::create_router;
use profiles_api::backend::server::state::AppState;
use profiles_api::shared::AppConfig;

use super::database::{TestDatabase, TEST_DATABASE_URL};

pub const TEST_JWT_SECRET: &str = "test-signing-secret";
/// Lowest cost bcrypt accepts
pub const TEST_BCRYPT_COST: u32 = 4;

pub fn test_config() -> AppConfig {
    AppConfig::builder()
        .database_url(TEST_DATABASE_URL)
        .jwt_secret(TEST_JWT_SECRET)
        .bcrypt_cost(TEST_BCRYPT_COST)
        .build()
        .expect("Failed to build test config")
}

pub struct TestApp {
    pub db: TestDatabase,
    pub router: Router,
    pub tokens: TokenService,
}

impl TestApp {
    pub async fn new() -> Self {
        let db = TestDatabase::new().await;
        let state = AppState::new(db.pool().clone(), test_config());
        let tokens = state.tokens.clone();
        let router = create_router(state);
        Self { db, router, tokens }
    }

    /// Send a request, returning the status and the parsed JSON body
    /// (`Value::Null` when the body is empty)
    pub async fn request(
        &self,
        method: Method,
        uri: &str,
        authorization: Option<&str>,
        body: Option<Value>,
    ) -> (StatusCode, Value) {
        let mut builder = Request::builder().method(method).uri(uri);
        if let Some(value) = authorization {
            builder = builder.header(header::AUTHORIZATION, value);
        }
        let request = match body {
            Some(json) => builder
                .header(header::CONTENT_TYPE, "application/json")
                .body(Body::from(json.to_string())),
            None => builder.body(Body::empty()),
        }
        .expect("Failed to build request");

        let response = self
            .router
            .clone()
            .oneshot(request)
            .await
            .expect("Router failed");

        let status = response.status();
        let bytes = to_bytes(response.into_body(), usize::MAX)
            .await
            .expect("Failed to read body");
        let json = if bytes.is_empty() {
            Value::Null
        } else {
            serde_json::from_slice(&bytes).expect("Response body is not JSON")
        };
        (status, json)
    }

    pub async fn get(&self, uri: &str, token: Option<&str>) -> (StatusCode, Value) {
        let auth = token.map(super::auth_helpers::auth_header);
        self.request(Method::GET, uri, auth.as_deref(), None).await
    }

    pub async fn post(&self, uri: &str, token: Option<&str>, body: Value) -> (StatusCode, Value) {
        let auth = token.map(super::auth_helpers::auth_header);
        self.request(Method::POST, uri, auth.as_deref(), Some(body)).await
    }

    pub async fn put(&self, uri: &str, token: Option<&str>, body: Value) -> (StatusCode, Value) {
        let auth = token.map(super::auth_helpers::auth_header);
        self.request(Method::PUT, uri, auth.as_deref(), Some(body)).await
    }

    pub async fn patch(&self, uri: &str, token: Option<&str>, body: Value) -> (StatusCode, Value) {
        let auth = token.map(super::auth_helpers::auth_header);
        self.request(Method::PATCH, uri, auth.as_deref(), Some(body)).await
    }

    pub async fn delete(&self, uri: &str, token: Option<&str>) -> (StatusCode, Value) {
        let auth = token.map(super::auth_helpers::auth_header);
        self.request(Method::DELETE, uri, auth.as_deref(), None).await
    }
}
