#![allow(dead_code)]

use std::sync::Arc;

use axum::{
    body::Body,
    http::{header, Method, Request, StatusCode},
    Router,
};
use serde::Serialize;
use serde_json::Value;
use tower::ServiceExt;

use flavor_api::auth::{generate_jwt, Claims};
use flavor_api::config::AppConfig;
use flavor_api::database::MemoryStore;
use flavor_api::{app, AppState};

/// In-process client over the full router, backed by a fresh fixture store
pub struct TestClient {
    app: Router,
    token: Option<String>,
}

impl TestClient {
    /// Authenticated as fixture user 1
    pub fn new() -> Self {
        let config = AppConfig::development();
        let claims = Claims::new("mixer", 1, 1);
        let token = generate_jwt(&claims, &config.security.jwt_secret).expect("dev secret signs tokens");
        Self::with_config(config).with_token(token)
    }

    /// No Authorization header
    pub fn anonymous() -> Self {
        Self::with_config(AppConfig::development())
    }

    pub fn with_config(config: AppConfig) -> Self {
        let state = AppState::new(Arc::new(MemoryStore::with_fixture()), config);
        Self {
            app: app(state),
            token: None,
        }
    }

    pub fn with_token(mut self, token: impl Into<String>) -> Self {
        self.token = Some(token.into());
        self
    }

    pub async fn get(&self, uri: &str) -> TestResponse {
        self.request::<()>(Method::GET, uri, None).await
    }

    pub async fn post<T: Serialize>(&self, uri: &str, body: T) -> TestResponse {
        self.request(Method::POST, uri, Some(body)).await
    }

    pub async fn put<T: Serialize>(&self, uri: &str, body: T) -> TestResponse {
        self.request(Method::PUT, uri, Some(body)).await
    }

    pub async fn delete(&self, uri: &str) -> TestResponse {
        self.request::<()>(Method::DELETE, uri, None).await
    }

    async fn request<T: Serialize>(&self, method: Method, uri: &str, body: Option<T>) -> TestResponse {
        let mut builder = Request::builder().method(method).uri(uri);
        if let Some(token) = &self.token {
            builder = builder.header(header::AUTHORIZATION, format!("Bearer {}", token));
        }

        let request = match body {
            Some(body) => builder
                .header(header::CONTENT_TYPE, "application/json")
                .body(Body::from(serde_json::to_vec(&body).expect("serializable body")))
                .expect("valid request"),
            None => builder.body(Body::empty()).expect("valid request"),
        };

        let response = self.app.clone().oneshot(request).await.expect("router is infallible");
        TestResponse::new(response).await
    }
}

pub struct TestResponse {
    pub status: StatusCode,
    pub content_type: Option<String>,
    pub body: Vec<u8>,
}

impl TestResponse {
    async fn new(response: axum::response::Response) -> Self {
        let status = response.status();
        let content_type = response
            .headers()
            .get(header::CONTENT_TYPE)
            .and_then(|v| v.to_str().ok())
            .map(str::to_string);
        let body = axum::body::to_bytes(response.into_body(), usize::MAX)
            .await
            .expect("readable body")
            .to_vec();

        Self {
            status,
            content_type,
            body,
        }
    }

    pub fn text(&self) -> String {
        String::from_utf8_lossy(&self.body).into_owned()
    }

    pub fn json(&self) -> Value {
        serde_json::from_slice(&self.body)
            .unwrap_or_else(|e| panic!("body is not JSON ({}): {}", e, self.text()))
    }

    pub fn assert_status(&self, expected: StatusCode) -> &Self {
        assert_eq!(self.status, expected, "unexpected status, body: {}", self.text());
        self
    }

    pub fn assert_no_content(&self) -> &Self {
        self.assert_status(StatusCode::NO_CONTENT);
        assert!(self.body.is_empty(), "204 carried a body: {}", self.text());
        self
    }

    /// 400 with a non-empty `errors` list; returns the list
    pub fn validation_errors(&self) -> Vec<Value> {
        self.assert_status(StatusCode::BAD_REQUEST);
        let errors = self.json()["errors"].as_array().cloned().unwrap_or_default();
        assert!(!errors.is_empty(), "400 without errors: {}", self.text());
        errors
    }
}
