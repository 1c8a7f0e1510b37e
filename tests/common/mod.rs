//! Shared helpers for HTTP integration tests
#![allow(dead_code)]

use axum::body::{to_bytes, Body};
use axum::http::{header, Method, Request, StatusCode};
use axum::Router;
use portfolio_api::api::create_app;
use portfolio_api::auth::UserIdentity;
use portfolio_api::core::{create_app_state, SharedState};
use portfolio_api::storage::{Collection, Record};
use portfolio_api::Config;
use serde_json::{json, Value};
use tower::ServiceExt;

pub const ADMIN_EMAIL: &str = "admin@example.com";
pub const ADMIN_PASSWORD: &str = "admin123";

/// A fresh application with its own store
pub struct TestApp {
    pub state: SharedState,
    pub router: Router,
}

pub fn test_config() -> Config {
    let mut config = Config::default();
    config.auth.jwt_secret = Some("integration-test-secret-0123456789".to_string());
    config.auth.bcrypt_cost = 4;
    config
}

impl TestApp {
    pub fn new() -> Self {
        Self::with_config(test_config())
    }

    pub fn with_config(config: Config) -> Self {
        let state = create_app_state(config).expect("test state builds");
        let router = create_app(state.clone());
        Self { state, router }
    }

    /// Send a request and decode the JSON response body
    pub async fn send(
        &self,
        method: Method,
        uri: &str,
        token: Option<&str>,
        body: Option<Value>,
    ) -> (StatusCode, Value) {
        let (status, bytes) = self.send_raw(method, uri, token, body).await;
        let value = if bytes.is_empty() {
            Value::Null
        } else {
            serde_json::from_slice(&bytes).expect("response body is JSON")
        };
        (status, value)
    }

    /// Send a request and return the raw response body
    pub async fn send_raw(
        &self,
        method: Method,
        uri: &str,
        token: Option<&str>,
        body: Option<Value>,
    ) -> (StatusCode, Vec<u8>) {
        let mut builder = Request::builder().method(method).uri(uri);
        if let Some(token) = token {
            builder = builder.header(header::AUTHORIZATION, format!("Bearer {}", token));
        }

        let request = match body {
            Some(body) => builder
                .header(header::CONTENT_TYPE, "application/json")
                .body(Body::from(body.to_string())),
            None => builder.body(Body::empty()),
        }
        .expect("request builds");

        let response = self
            .router
            .clone()
            .oneshot(request)
            .await
            .expect("router responds");
        let status = response.status();
        let bytes = to_bytes(response.into_body(), usize::MAX)
            .await
            .expect("body readable");
        (status, bytes.to_vec())
    }

    pub async fn get(&self, uri: &str) -> (StatusCode, Value) {
        self.send(Method::GET, uri, None, None).await
    }

    /// Log in as the seeded admin over HTTP
    pub async fn admin_token(&self) -> String {
        let (status, body) = self
            .send(
                Method::POST,
                "/api/auth/login",
                None,
                Some(json!({ "email": ADMIN_EMAIL, "password": ADMIN_PASSWORD })),
            )
            .await;
        assert_eq!(status, StatusCode::OK, "admin login failed: {}", body);
        body["token"].as_str().expect("token present").to_string()
    }

    /// Register a non-admin user in the store and sign a token for it
    pub fn viewer_token(&self) -> String {
        let viewer = UserIdentity {
            id: "user-viewer".to_string(),
            email: "viewer@example.com".to_string(),
            role: "viewer".to_string(),
        };

        if self.state.store.find_by_id(Collection::Users, &viewer.id).is_none() {
            let record = Record::try_from(json!({
                "id": viewer.id,
                "email": viewer.email,
                "password": "not-a-bcrypt-hash",
                "role": viewer.role,
            }))
            .expect("object");
            self.state
                .store
                .create(Collection::Users, record)
                .expect("viewer created");
        }

        self.state
            .auth
            .issuer()
            .generate_token(&viewer)
            .expect("token signs")
    }
}
