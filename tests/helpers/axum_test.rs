// ABOUTME: In-process HTTP harness for exercising Axum routers in tests
// ABOUTME: Drives single requests through tower oneshot without binding a port
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 ViaTour

use axum::body::{to_bytes, Body};
use axum::http::{header, Method, Request, StatusCode};
use axum::Router;
use serde::de::DeserializeOwned;
use serde::Serialize;
use tower::ServiceExt;

/// Captured response: status plus eagerly-read body
pub struct TestResponse {
    status: StatusCode,
    body: Vec<u8>,
}

impl TestResponse {
    /// Response status code
    #[allow(dead_code)]
    pub const fn status_code(&self) -> StatusCode {
        self.status
    }

    /// Decode the body as JSON
    #[allow(dead_code)]
    pub fn json<T: DeserializeOwned>(self) -> T {
        serde_json::from_slice(&self.body).expect("Failed to deserialize JSON response")
    }

    /// Assert the status code, chaining for body assertions
    #[allow(dead_code)]
    pub fn assert_status(self, expected: StatusCode) -> Self {
        assert_eq!(
            self.status, expected,
            "Expected status {expected}, got {}",
            self.status
        );
        self
    }
}

/// Issue a GET request against the router
#[allow(dead_code)]
pub async fn get(app: Router, uri: &str) -> TestResponse {
    let request = Request::builder()
        .method(Method::GET)
        .uri(uri)
        .body(Body::empty())
        .expect("Failed to build request");
    execute(app, request).await
}

/// Issue a POST request with a JSON body against the router
#[allow(dead_code)]
pub async fn post_json<T: Serialize>(app: Router, uri: &str, body: &T) -> TestResponse {
    let payload = serde_json::to_vec(body).expect("Failed to serialize JSON");
    let request = Request::builder()
        .method(Method::POST)
        .uri(uri)
        .header(header::CONTENT_TYPE, "application/json")
        .body(Body::from(payload))
        .expect("Failed to build request");
    execute(app, request).await
}

async fn execute(app: Router, request: Request<Body>) -> TestResponse {
    let response = app
        .oneshot(request)
        .await
        .expect("Failed to execute request");

    let status = response.status();
    let body = to_bytes(response.into_body(), usize::MAX)
        .await
        .expect("Failed to read response body")
        .to_vec();

    TestResponse { status, body }
}
