// ABOUTME: Liveness endpoint for deployment probes
// ABOUTME: Reports service identity and database reachability
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 ViaTour

//! # Health Routes
//!
//! `GET /health` answers liveness probes. It checks the database with a
//! trivial query; the LLM provider is intentionally not probed here because
//! provider outages are a degraded mode, not an unhealthy service.

use std::sync::Arc;

use axum::extract::State;
use axum::routing::get;
use axum::{Json, Router};
use serde::Serialize;

use crate::errors::AppResult;
use crate::resources::ServerResources;

/// Response body for `GET /health`
#[derive(Debug, Serialize)]
pub struct HealthResponse {
    /// Overall status, "ok" when reachable
    pub status: &'static str,
    /// Service identifier
    pub service: &'static str,
    /// Crate version
    pub version: &'static str,
    /// Whether the database answered a probe query
    pub database: bool,
}

/// Health route registration
pub struct HealthRoutes;

impl HealthRoutes {
    /// Build the health router
    #[must_use]
    pub fn routes(resources: Arc<ServerResources>) -> Router {
        Router::new()
            .route("/health", get(Self::health_handler))
            .with_state(resources)
    }

    /// Handle `GET /health`
    async fn health_handler(
        State(resources): State<Arc<ServerResources>>,
    ) -> AppResult<Json<HealthResponse>> {
        let database = sqlx::query("SELECT 1")
            .fetch_one(resources.database.pool())
            .await
            .is_ok();

        Ok(Json(HealthResponse {
            status: if database { "ok" } else { "degraded" },
            service: "viatour-server",
            version: env!("CARGO_PKG_VERSION"),
            database,
        }))
    }
}
