// ABOUTME: HTTP route registration for the recommendation server
// ABOUTME: Assembles chat and health routers over the shared resources
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 ViaTour

//! HTTP routes

pub mod chat;
pub mod health;

use std::sync::Arc;

use axum::Router;

use crate::resources::ServerResources;

/// Build the complete application router
#[must_use]
pub fn router(resources: Arc<ServerResources>) -> Router {
    Router::new()
        .merge(chat::ChatRoutes::routes(resources.clone()))
        .merge(health::HealthRoutes::routes(resources))
}
