// ABOUTME: HTTP endpoint for the conversational tour recommendation chat
// ABOUTME: Validates the request envelope and delegates to the recommendation service
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 ViaTour

//! # Chat Routes
//!
//! `POST /chat` is the single conversational entry point. The handler only
//! validates the envelope; pipeline semantics live in
//! [`RecommendationService`].

use std::sync::Arc;

use axum::extract::State;
use axum::routing::post;
use axum::{Json, Router};
use serde::{Deserialize, Serialize};
use tracing::info;

use crate::errors::{AppError, AppResult};
use crate::models::ScoredTour;
use crate::resources::ServerResources;
use crate::services::RecommendationService;

/// Request body for `POST /chat`
#[derive(Debug, Deserialize)]
pub struct ChatRequestBody {
    /// Conversation owner
    pub user_id: Option<String>,
    /// Traveller utterance
    pub message: Option<String>,
}

/// Response body for `POST /chat`
#[derive(Debug, Serialize)]
pub struct ChatResponseBody {
    /// Always true on the success path
    pub success: bool,
    /// Assistant reply (generated or fallback)
    pub reply: String,
    /// Keywords the pass scored against
    pub keywords: Vec<String>,
    /// Ranked tour shortlist
    pub tours: Vec<ScoredTour>,
}

/// Chat route registration
pub struct ChatRoutes;

impl ChatRoutes {
    /// Build the chat router
    #[must_use]
    pub fn routes(resources: Arc<ServerResources>) -> Router {
        Router::new()
            .route("/chat", post(Self::chat_handler))
            .with_state(resources)
    }

    /// Handle `POST /chat`
    async fn chat_handler(
        State(resources): State<Arc<ServerResources>>,
        Json(body): Json<ChatRequestBody>,
    ) -> AppResult<Json<ChatResponseBody>> {
        let user_id = body
            .user_id
            .as_deref()
            .map(str::trim)
            .filter(|s| !s.is_empty())
            .ok_or_else(|| AppError::missing_field("user_id"))?;
        let message = body
            .message
            .as_deref()
            .ok_or_else(|| AppError::missing_field("message"))?;

        info!(user_id, "Chat request received");

        let service = RecommendationService::new(resources.clone());
        let outcome = service.chat(user_id, message).await?;

        Ok(Json(ChatResponseBody {
            success: true,
            reply: outcome.reply,
            keywords: outcome.keywords,
            tours: outcome.tours,
        }))
    }
}
