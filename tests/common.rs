// ABOUTME: Shared fixtures for integration tests
// ABOUTME: Builds in-memory server resources, a seeded catalog, and scripted LLM providers
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 ViaTour

#![allow(dead_code)]
#![allow(clippy::unwrap_used, clippy::expect_used)]

use std::collections::VecDeque;
use std::sync::{Arc, Mutex};

use async_trait::async_trait;

use viatour_server::config::ServerConfig;
use viatour_server::database::Database;
use viatour_server::errors::AppError;
use viatour_server::llm::{ChatRequest, ChatResponse, LlmProvider};
use viatour_server::resources::ServerResources;

/// Scripted LLM provider for deterministic tests
///
/// Each `complete` call pops the next scripted result; an exhausted script
/// fails the call, which exercises the degraded paths.
pub struct ScriptedProvider {
    script: Mutex<VecDeque<Result<String, AppError>>>,
}

impl ScriptedProvider {
    pub fn new() -> Self {
        Self {
            script: Mutex::new(VecDeque::new()),
        }
    }

    /// Provider whose every call fails, for degraded-mode tests
    pub fn failing() -> Self {
        Self::new()
    }

    #[must_use]
    pub fn then_ok(self, content: &str) -> Self {
        self.script
            .lock()
            .unwrap()
            .push_back(Ok(content.to_owned()));
        self
    }

    #[must_use]
    pub fn then_err(self, message: &str) -> Self {
        self.script
            .lock()
            .unwrap()
            .push_back(Err(AppError::external_service("scripted", message)));
        self
    }
}

#[async_trait]
impl LlmProvider for ScriptedProvider {
    fn name(&self) -> &'static str {
        "scripted"
    }

    fn default_model(&self) -> &str {
        "scripted-model"
    }

    async fn complete(&self, _request: &ChatRequest) -> Result<ChatResponse, AppError> {
        let next = self.script.lock().unwrap().pop_front();
        match next {
            Some(Ok(content)) => Ok(ChatResponse {
                content,
                model: "scripted-model".to_owned(),
                finish_reason: Some("stop".to_owned()),
            }),
            Some(Err(e)) => Err(e),
            None => Err(AppError::external_service("scripted", "script exhausted")),
        }
    }

    async fn health_check(&self) -> Result<bool, AppError> {
        Ok(true)
    }
}

/// Create server resources over a seeded in-memory database
pub async fn create_test_resources(provider: Arc<dyn LlmProvider>) -> Arc<ServerResources> {
    let database = Database::new("sqlite::memory:")
        .await
        .expect("Failed to create in-memory database");
    seed_catalog(&database).await;

    Arc::new(ServerResources::new(
        database,
        provider,
        ServerConfig::default(),
    ))
}

/// Seed a small Vietnamese tour catalog
///
/// Aggregates by design: Đà Lạt Flower Tour averages 4.8 over one booking,
/// Hạ Long Bay Cruise averages 4.5 over three bookings, the Mekong trip is
/// unrated, and the cave expedition is not bookable.
pub async fn seed_catalog(database: &Database) {
    let statements = [
        "INSERT INTO providers (id, name) VALUES (1, 'Viet Sails')",
        "INSERT INTO providers (id, name) VALUES (2, 'Highland Tours')",
        "INSERT INTO providers (id, name) VALUES (3, 'Mekong Life')",
        "INSERT INTO tours (id, name, description, price, currency, provider_id, available) \
         VALUES (1, 'Hạ Long Bay Cruise', 'Du thuyền qua vịnh, chèo kayak giữa các đảo đá vôi', \
         120, 'USD', 1, 1)",
        "INSERT INTO tours (id, name, description, price, currency, provider_id, available) \
         VALUES (2, 'Đà Lạt Flower Tour', 'Ngắm hoa tại Đà Lạt, tham quan vườn hoa và đồi chè', \
         45, 'USD', 2, 1)",
        "INSERT INTO tours (id, name, description, price, currency, provider_id, available) \
         VALUES (3, 'Mekong Delta Day Trip', 'Chợ nổi và cuộc sống miền sông nước', \
         30, 'USD', 3, 1)",
        "INSERT INTO tours (id, name, description, price, currency, provider_id, available) \
         VALUES (4, 'Secret Cave Expedition', 'Not bookable yet', 99, 'USD', 1, 0)",
        "INSERT INTO itinerary_days (tour_id, day_number, title, description) \
         VALUES (1, 1, 'Lên du thuyền', 'Khởi hành từ cảng Tuần Châu')",
        "INSERT INTO itinerary_days (tour_id, day_number, title, description) \
         VALUES (1, 2, 'Chèo kayak', 'Khám phá hang Luồn')",
        "INSERT INTO itinerary_days (tour_id, day_number, title, description) \
         VALUES (2, 1, 'Vườn hoa thành phố', 'Tham quan vườn hoa trung tâm Đà Lạt')",
        "INSERT INTO ratings (tour_id, user_id, score) VALUES (1, 'u1', 4)",
        "INSERT INTO ratings (tour_id, user_id, score) VALUES (1, 'u2', 5)",
        "INSERT INTO ratings (tour_id, user_id, score) VALUES (2, 'u1', 5)",
        "INSERT INTO ratings (tour_id, user_id, score) VALUES (2, 'u2', 5)",
        "INSERT INTO ratings (tour_id, user_id, score) VALUES (2, 'u3', 5)",
        "INSERT INTO ratings (tour_id, user_id, score) VALUES (2, 'u4', 5)",
        "INSERT INTO ratings (tour_id, user_id, score) VALUES (2, 'u5', 4)",
        "INSERT INTO bookings (tour_id, user_id) VALUES (1, 'u1')",
        "INSERT INTO bookings (tour_id, user_id) VALUES (1, 'u2')",
        "INSERT INTO bookings (tour_id, user_id) VALUES (1, 'u3')",
        "INSERT INTO bookings (tour_id, user_id) VALUES (2, 'u1')",
    ];

    for statement in statements {
        sqlx::query(statement)
            .execute(database.pool())
            .await
            .expect("Failed to seed catalog");
    }
}

/// Count persisted chat turns for a user
pub async fn count_turns(database: &Database, user_id: &str) -> i64 {
    use sqlx::Row;
    sqlx::query("SELECT COUNT(*) AS n FROM chat_turns WHERE user_id = $1")
        .bind(user_id)
        .fetch_one(database.pool())
        .await
        .expect("Failed to count turns")
        .get("n")
}
