// ABOUTME: Append-only conversation store with bounded-window history retrieval
// ABOUTME: Persists immutable chat turns ordered by timestamp and insertion sequence
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 ViaTour

//! Conversation store
//!
//! Turns are immutable once created and totally ordered by
//! `(created_at, seq)` within a user's conversation. Appends are atomic
//! single-row inserts; a turn is either fully recorded or not recorded at
//! all, there is no partial state observable to readers.

use crate::errors::{AppError, AppResult};
use crate::models::{ConversationTurn, TurnRole};
use sqlx::{Row, SqlitePool};

/// Conversation database operations manager
pub struct ConversationManager {
    pool: SqlitePool,
}

impl ConversationManager {
    /// Create a new conversation manager
    #[must_use]
    pub const fn new(pool: SqlitePool) -> Self {
        Self { pool }
    }

    /// Append one immutable turn, timestamped at call time
    ///
    /// # Errors
    ///
    /// Returns an error if the database operation fails.
    pub async fn append_turn(
        &self,
        user_id: &str,
        role: TurnRole,
        message: &str,
    ) -> AppResult<ConversationTurn> {
        let now = chrono::Utc::now().to_rfc3339();

        let result = sqlx::query(
            r"
            INSERT INTO chat_turns (user_id, role, message, created_at)
            VALUES ($1, $2, $3, $4)
            ",
        )
        .bind(user_id)
        .bind(role.as_str())
        .bind(message)
        .bind(&now)
        .execute(&self.pool)
        .await
        .map_err(|e| AppError::database(format!("Failed to append turn: {e}")))?;

        Ok(ConversationTurn {
            seq: result.last_insert_rowid(),
            user_id: user_id.to_owned(),
            role,
            message: message.to_owned(),
            created_at: now,
        })
    }

    /// Get up to `max_turns` most recent turns in ascending chronological order
    ///
    /// Ties on `created_at` fall back to the insertion sequence, so repeated
    /// reads replay the identical order.
    ///
    /// # Errors
    ///
    /// Returns an error if the database operation fails.
    pub async fn recent_history(
        &self,
        user_id: &str,
        max_turns: u32,
    ) -> AppResult<Vec<ConversationTurn>> {
        let rows = sqlx::query(
            r"
            SELECT seq, user_id, role, message, created_at
            FROM chat_turns
            WHERE user_id = $1
            ORDER BY created_at DESC, seq DESC
            LIMIT $2
            ",
        )
        .bind(user_id)
        .bind(i64::from(max_turns))
        .fetch_all(&self.pool)
        .await
        .map_err(|e| AppError::database(format!("Failed to load history: {e}")))?;

        // Reverse to get chronological order; rows with roles this core does
        // not know are skipped rather than failing the read.
        let mut turns: Vec<ConversationTurn> = rows
            .into_iter()
            .filter_map(|r| {
                let role = TurnRole::parse(r.get::<String, _>("role").as_str())?;
                Some(ConversationTurn {
                    seq: r.get("seq"),
                    user_id: r.get("user_id"),
                    role,
                    message: r.get("message"),
                    created_at: r.get("created_at"),
                })
            })
            .collect();
        turns.reverse();

        Ok(turns)
    }
}
