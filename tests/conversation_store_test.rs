// ABOUTME: Integration tests for the append-only conversation store
// ABOUTME: Covers ordering, the history window bound, and tolerant role parsing
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 ViaTour

#![allow(clippy::unwrap_used, clippy::expect_used, clippy::panic)]
#![allow(missing_docs)]

use viatour_server::database::Database;
use viatour_server::models::TurnRole;

async fn empty_database() -> Database {
    Database::new("sqlite::memory:")
        .await
        .expect("Failed to create in-memory database")
}

#[tokio::test]
async fn test_append_assigns_increasing_sequence() {
    let db = empty_database().await;
    let store = db.conversations();

    let first = store.append_turn("u1", TurnRole::User, "xin chào").await.unwrap();
    let second = store
        .append_turn("u1", TurnRole::Assistant, "chào bạn")
        .await
        .unwrap();

    assert!(second.seq > first.seq);
    assert_eq!(first.role, TurnRole::User);
    assert_eq!(second.role, TurnRole::Assistant);
}

#[tokio::test]
async fn test_history_is_chronological_and_bounded() {
    let db = empty_database().await;
    let store = db.conversations();

    for i in 1..=8 {
        let role = if i % 2 == 1 {
            TurnRole::User
        } else {
            TurnRole::Assistant
        };
        store
            .append_turn("u1", role, &format!("turn {i}"))
            .await
            .unwrap();
    }

    let history = store.recent_history("u1", 5).await.unwrap();

    // The five most recent turns, oldest first
    assert_eq!(history.len(), 5);
    let messages: Vec<&str> = history.iter().map(|t| t.message.as_str()).collect();
    assert_eq!(messages, vec!["turn 4", "turn 5", "turn 6", "turn 7", "turn 8"]);
}

#[tokio::test]
async fn test_history_is_scoped_per_user() {
    let db = empty_database().await;
    let store = db.conversations();

    store.append_turn("u1", TurnRole::User, "của u1").await.unwrap();
    store.append_turn("u2", TurnRole::User, "của u2").await.unwrap();

    let history = store.recent_history("u1", 10).await.unwrap();

    assert_eq!(history.len(), 1);
    assert_eq!(history[0].message, "của u1");
}

#[tokio::test]
async fn test_history_breaks_timestamp_ties_by_sequence() {
    let db = empty_database().await;

    // Force identical timestamps so only the insertion sequence can order them
    let shared = "2025-06-01T10:00:00+00:00";
    for (seq_order, message) in ["first", "second", "third"].iter().enumerate() {
        sqlx::query(
            "INSERT INTO chat_turns (user_id, role, message, created_at) \
             VALUES ($1, $2, $3, $4)",
        )
        .bind("u1")
        .bind(if seq_order % 2 == 0 { "user" } else { "assistant" })
        .bind(message)
        .bind(shared)
        .execute(db.pool())
        .await
        .unwrap();
    }

    let history = db.conversations().recent_history("u1", 10).await.unwrap();

    let messages: Vec<&str> = history.iter().map(|t| t.message.as_str()).collect();
    assert_eq!(messages, vec!["first", "second", "third"]);

    // Repeated reads replay the identical order
    let again = db.conversations().recent_history("u1", 10).await.unwrap();
    let messages_again: Vec<&str> = again.iter().map(|t| t.message.as_str()).collect();
    assert_eq!(messages, messages_again);
}

#[tokio::test]
async fn test_history_skips_unknown_roles() {
    let db = empty_database().await;
    let store = db.conversations();

    store.append_turn("u1", TurnRole::User, "hợp lệ").await.unwrap();
    sqlx::query(
        "INSERT INTO chat_turns (user_id, role, message, created_at) \
         VALUES ('u1', 'system', 'legacy row', '2030-01-01T00:00:00+00:00')",
    )
    .execute(db.pool())
    .await
    .unwrap();

    let history = store.recent_history("u1", 10).await.unwrap();

    assert_eq!(history.len(), 1);
    assert_eq!(history[0].message, "hợp lệ");
}

#[tokio::test]
async fn test_empty_history_for_new_user() {
    let db = empty_database().await;
    let history = db.conversations().recent_history("nobody", 10).await.unwrap();
    assert!(history.is_empty());
}
