// ABOUTME: SQLite persistence layer with schema setup and per-concern managers
// ABOUTME: Owns the connection pool shared by the catalog and conversation stores
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 ViaTour

//! Database abstraction for the ViaTour server
//!
//! The database is split into focused managers: [`catalog::CatalogManager`]
//! for read-only tour snapshots and [`conversations::ConversationManager`]
//! for the append-only chat log. Both borrow the pool owned by [`Database`].

pub mod catalog;
pub mod conversations;

pub use catalog::CatalogManager;
pub use conversations::ConversationManager;

use crate::errors::{AppError, AppResult};
use sqlx::sqlite::{SqliteConnectOptions, SqlitePoolOptions};
use sqlx::SqlitePool;
use std::str::FromStr;
use tracing::info;

/// Maximum pooled connections for file-backed databases
const MAX_CONNECTIONS: u32 = 5;

/// Owner of the `SQLite` connection pool
#[derive(Clone)]
pub struct Database {
    pool: SqlitePool,
}

impl Database {
    /// Connect to the database and create the schema if needed
    ///
    /// In-memory databases are pinned to a single connection so every
    /// manager sees the same store.
    ///
    /// # Errors
    ///
    /// Returns an error if the connection or schema setup fails.
    pub async fn new(connection_string: &str) -> AppResult<Self> {
        let options = SqliteConnectOptions::from_str(connection_string)
            .map_err(|e| AppError::config(format!("Invalid database URL: {e}")))?
            .create_if_missing(true);

        let max_connections = if connection_string.contains(":memory:") {
            1
        } else {
            MAX_CONNECTIONS
        };

        let pool = SqlitePoolOptions::new()
            .max_connections(max_connections)
            .connect_with(options)
            .await
            .map_err(|e| AppError::database(format!("Failed to connect: {e}")))?;

        let database = Self { pool };
        database.migrate().await?;
        info!("Database ready: {connection_string}");

        Ok(database)
    }

    /// Borrow the underlying pool
    #[must_use]
    pub const fn pool(&self) -> &SqlitePool {
        &self.pool
    }

    /// Create a catalog manager over this database
    #[must_use]
    pub fn catalog(&self) -> CatalogManager {
        CatalogManager::new(self.pool.clone())
    }

    /// Create a conversation manager over this database
    #[must_use]
    pub fn conversations(&self) -> ConversationManager {
        ConversationManager::new(self.pool.clone())
    }

    /// Create tables and indexes if they do not exist
    async fn migrate(&self) -> AppResult<()> {
        let statements = [
            r"
            CREATE TABLE IF NOT EXISTS providers (
                id INTEGER PRIMARY KEY AUTOINCREMENT,
                name TEXT NOT NULL
            )
            ",
            r"
            CREATE TABLE IF NOT EXISTS tours (
                id INTEGER PRIMARY KEY AUTOINCREMENT,
                name TEXT NOT NULL,
                description TEXT NOT NULL DEFAULT '',
                price REAL NOT NULL DEFAULT 0,
                currency TEXT NOT NULL DEFAULT 'VND',
                image_url TEXT,
                provider_id INTEGER NOT NULL REFERENCES providers(id),
                available INTEGER NOT NULL DEFAULT 1
            )
            ",
            r"
            CREATE TABLE IF NOT EXISTS itinerary_days (
                tour_id INTEGER NOT NULL REFERENCES tours(id),
                day_number INTEGER NOT NULL,
                title TEXT NOT NULL DEFAULT '',
                description TEXT NOT NULL DEFAULT '',
                PRIMARY KEY (tour_id, day_number)
            )
            ",
            r"
            CREATE TABLE IF NOT EXISTS ratings (
                id INTEGER PRIMARY KEY AUTOINCREMENT,
                tour_id INTEGER NOT NULL REFERENCES tours(id),
                user_id TEXT NOT NULL,
                score REAL NOT NULL
            )
            ",
            r"
            CREATE TABLE IF NOT EXISTS bookings (
                id INTEGER PRIMARY KEY AUTOINCREMENT,
                tour_id INTEGER NOT NULL REFERENCES tours(id),
                user_id TEXT NOT NULL
            )
            ",
            r"
            CREATE TABLE IF NOT EXISTS chat_turns (
                seq INTEGER PRIMARY KEY AUTOINCREMENT,
                user_id TEXT NOT NULL,
                role TEXT NOT NULL,
                message TEXT NOT NULL,
                created_at TEXT NOT NULL
            )
            ",
            r"
            CREATE INDEX IF NOT EXISTS idx_chat_turns_user
            ON chat_turns(user_id, created_at)
            ",
        ];

        for statement in statements {
            sqlx::query(statement)
                .execute(&self.pool)
                .await
                .map_err(|e| AppError::database(format!("Schema setup failed: {e}")))?;
        }

        Ok(())
    }
}
