// ABOUTME: Centralized server resources shared across all routes and services
// ABOUTME: Bundles the database, LLM provider, and configuration behind one Arc
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 ViaTour

//! Shared server resources
//!
//! All route handlers and services borrow from a single `Arc<ServerResources>`
//! created at startup, so expensive handles (connection pool, HTTP client)
//! are constructed once.

use std::sync::Arc;

use crate::config::ServerConfig;
use crate::database::Database;
use crate::llm::LlmProvider;

/// Container for all shared server state
pub struct ServerResources {
    /// Database with catalog and conversation managers
    pub database: Database,
    /// Chat completion provider used for extraction and generation
    pub llm: Arc<dyn LlmProvider>,
    /// Resolved server configuration
    pub config: ServerConfig,
}

impl ServerResources {
    /// Create a new resource container
    #[must_use]
    pub fn new(database: Database, llm: Arc<dyn LlmProvider>, config: ServerConfig) -> Self {
        Self {
            database,
            llm,
            config,
        }
    }
}
