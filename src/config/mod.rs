// ABOUTME: Configuration module exposing environment-based server settings
// ABOUTME: Groups configuration parsing for deployment, database, and LLM access
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 ViaTour

//! Configuration management for the ViaTour server

/// Environment variable parsing and runtime configuration
pub mod environment;

pub use environment::{DatabaseUrl, LlmConfig, LogLevel, ServerConfig};
