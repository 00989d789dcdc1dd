// ABOUTME: Main library entry point for the ViaTour recommendation API
// ABOUTME: Provides the conversational tour recommendation engine and its HTTP surface
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 ViaTour

#![deny(unsafe_code)]

//! # ViaTour Recommendation Server
//!
//! Conversational tour-recommendation engine for the ViaTour travel platform.
//! Given a free-text message and prior conversation history, the server
//! extracts intent keywords, scores the bookable tour catalog for relevance,
//! selects a shortlist, and asks an external LLM to produce a natural-language
//! reply referencing the selected tours.
//!
//! ## Architecture
//!
//! - **Models**: Typed records for tours, itineraries, and conversation turns
//! - **Database**: `SQLite`-backed catalog and conversation stores
//! - **LLM**: Provider abstraction used for both intent extraction and reply
//!   generation, with deterministic fallbacks when the provider misbehaves
//! - **Intelligence**: Keyword extraction, relevance scoring, prompt assembly
//! - **Services**: The recommendation pipeline orchestrating one chat request
//! - **Routes**: The `POST /chat` entry point
//!
//! ## Degradation policy
//!
//! The external LLM is the only source of semantic understanding, but it is
//! unreliable. Extraction failures fall back to a whitespace tokenizer and
//! generation failures fall back to a fixed apology reply; only storage
//! failures surface to the caller as hard errors.

/// Configuration management and environment parsing
pub mod config;

/// `SQLite` persistence layer: catalog reads and conversation appends
pub mod database;

/// Unified error handling system with standard error codes and HTTP responses
pub mod errors;

/// Keyword extraction, relevance scoring, and prompt composition
pub mod intelligence;

/// LLM provider abstraction for intent extraction and reply generation
pub mod llm;

/// Production logging and structured output
pub mod logging;

/// Common data models for the tour catalog and conversations
pub mod models;

/// Shared server resource bundle for dependency injection
pub mod resources;

/// `HTTP` routes for the chat and health endpoints
pub mod routes;

/// Domain service layer: the chat recommendation pipeline
pub mod services;
