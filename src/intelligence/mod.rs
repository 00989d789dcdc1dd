// ABOUTME: Intelligence layer for the recommendation engine
// ABOUTME: Groups keyword extraction, relevance scoring, and prompt composition
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 ViaTour

//! Intelligence layer: the algorithmic core of the recommendation engine
//!
//! Three stages, each independently testable:
//!
//! 1. [`keywords`] turns one utterance into a [`crate::models::KeywordSet`],
//!    preferring the LLM and falling back to a deterministic tokenizer
//! 2. [`scoring`] ranks the catalog against the keyword set with defined
//!    tie-break rules and a never-empty selection policy
//! 3. [`prompt`] assembles the shortlist into a deterministic generation
//!    request

pub mod keywords;
pub mod prompt;
pub mod scoring;

pub use keywords::KeywordExtractor;
pub use prompt::PromptComposer;
pub use scoring::{RelevanceScorer, ScoringOutcome};
