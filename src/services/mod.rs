// ABOUTME: Service layer orchestrating the recommendation pipeline
// ABOUTME: Sits between HTTP routes and the database/intelligence components
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 ViaTour

//! Service layer

pub mod recommendation;

pub use recommendation::{RecommendationOutcome, RecommendationService};
