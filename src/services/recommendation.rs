// ABOUTME: End-to-end orchestration of one conversational recommendation pass
// ABOUTME: Persist, extract, score, generate, persist again, in that order
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 ViaTour

//! Recommendation orchestrator
//!
//! Drives one chat exchange through the fixed pipeline:
//!
//! 1. validate and persist the user turn
//! 2. extract intent keywords (LLM first, tokenizer fallback)
//! 3. load the bookable catalog and score it against the keywords
//! 4. compose the generation prompt and replay the bounded history window
//! 5. generate the reply, substituting a fixed apology on failure
//! 6. persist the assistant turn
//!
//! Only storage failures abort the pass. Extraction and generation failures
//! degrade so that every valid request still gets a persisted answer.

use std::sync::Arc;

use tracing::{debug, info, warn};

use crate::errors::{AppError, AppResult};
use crate::intelligence::{KeywordExtractor, PromptComposer, RelevanceScorer};
use crate::llm::{prompts, ChatMessage, ChatRequest};
use crate::models::{ConversationTurn, ScoredTour, TurnRole};
use crate::resources::ServerResources;

/// Result of one recommendation pass
#[derive(Debug)]
pub struct RecommendationOutcome {
    /// Generated (or fallback) assistant reply
    pub reply: String,
    /// Keywords the pass scored against, in extraction order
    pub keywords: Vec<String>,
    /// Ranked tour shortlist
    pub tours: Vec<ScoredTour>,
}

/// Orchestrator for the conversational recommendation pipeline
pub struct RecommendationService {
    resources: Arc<ServerResources>,
    extractor: KeywordExtractor,
    scorer: RelevanceScorer,
}

impl RecommendationService {
    /// Create a service over the shared resources
    #[must_use]
    pub fn new(resources: Arc<ServerResources>) -> Self {
        let extractor = KeywordExtractor::new(resources.llm.clone());
        Self {
            resources,
            extractor,
            scorer: RelevanceScorer::new(),
        }
    }

    /// Run one full recommendation pass for a user utterance
    ///
    /// # Errors
    ///
    /// Returns an error if the utterance is empty or if any conversation or
    /// catalog storage operation fails. LLM failures do not error; they
    /// degrade to the tokenizer fallback and the fixed apology reply.
    pub async fn chat(&self, user_id: &str, message: &str) -> AppResult<RecommendationOutcome> {
        let utterance = message.trim();
        if utterance.is_empty() {
            return Err(AppError::invalid_input("message must not be empty"));
        }

        let conversations = self.resources.database.conversations();

        // The user turn is durable before any model call so that a degraded
        // pass still leaves a complete transcript
        let user_turn = conversations
            .append_turn(user_id, TurnRole::User, utterance)
            .await?;

        let keywords = self.extractor.extract(utterance).await;
        debug!(user_id, count = keywords.len(), "Scoring catalog");

        let catalog = self.resources.database.catalog();
        let tours = catalog.list_bookable_tours().await?;
        let itineraries = catalog.list_itineraries().await?;

        let outcome = self.scorer.score(&tours, &itineraries, &keywords);
        info!(
            user_id,
            shortlist = outcome.tours.len(),
            matched = outcome.matched,
            "Catalog scored"
        );

        let window = self.resources.config.history_window;
        let mut history = conversations.recent_history(user_id, window).await?;
        // The window may include the turn appended above; the current
        // utterance enters the request through the composed prompt instead
        history.retain(|turn| turn.seq != user_turn.seq);

        let prompt = PromptComposer::compose(utterance, &keywords, &outcome.tours);
        let request = ChatRequest::new(build_messages(&history, &prompt));

        let reply = match self.resources.llm.complete(&request).await {
            Ok(response) => response.content,
            Err(e) => {
                warn!(user_id, error = %e, "Reply generation failed, using fallback reply");
                prompts::fallback_reply().to_owned()
            }
        };

        conversations
            .append_turn(user_id, TurnRole::Assistant, &reply)
            .await?;

        Ok(RecommendationOutcome {
            reply,
            keywords: keywords.iter().map(str::to_owned).collect(),
            tours: outcome.tours,
        })
    }
}

/// Replay persisted history into a chat request, newest prompt last
fn build_messages(history: &[ConversationTurn], prompt: &str) -> Vec<ChatMessage> {
    let mut messages = Vec::with_capacity(history.len() + 2);
    messages.push(ChatMessage::system(prompts::get_travel_system_prompt()));
    for turn in history {
        let message = match turn.role {
            TurnRole::User => ChatMessage::user(turn.message.clone()),
            TurnRole::Assistant => ChatMessage::assistant(turn.message.clone()),
        };
        messages.push(message);
    }
    messages.push(ChatMessage::user(prompt));
    messages
}
