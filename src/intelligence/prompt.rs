// ABOUTME: Deterministic prompt composition from the ranked tour shortlist
// ABOUTME: Produces the final user message handed to the generation model
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 ViaTour

//! Prompt composer
//!
//! Pure function from (utterance, keywords, shortlist) to the generation
//! prompt. Deterministic by construction: identical inputs always produce
//! byte-identical output, which keeps generation requests reproducible and
//! the composer trivially testable.

use crate::models::{KeywordSet, ScoredTour};

/// Maximum characters of a tour description included in the prompt
const DESCRIPTION_PREVIEW_CHARS: usize = 100;

/// Maximum itinerary days listed per tour
const MAX_ITINERARY_DAYS: usize = 3;

/// Composer for the generation prompt
pub struct PromptComposer;

impl PromptComposer {
    /// Compose the generation prompt for one recommendation pass
    ///
    /// The prompt restates the traveller's request, the detected keywords,
    /// and a compact excerpt of each shortlisted tour (name, provider, price,
    /// rating, a description preview, and up to three itinerary days with
    /// their own description previews).
    #[must_use]
    pub fn compose(utterance: &str, keywords: &KeywordSet, shortlist: &[ScoredTour]) -> String {
        let mut prompt = String::new();

        prompt.push_str("Traveller request: ");
        prompt.push_str(utterance);
        prompt.push('\n');

        if keywords.is_empty() {
            prompt.push_str("Detected interests: (none)\n");
        } else {
            prompt.push_str("Detected interests: ");
            let joined: Vec<&str> = keywords.iter().collect();
            prompt.push_str(&joined.join(", "));
            prompt.push('\n');
        }

        prompt.push_str("\nCandidate tours:\n");
        for (index, scored) in shortlist.iter().enumerate() {
            let tour = &scored.tour;
            prompt.push_str(&format!(
                "{}. {} (by {}) - {:.2} {} - rated {:.1}/5 ({} bookings)\n",
                index + 1,
                tour.name,
                tour.provider_name,
                tour.price,
                tour.currency,
                tour.average_rating,
                tour.booking_count,
            ));
            prompt.push_str("   ");
            prompt.push_str(&preview(&tour.description));
            prompt.push('\n');

            for day in scored.itinerary.iter().take(MAX_ITINERARY_DAYS) {
                prompt.push_str(&format!(
                    "   Day {}: {} - {}\n",
                    day.day_number,
                    day.title,
                    preview(&day.description)
                ));
            }
        }

        prompt.push_str(
            "\nRecommend the most suitable tours from the list above, in the \
             traveller's language.",
        );

        prompt
    }
}

/// Truncate a description to the preview length on a character boundary
fn preview(description: &str) -> String {
    let mut out: String = description.chars().take(DESCRIPTION_PREVIEW_CHARS).collect();
    if description.chars().count() > DESCRIPTION_PREVIEW_CHARS {
        out.push('…');
    }
    out
}
