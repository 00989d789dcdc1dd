// ABOUTME: Relevance scoring and ranking of catalog tours against a keyword set
// ABOUTME: Counts distinct keyword matches with rating and booking tie-breaks
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 ViaTour

//! Relevance scorer
//!
//! Scores each tour by the number of distinct keywords occurring as
//! substrings of its search blob (name, description, and every itinerary day
//! title and description, lower-cased). Substring containment rather than
//! token matching: catalog text is short-form marketing copy where compound
//! place and activity names ("Hạ Long Bay", "ẩm thực") must match even when
//! tokenization would split them.
//!
//! The scorer never errors and never returns an empty shortlist for a
//! non-empty catalog: when nothing matches, the first tours in catalog
//! (rating/booking baseline) order are recommended with `matched = false`.

use std::cmp::Ordering;
use std::collections::HashMap;

use crate::models::{ItineraryDay, KeywordSet, ScoredTour, Tour};

/// Shortlist size for one recommendation pass
const MAX_RECOMMENDATIONS: usize = 5;

/// Result of one scoring pass
#[derive(Debug, Clone)]
pub struct ScoringOutcome {
    /// Ranked shortlist, at most the configured size
    pub tours: Vec<ScoredTour>,
    /// Whether any tour scored above zero
    pub matched: bool,
}

/// Catalog relevance scorer
pub struct RelevanceScorer {
    shortlist_size: usize,
}

impl Default for RelevanceScorer {
    fn default() -> Self {
        Self::new()
    }
}

impl RelevanceScorer {
    /// Create a scorer with the default shortlist size
    #[must_use]
    pub const fn new() -> Self {
        Self {
            shortlist_size: MAX_RECOMMENDATIONS,
        }
    }

    /// Override the shortlist size
    #[must_use]
    pub const fn with_shortlist_size(mut self, size: usize) -> Self {
        self.shortlist_size = size;
        self
    }

    /// Score and rank the catalog against a keyword set
    ///
    /// Input order is the catalog baseline (rating then bookings); the sort
    /// is stable, so fully tied tours keep that order, and when no keyword
    /// matches the shortlist is exactly the first tours in baseline order.
    #[must_use]
    pub fn score(
        &self,
        tours: &[Tour],
        itineraries: &HashMap<i64, Vec<ItineraryDay>>,
        keywords: &KeywordSet,
    ) -> ScoringOutcome {
        let mut scored: Vec<ScoredTour> = tours
            .iter()
            .map(|tour| {
                let itinerary = itineraries.get(&tour.id).cloned().unwrap_or_default();
                let score = Self::match_count(tour, &itinerary, keywords);
                ScoredTour {
                    tour: tour.clone(),
                    itinerary,
                    score,
                }
            })
            .collect();

        let matched = scored.iter().any(|s| s.score > 0);

        scored.sort_by(Self::rank);
        scored.truncate(self.shortlist_size);

        ScoringOutcome {
            tours: scored,
            matched,
        }
    }

    /// Count distinct keywords occurring as substrings of the tour's blob
    ///
    /// Each keyword counts at most once regardless of how often it occurs -
    /// the score is distinct matched keywords, not a frequency count.
    fn match_count(tour: &Tour, itinerary: &[ItineraryDay], keywords: &KeywordSet) -> u32 {
        let blob = Self::search_blob(tour, itinerary);
        let mut score = 0u32;
        for keyword in keywords.iter() {
            if blob.contains(keyword) {
                score += 1;
            }
        }
        score
    }

    /// Build the lower-cased search blob for one tour
    fn search_blob(tour: &Tour, itinerary: &[ItineraryDay]) -> String {
        let mut blob = String::with_capacity(
            tour.name.len() + tour.description.len() + itinerary.len() * 32,
        );
        blob.push_str(&tour.name);
        blob.push(' ');
        blob.push_str(&tour.description);
        for day in itinerary {
            blob.push(' ');
            blob.push_str(&day.title);
            blob.push(' ');
            blob.push_str(&day.description);
        }
        blob.to_lowercase()
    }

    /// Ranking order: score desc, rating desc, bookings desc; stable for ties
    fn rank(a: &ScoredTour, b: &ScoredTour) -> Ordering {
        b.score
            .cmp(&a.score)
            .then_with(|| b.tour.average_rating.total_cmp(&a.tour.average_rating))
            .then_with(|| b.tour.booking_count.cmp(&a.tour.booking_count))
    }
}
