// ABOUTME: Common data models for the tour catalog, itineraries, and conversations
// ABOUTME: Typed records at the repository boundary so scoring never touches raw rows
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 ViaTour

//! Core data models for the recommendation engine
//!
//! All catalog types are immutable snapshots for the duration of one
//! recommendation pass. Conversation turns are append-only and never mutated
//! after creation.

use serde::{Deserialize, Serialize};

/// A bookable tour with its aggregate rating and booking statistics
///
/// Only tours flagged available at snapshot time are represented here;
/// `average_rating` is 0 when the tour has no ratings yet.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Tour {
    /// Unique tour ID
    pub id: i64,
    /// Tour name
    pub name: String,
    /// Marketing description
    pub description: String,
    /// Price in the tour's currency
    pub price: f64,
    /// ISO currency code
    pub currency: String,
    /// Image reference for the tour card
    pub image_url: Option<String>,
    /// Provider who operates the tour
    pub provider_id: i64,
    /// Display name of the provider
    pub provider_name: String,
    /// Average rating in 0..=5, 0 when unrated
    pub average_rating: f64,
    /// Number of distinct bookings
    pub booking_count: i64,
}

/// One day of a tour's itinerary
///
/// Day numbers are 1-based and unique per tour; gaps are tolerated.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ItineraryDay {
    /// Tour this day belongs to
    pub tour_id: i64,
    /// 1-based day number
    pub day_number: i64,
    /// Day title
    pub title: String,
    /// Day description
    pub description: String,
}

/// Role of a conversation turn
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TurnRole {
    /// Message submitted by the user
    User,
    /// Reply produced by the engine
    Assistant,
}

impl TurnRole {
    /// Convert to string representation for storage
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::User => "user",
            Self::Assistant => "assistant",
        }
    }

    /// Parse from the stored string representation
    #[must_use]
    pub fn parse(s: &str) -> Option<Self> {
        match s {
            "user" => Some(Self::User),
            "assistant" => Some(Self::Assistant),
            _ => None,
        }
    }
}

/// One immutable turn in a user's conversation
///
/// Turns are totally ordered by `(created_at, seq)`; `seq` is the insertion
/// sequence assigned by storage, which makes replay stable even when two
/// turns share a timestamp.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ConversationTurn {
    /// Monotonic insertion sequence
    pub seq: i64,
    /// User this conversation belongs to
    pub user_id: String,
    /// Who produced the turn
    pub role: TurnRole,
    /// Message text
    pub message: String,
    /// Creation timestamp (RFC 3339)
    pub created_at: String,
}

/// Deduplicated, lower-cased intent keywords derived from one utterance
///
/// Keeps insertion order so derivation is deterministic; set membership is
/// the only semantic, ordering carries no ranking meaning.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct KeywordSet {
    keywords: Vec<String>,
}

impl KeywordSet {
    /// Create an empty keyword set
    #[must_use]
    pub const fn new() -> Self {
        Self {
            keywords: Vec::new(),
        }
    }

    /// Build a set from raw terms, lower-casing and deduplicating
    #[must_use]
    pub fn from_raw<I, S>(terms: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let mut set = Self::new();
        for term in terms {
            set.insert(term.as_ref());
        }
        set
    }

    /// Insert one term, normalized to lower case; duplicates are ignored
    pub fn insert(&mut self, term: &str) {
        let normalized = term.trim().to_lowercase();
        if !normalized.is_empty() && !self.keywords.contains(&normalized) {
            self.keywords.push(normalized);
        }
    }

    /// Whether the set holds no keywords (a valid result, not an error)
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.keywords.is_empty()
    }

    /// Number of distinct keywords
    #[must_use]
    pub fn len(&self) -> usize {
        self.keywords.len()
    }

    /// Iterate keywords in derivation order
    pub fn iter(&self) -> impl Iterator<Item = &str> {
        self.keywords.iter().map(String::as_str)
    }

    /// Borrow the keywords as a slice
    #[must_use]
    pub fn as_slice(&self) -> &[String] {
        &self.keywords
    }
}

impl From<KeywordSet> for Vec<String> {
    fn from(set: KeywordSet) -> Self {
        set.keywords
    }
}

/// A tour annotated with its itinerary and relevance score for one query
///
/// Ephemeral: recomputed per request, never persisted. The score is the
/// count of distinct matched keywords, never a frequency estimate.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ScoredTour {
    /// The scored tour
    #[serde(flatten)]
    pub tour: Tour,
    /// Day-by-day itinerary, ordered by day number
    pub itinerary: Vec<ItineraryDay>,
    /// Count of distinct keywords matched against the tour's search blob
    pub score: u32,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_keyword_set_normalizes_and_dedupes() {
        let set = KeywordSet::from_raw(["Huế", "huế", "  Biển ", "biển", "phố cổ"]);
        let keywords: Vec<&str> = set.iter().collect();
        assert_eq!(keywords, vec!["huế", "biển", "phố cổ"]);
    }

    #[test]
    fn test_keyword_set_ignores_blank_terms() {
        let set = KeywordSet::from_raw(["", "  ", "đà nẵng"]);
        assert_eq!(set.len(), 1);
    }

    #[test]
    fn test_turn_role_round_trip() {
        assert_eq!(TurnRole::parse("user"), Some(TurnRole::User));
        assert_eq!(TurnRole::parse(TurnRole::Assistant.as_str()), Some(TurnRole::Assistant));
        assert_eq!(TurnRole::parse("system"), None);
    }

    #[test]
    fn test_scored_tour_serializes_flat() {
        let tour = Tour {
            id: 1,
            name: "Hạ Long Bay Cruise".into(),
            description: "Two days on the bay".into(),
            price: 120.0,
            currency: "USD".into(),
            image_url: None,
            provider_id: 7,
            provider_name: "Viet Sails".into(),
            average_rating: 4.5,
            booking_count: 20,
        };
        let scored = ScoredTour {
            tour,
            itinerary: vec![],
            score: 2,
        };

        let json = serde_json::to_value(&scored).unwrap();
        assert_eq!(json["name"], "Hạ Long Bay Cruise");
        assert_eq!(json["score"], 2);
        assert_eq!(json["provider_name"], "Viet Sails");
    }
}
