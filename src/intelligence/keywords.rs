// ABOUTME: Intent keyword extraction with LLM primary path and tokenizer fallback
// ABOUTME: Parses loose JSON out of model output and degrades deterministically
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 ViaTour

//! Keyword extraction
//!
//! The external model is the only source of semantic understanding, but it is
//! unreliable (rate limits, malformed completions) and must never block a
//! response. Extraction therefore has two tiers: a single LLM call whose
//! output is mined for a `{"keywords": [...]}` payload, and a deterministic
//! whitespace tokenizer used whenever that payload cannot be recovered.

use std::sync::Arc;

use tracing::{debug, warn};

use crate::llm::{ChatMessage, ChatRequest, LlmProvider};
use crate::models::KeywordSet;

/// Minimum character count for fallback tokens (tokens of two or fewer
/// characters are dropped as noise)
const MIN_TOKEN_CHARS: usize = 3;

/// Instruction prepended to the utterance on the LLM path
const KEYWORD_INSTRUCTION: &str = "\
Extract travel-relevant keywords from the traveller message below: place \
names, activities, cuisine, travel style, and time references. Respond with \
only a JSON object of the form {\"keywords\": [\"...\"]} and nothing else.\n\
\n\
Message: ";

/// Parse a `{"keywords": [...]}` payload out of raw model output
///
/// Locates the first balanced `{...}` substring and JSON-decodes it. Returns
/// `None` when no balanced object exists, decoding fails, or the keyword
/// array is missing or empty - absence, not an error, so the caller's
/// fallback stays a plain branch.
#[must_use]
pub fn parse_keyword_payload(raw: &str) -> Option<KeywordSet> {
    let candidate = first_balanced_object(raw)?;
    let value: serde_json::Value = serde_json::from_str(candidate).ok()?;

    let keywords: Vec<&str> = value
        .get("keywords")?
        .as_array()?
        .iter()
        .filter_map(serde_json::Value::as_str)
        .collect();

    let set = KeywordSet::from_raw(keywords);
    if set.is_empty() {
        None
    } else {
        Some(set)
    }
}

/// Find the first balanced `{...}` substring
///
/// Brace depth only; braces inside JSON strings are not special-cased, in
/// which case decoding fails and the caller falls back, same as for any
/// malformed completion.
fn first_balanced_object(raw: &str) -> Option<&str> {
    let start = raw.find('{')?;
    let mut depth = 0usize;
    for (offset, ch) in raw[start..].char_indices() {
        match ch {
            '{' => depth += 1,
            '}' => {
                depth = depth.saturating_sub(1);
                if depth == 0 {
                    return Some(&raw[start..=start + offset]);
                }
            }
            _ => {}
        }
    }
    None
}

/// Deterministic fallback tokenizer
///
/// Lower-cases the utterance, splits on whitespace, and keeps deduplicated
/// tokens longer than two characters. An empty result is a valid keyword set.
#[must_use]
pub fn fallback_keywords(utterance: &str) -> KeywordSet {
    KeywordSet::from_raw(
        utterance
            .to_lowercase()
            .split_whitespace()
            .filter(|token| token.chars().count() >= MIN_TOKEN_CHARS),
    )
}

/// Two-tier keyword extractor
pub struct KeywordExtractor {
    provider: Arc<dyn LlmProvider>,
}

impl KeywordExtractor {
    /// Create an extractor over the given provider
    #[must_use]
    pub fn new(provider: Arc<dyn LlmProvider>) -> Self {
        Self { provider }
    }

    /// Extract intent keywords from one utterance
    ///
    /// Never fails the pipeline: any provider error or unusable output
    /// downgrades to the tokenizer fallback, logged for observability only.
    pub async fn extract(&self, utterance: &str) -> KeywordSet {
        let request = ChatRequest::new(vec![ChatMessage::user(format!(
            "{KEYWORD_INSTRUCTION}{utterance}"
        ))]);

        match self.provider.complete(&request).await {
            Ok(response) => {
                if let Some(set) = parse_keyword_payload(&response.content) {
                    debug!(count = set.len(), "Extracted keywords via LLM");
                    set
                } else {
                    warn!("LLM returned no usable keyword payload, using tokenizer fallback");
                    fallback_keywords(utterance)
                }
            }
            Err(e) => {
                warn!(error = %e, "Keyword extraction call failed, using tokenizer fallback");
                fallback_keywords(utterance)
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_fallback_is_lowercased_deduplicated_and_filtered() {
        let set = fallback_keywords("Tôi muốn đi Huế ăn hải sản");
        let keywords: Vec<&str> = set.iter().collect();
        // "đi" and "ăn" are two characters and dropped
        assert_eq!(keywords, vec!["tôi", "muốn", "huế", "hải", "sản"]);
    }

    #[test]
    fn test_fallback_dedupes_repeated_tokens() {
        let set = fallback_keywords("biển biển Biển đảo");
        let keywords: Vec<&str> = set.iter().collect();
        assert_eq!(keywords, vec!["biển", "đảo"]);
    }

    #[test]
    fn test_fallback_may_be_empty() {
        let set = fallback_keywords("đi ăn ở đó");
        assert!(set.is_empty());
    }

    #[test]
    fn test_parse_payload_plain_object() {
        let set = parse_keyword_payload(r#"{"keywords": ["Huế", "hải sản"]}"#).unwrap();
        let keywords: Vec<&str> = set.iter().collect();
        assert_eq!(keywords, vec!["huế", "hải sản"]);
    }

    #[test]
    fn test_parse_payload_embedded_in_prose() {
        let raw = "Sure! Here you go:\n```json\n{\"keywords\": [\"đà lạt\", \"hoa\"]}\n```";
        let set = parse_keyword_payload(raw).unwrap();
        assert_eq!(set.len(), 2);
    }

    #[test]
    fn test_parse_payload_nested_braces() {
        let raw = r#"{"meta": {"lang": "vi"}, "keywords": ["biển"]}"#;
        let set = parse_keyword_payload(raw).unwrap();
        let keywords: Vec<&str> = set.iter().collect();
        assert_eq!(keywords, vec!["biển"]);
    }

    #[test]
    fn test_parse_payload_rejects_unusable_output() {
        assert!(parse_keyword_payload("no json here").is_none());
        assert!(parse_keyword_payload("{broken").is_none());
        assert!(parse_keyword_payload(r#"{"keywords": []}"#).is_none());
        assert!(parse_keyword_payload(r#"{"other": ["x"]}"#).is_none());
    }
}
