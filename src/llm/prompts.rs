// ABOUTME: Fixed prompt text for the travel assistant persona and degraded replies
// ABOUTME: Keeps every hardcoded LLM-facing string in one place
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 ViaTour

//! Prompt constants for the recommendation pipeline

/// System prompt establishing the travel-assistant persona
const TRAVEL_SYSTEM_PROMPT: &str = "\
You are ViaTour's travel consultant. You help travellers pick tours from the \
catalog excerpts provided in the conversation. Recommend only tours that \
appear in the provided shortlist, mention them by name, and keep replies \
warm and concise. Answer in the language the traveller writes in.";

/// Reply substituted when the generation service fails
///
/// Generation failures are recoverable by contract: the user still gets an
/// answer and both turns are persisted.
const GENERATION_FALLBACK_REPLY: &str = "\
Xin lỗi, hiện tại mình chưa thể tư vấn chi tiết được. Bạn vui lòng thử lại \
sau ít phút nhé! (Sorry, I can't give detailed advice right now - please try \
again in a few minutes.)";

/// Get the fixed system prompt for reply generation
#[must_use]
pub const fn get_travel_system_prompt() -> &'static str {
    TRAVEL_SYSTEM_PROMPT
}

/// Get the fixed apology reply used when generation fails
#[must_use]
pub const fn fallback_reply() -> &'static str {
    GENERATION_FALLBACK_REPLY
}
