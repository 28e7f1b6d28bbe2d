//! JSON recovery from chat-completion envelopes.
//!
//! Providers disagree on where the generated text lives inside the response
//! envelope, so payload location is an explicit ordered strategy list: the
//! first usable hit wins and nothing is merged across strategies. The text
//! itself may wrap the JSON in prose or markdown fences; recovery prefers
//! the first complete fenced block and otherwise parses the whole text.
//! There is no brace-hunting beyond that: a reply that buries JSON in
//! prose without fences fails loud, with the candidate preserved.

use std::sync::LazyLock;

use regex::Regex;
use serde_json::Value;
use thiserror::Error;
use tracing::debug;

/// JSON recovery from the located payload failed. Carries the parser's own
/// message and the exact candidate text that refused to parse.
#[derive(Debug, Error)]
#[error("Parsing error: {message}")]
pub struct ExtractionError {
    pub message: String,
    pub candidate: String,
}

/// Payload-location strategies, most specific first.
const PAYLOAD_STRATEGIES: &[(&str, fn(&Value) -> Option<&Value>)] = &[
    ("choices[0].message.content", first_choice_message_content),
    ("choices[0].text", first_choice_text),
    ("content", top_level_content),
    ("result", top_level_result),
];

fn first_choice_message_content(envelope: &Value) -> Option<&Value> {
    envelope.get("choices")?.get(0)?.get("message")?.get("content")
}

fn first_choice_text(envelope: &Value) -> Option<&Value> {
    envelope.get("choices")?.get(0)?.get("text")
}

fn top_level_content(envelope: &Value) -> Option<&Value> {
    envelope.get("content")
}

fn top_level_result(envelope: &Value) -> Option<&Value> {
    envelope.get("result")
}

/// First complete fenced code block anywhere in the text. The fence tag may
/// be `json` in any casing or absent entirely.
static FENCE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?is)```(?:json)?\s*(.*?)```").expect("fence pattern is valid")
});

/// Recovers a JSON value from a chat-completion envelope.
///
/// A payload that is already structured JSON is returned unchanged; a text
/// payload goes through fence-aware parsing. No schema is imposed on the
/// result; callers that need typed data validate separately.
pub fn recover_json(envelope: &Value) -> Result<Value, ExtractionError> {
    match locate_payload(envelope) {
        Some(payload) => match payload.as_str() {
            Some(text) => parse_text(text),
            None => Ok(payload.clone()),
        },
        // No strategy matched: run the empty text through the same error
        // path so the caller sees a parse failure, not a silent null.
        None => parse_text(""),
    }
}

/// Walks the strategy list in order and returns the first usable payload.
/// `null` and blank strings count as no match, letting later strategies run.
fn locate_payload(envelope: &Value) -> Option<&Value> {
    for &(name, locate) in PAYLOAD_STRATEGIES {
        match locate(envelope) {
            None | Some(Value::Null) => continue,
            Some(payload) => {
                if payload.as_str().is_some_and(|text| text.trim().is_empty()) {
                    continue;
                }
                debug!(strategy = name, "located completion payload");
                return Some(payload);
            }
        }
    }
    None
}

/// Parses `text` as JSON, preferring the inner content of the first complete
/// markdown fence when one is present.
fn parse_text(text: &str) -> Result<Value, ExtractionError> {
    let candidate = match FENCE.captures(text).and_then(|caps| caps.get(1)) {
        Some(inner) => inner.as_str(),
        None => text,
    }
    .trim();

    serde_json::from_str(candidate).map_err(|error| ExtractionError {
        message: error.to_string(),
        candidate: candidate.to_string(),
    })
}
