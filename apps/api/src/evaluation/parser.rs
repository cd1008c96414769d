//! Response Parser: turns the model's raw text into a typed result, or a tagged fallback.
//!
//! Parsing never fails loudly. Each evaluator decides what a `Fallback` means for its
//! caller: the job-posting evaluator substitutes a zero score, the candidate scorer
//! reports an error.

use serde::de::DeserializeOwned;

#[derive(Debug, Clone, PartialEq)]
pub struct ParseFailure {
    pub reason: String,
    /// The untouched model output, kept for logging.
    pub raw: String,
}

#[derive(Debug, Clone, PartialEq)]
pub enum ParseOutcome<T> {
    Parsed(T),
    Fallback(ParseFailure),
}

impl<T> ParseOutcome<T> {
    pub fn into_result(self) -> Result<T, ParseFailure> {
        match self {
            ParseOutcome::Parsed(value) => Ok(value),
            ParseOutcome::Fallback(failure) => Err(failure),
        }
    }
}

/// Parses the completion text as JSON into `T`.
///
/// Markdown code fences around the object are tolerated; anything else that is not
/// a JSON document matching `T` becomes a `Fallback`.
pub fn parse_completion<T: DeserializeOwned>(raw: &str) -> ParseOutcome<T> {
    let text = strip_json_fences(raw);
    if text.is_empty() {
        return ParseOutcome::Fallback(ParseFailure {
            reason: "empty completion".to_string(),
            raw: raw.to_string(),
        });
    }

    match serde_json::from_str::<T>(text) {
        Ok(value) => ParseOutcome::Parsed(value),
        Err(e) => ParseOutcome::Fallback(ParseFailure {
            reason: e.to_string(),
            raw: raw.to_string(),
        }),
    }
}

/// Strips ```json ... ``` or ``` ... ``` code fences from LLM output.
fn strip_json_fences(text: &str) -> &str {
    let text = text.trim();
    if let Some(stripped) = text.strip_prefix("```json") {
        stripped
            .trim_start()
            .strip_suffix("```")
            .map(|s| s.trim())
            .unwrap_or(stripped.trim_start())
    } else if let Some(stripped) = text.strip_prefix("```") {
        stripped
            .trim_start()
            .strip_suffix("```")
            .map(|s| s.trim())
            .unwrap_or(stripped.trim_start())
    } else {
        text
    }
}
