//! Strict decoding of gateway responses.
//!
//! The generation service answers with a `generateContent` envelope whose
//! first candidate carries a text part. That text must be a JSON object
//! `{"steps": [string, ...]}`, optionally wrapped in a Markdown code fence.

use aurora_core::error::GatewayError;
use serde::Deserialize;

#[derive(Debug, Deserialize)]
struct GenerateContentResponse {
    #[serde(default)]
    candidates: Vec<Candidate>,
}

#[derive(Debug, Deserialize)]
struct Candidate {
    content: Option<CandidateContent>,
}

#[derive(Debug, Deserialize)]
struct CandidateContent {
    #[serde(default)]
    parts: Vec<Part>,
}

#[derive(Debug, Deserialize)]
struct Part {
    text: Option<String>,
}

#[derive(Debug, Deserialize)]
struct StepsPayload {
    steps: Vec<String>,
}

/// Extracts the first candidate's first text part from a `generateContent`
/// response body.
///
/// # Errors
///
/// Returns `GatewayError::Format` if the body is not a response envelope or
/// carries no text.
pub fn candidate_text(body: &[u8]) -> Result<String, GatewayError> {
    let response: GenerateContentResponse = serde_json::from_slice(body)
        .map_err(|e| GatewayError::Format(format!("invalid response envelope: {e}")))?;
    response
        .candidates
        .into_iter()
        .next()
        .and_then(|c| c.content)
        .and_then(|c| c.parts.into_iter().next())
        .and_then(|p| p.text)
        .map(|t| t.trim().to_owned())
        .filter(|t| !t.is_empty())
        .ok_or_else(|| GatewayError::Format("response has no candidate text".into()))
}

/// Removes Markdown code fences (```` ```json ```` and ```` ``` ````).
#[must_use]
pub fn strip_code_fences(text: &str) -> String {
    text.replace("```json", "").replace("```", "").trim().to_owned()
}

/// Decodes the tour steps carried in a candidate text.
///
/// # Errors
///
/// Returns `GatewayError::Format` if the text is not an object with a
/// `steps` array of strings, or if that array is empty.
pub fn decode_steps(text: &str) -> Result<Vec<String>, GatewayError> {
    let payload: StepsPayload = serde_json::from_str(&strip_code_fences(text))
        .map_err(|e| GatewayError::Format(format!("expected {{\"steps\": [string]}}: {e}")))?;
    let steps: Vec<String> = payload
        .steps
        .into_iter()
        .map(|s| s.trim().to_owned())
        .filter(|s| !s.is_empty())
        .collect();
    if steps.is_empty() {
        return Err(GatewayError::Format("steps array is empty".into()));
    }
    Ok(steps)
}
