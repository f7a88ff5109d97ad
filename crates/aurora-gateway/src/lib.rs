//! Aurora — external gateway clients.
//!
//! `GeminiClient` implements the `ContentGenerator` port and
//! `ElevenLabsClient` implements the `Narrator` port. Responses are decoded
//! strictly in [`decode`]; nothing past that boundary sees untyped JSON.

pub mod decode;
pub mod elevenlabs;
pub mod gemini;

use std::time::Duration;

use aurora_core::error::GatewayError;

/// Longest response body kept in a `GatewayError::Status`.
const MAX_ERROR_BODY: usize = 512;

pub(crate) fn http_client(timeout: Duration) -> Result<reqwest::Client, GatewayError> {
    reqwest::Client::builder()
        .timeout(timeout)
        .build()
        .map_err(|e| GatewayError::Configuration(format!("http client: {e}")))
}

pub(crate) fn network(e: &reqwest::Error) -> GatewayError {
    GatewayError::Network(e.to_string())
}

/// Converts a non-success response into `GatewayError::Status`.
pub(crate) async fn status_error(response: reqwest::Response) -> GatewayError {
    let status = response.status().as_u16();
    let mut body = response.text().await.unwrap_or_default();
    if body.len() > MAX_ERROR_BODY {
        let mut cut = MAX_ERROR_BODY;
        while !body.is_char_boundary(cut) {
            cut -= 1;
        }
        body.truncate(cut);
    }
    GatewayError::Status { status, body }
}

/// Returns the key if it is present and non-blank.
pub(crate) fn require_key<'a>(
    key: Option<&'a str>,
    variable: &str,
) -> Result<&'a str, GatewayError> {
    key.map(str::trim)
        .filter(|k| !k.is_empty())
        .ok_or_else(|| GatewayError::Configuration(format!("missing {variable}")))
}
