//! Gemini `generateContent` client implementing `ContentGenerator`.

use std::time::Duration;

use async_trait::async_trait;
use aurora_core::error::GatewayError;
use aurora_core::gateway::{ContentGenerator, GenerationRequest};
use aurora_core::variant::StyleVariant;
use serde::Serialize;
use tracing::{debug, instrument};

use crate::decode;

/// Default public endpoint.
pub const DEFAULT_BASE_URL: &str = "https://generativelanguage.googleapis.com/v1beta";

/// Default model.
pub const DEFAULT_MODEL: &str = "gemini-1.5-flash";

/// Settings for [`GeminiClient`].
#[derive(Debug, Clone)]
pub struct GeminiConfig {
    /// API key; a missing key fails each call with `Configuration`.
    pub api_key: Option<String>,
    /// Model name, e.g. `gemini-1.5-flash`.
    pub model: String,
    /// Base URL without trailing slash.
    pub base_url: String,
    /// Number of steps requested per tour.
    pub step_count: usize,
    /// Request timeout.
    pub timeout: Duration,
}

impl Default for GeminiConfig {
    fn default() -> Self {
        Self {
            api_key: None,
            model: DEFAULT_MODEL.to_owned(),
            base_url: DEFAULT_BASE_URL.to_owned(),
            step_count: 6,
            timeout: Duration::from_secs(30),
        }
    }
}

#[derive(Debug, Serialize)]
struct GenerateContentRequest {
    contents: Vec<Content>,
}

#[derive(Debug, Serialize)]
struct Content {
    parts: Vec<TextPart>,
}

#[derive(Debug, Serialize)]
struct TextPart {
    text: String,
}

/// Gemini API client.
#[derive(Debug, Clone)]
pub struct GeminiClient {
    http: reqwest::Client,
    config: GeminiConfig,
}

fn style_guidance(style: StyleVariant) -> &'static str {
    match style {
        StyleVariant::Explorer => {
            "Write as an explorer arriving on the scene: vivid, first-person, sense of discovery."
        }
        StyleVariant::Scientist => {
            "Write as a planetary scientist: precise numbers, how and why things work."
        }
        StyleVariant::Storyteller => {
            "Write as a storyteller: history of discovery, names, and small stories."
        }
    }
}

impl GeminiClient {
    /// Creates a new client.
    ///
    /// # Errors
    ///
    /// Returns `GatewayError::Configuration` if the HTTP client cannot be
    /// built.
    pub fn new(config: GeminiConfig) -> Result<Self, GatewayError> {
        Ok(Self {
            http: crate::http_client(config.timeout)?,
            config,
        })
    }

    /// Builds the prompt for one request.
    #[must_use]
    pub fn build_prompt(&self, request: &GenerationRequest) -> String {
        format!(
            "Return STRICT JSON only: {{\"steps\":[\"...\"]}}.\n\
             Create {count} short tour steps (at most 28 words each) about \"{slug}\" \
             for a space encyclopedia. Keep them factual and kid-friendly; avoid hype.\n\
             Style: {style}. {guidance}\n\
             Context:\n{context}",
            count = self.config.step_count,
            slug = request.slug,
            style = request.style,
            guidance = style_guidance(request.style),
            context = request.context,
        )
    }
}

#[async_trait]
impl ContentGenerator for GeminiClient {
    #[instrument(skip(self, request), fields(slug = %request.slug, style = %request.style))]
    async fn generate_steps(
        &self,
        request: &GenerationRequest,
    ) -> Result<Vec<String>, GatewayError> {
        let key = crate::require_key(self.config.api_key.as_deref(), "GEMINI_API_KEY")?;
        let url = format!(
            "{}/models/{}:generateContent",
            self.config.base_url, self.config.model
        );
        let body = GenerateContentRequest {
            contents: vec![Content {
                parts: vec![TextPart {
                    text: self.build_prompt(request),
                }],
            }],
        };

        let response = self
            .http
            .post(&url)
            .query(&[("key", key)])
            .json(&body)
            .send()
            .await
            .map_err(|e| crate::network(&e))?;
        if !response.status().is_success() {
            return Err(crate::status_error(response).await);
        }
        let bytes = response.bytes().await.map_err(|e| crate::network(&e))?;

        let steps = decode::decode_steps(&decode::candidate_text(&bytes)?)?;
        debug!(count = steps.len(), "generated tour steps");
        Ok(steps)
    }
}
