//! ElevenLabs text-to-speech client implementing `Narrator`.

use std::time::Duration;

use async_trait::async_trait;
use aurora_core::error::GatewayError;
use aurora_core::gateway::{AudioClip, Narrator};
use reqwest::header::{ACCEPT, CONTENT_TYPE};
use serde::Serialize;
use tracing::{debug, instrument};

/// Default public endpoint.
pub const DEFAULT_BASE_URL: &str = "https://api.elevenlabs.io/v1";

/// Default public sample voice.
pub const DEFAULT_VOICE_ID: &str = "EXAVITQu4vr4xnSDxMaL";

const MODEL_ID: &str = "eleven_multilingual_v2";
const AUDIO_MPEG: &str = "audio/mpeg";

/// Settings for [`ElevenLabsClient`].
#[derive(Debug, Clone)]
pub struct ElevenLabsConfig {
    /// API key; a missing key fails each call with `Configuration`.
    pub api_key: Option<String>,
    /// Voice to synthesize with.
    pub voice_id: String,
    /// Base URL without trailing slash.
    pub base_url: String,
    /// Request timeout.
    pub timeout: Duration,
}

impl Default for ElevenLabsConfig {
    fn default() -> Self {
        Self {
            api_key: None,
            voice_id: DEFAULT_VOICE_ID.to_owned(),
            base_url: DEFAULT_BASE_URL.to_owned(),
            timeout: Duration::from_secs(30),
        }
    }
}

#[derive(Debug, Serialize)]
struct SpeechRequest<'a> {
    text: &'a str,
    model_id: &'static str,
    voice_settings: VoiceSettings,
}

#[derive(Debug, Serialize)]
struct VoiceSettings {
    stability: f32,
    similarity_boost: f32,
}

/// ElevenLabs API client.
#[derive(Debug, Clone)]
pub struct ElevenLabsClient {
    http: reqwest::Client,
    config: ElevenLabsConfig,
}

impl ElevenLabsClient {
    /// Creates a new client.
    ///
    /// # Errors
    ///
    /// Returns `GatewayError::Configuration` if the HTTP client cannot be
    /// built.
    pub fn new(config: ElevenLabsConfig) -> Result<Self, GatewayError> {
        Ok(Self {
            http: crate::http_client(config.timeout)?,
            config,
        })
    }
}

#[async_trait]
impl Narrator for ElevenLabsClient {
    #[instrument(skip(self, text), fields(chars = text.len()))]
    async fn speak(&self, text: &str) -> Result<AudioClip, GatewayError> {
        let key = crate::require_key(self.config.api_key.as_deref(), "ELEVENLABS_API_KEY")?;
        let url = format!(
            "{}/text-to-speech/{}",
            self.config.base_url, self.config.voice_id
        );
        let body = SpeechRequest {
            text,
            model_id: MODEL_ID,
            voice_settings: VoiceSettings {
                stability: 0.5,
                similarity_boost: 0.7,
            },
        };

        let response = self
            .http
            .post(&url)
            .header("xi-api-key", key)
            .header(ACCEPT, AUDIO_MPEG)
            .json(&body)
            .send()
            .await
            .map_err(|e| crate::network(&e))?;
        if !response.status().is_success() {
            return Err(crate::status_error(response).await);
        }

        let content_type = response
            .headers()
            .get(CONTENT_TYPE)
            .and_then(|v| v.to_str().ok())
            .unwrap_or(AUDIO_MPEG)
            .to_owned();
        let bytes = response.bytes().await.map_err(|e| crate::network(&e))?;
        debug!(bytes = bytes.len(), "synthesized narration");

        Ok(AudioClip {
            content_type,
            bytes: bytes.to_vec(),
        })
    }
}
