//! Ports for the external text-generation and text-to-speech services.

use async_trait::async_trait;
use serde::Serialize;

use crate::error::GatewayError;
use crate::variant::StyleVariant;

/// Request sent to the content generation gateway.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct GenerationRequest {
    /// Slug of the entity the tour is about.
    pub slug: String,
    /// Context text, the entity's primary section.
    pub context: String,
    /// Narrative style for this visit.
    pub style: StyleVariant,
}

/// Produces an ordered list of short tour steps for an entity.
#[async_trait]
pub trait ContentGenerator: Send + Sync {
    /// Generates tour steps. The result is non-empty on success.
    async fn generate_steps(&self, request: &GenerationRequest)
    -> Result<Vec<String>, GatewayError>;
}

/// A playable audio resource returned by the narration gateway.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AudioClip {
    /// MIME type, e.g. `audio/mpeg`.
    pub content_type: String,
    /// Encoded audio.
    pub bytes: Vec<u8>,
}

/// Turns text into speech.
#[async_trait]
pub trait Narrator: Send + Sync {
    /// Synthesizes `text` into an audio clip.
    async fn speak(&self, text: &str) -> Result<AudioClip, GatewayError>;
}

/// Receives narration clips for playback.
pub trait AudioSink: Send + Sync {
    /// Called from the detached narration task once the clip for
    /// `step_index` is ready.
    fn play(&self, step_index: usize, clip: AudioClip);
}
