//! Test narrators — `Narrator` implementations for tests.

use std::sync::Mutex;

use async_trait::async_trait;
use aurora_core::error::GatewayError;
use aurora_core::gateway::{AudioClip, Narrator};

/// A narrator that records every text and returns it back as the clip's
/// bytes.
#[derive(Debug, Default)]
pub struct RecordingNarrator {
    spoken: Mutex<Vec<String>>,
}

impl RecordingNarrator {
    /// Create a new recording narrator.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns the texts spoken so far, in call order.
    ///
    /// # Panics
    ///
    /// Panics if the internal mutex is poisoned.
    #[must_use]
    pub fn spoken(&self) -> Vec<String> {
        self.spoken.lock().unwrap().clone()
    }
}

#[async_trait]
impl Narrator for RecordingNarrator {
    async fn speak(&self, text: &str) -> Result<AudioClip, GatewayError> {
        self.spoken.lock().unwrap().push(text.to_owned());
        Ok(AudioClip {
            content_type: "audio/mpeg".to_owned(),
            bytes: text.as_bytes().to_vec(),
        })
    }
}

/// A narrator that counts attempts and always fails, like an offline or
/// rate-limited speech service.
#[derive(Debug, Default)]
pub struct FailingNarrator {
    attempts: Mutex<usize>,
}

impl FailingNarrator {
    /// Create a new failing narrator.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns the number of `speak` calls made.
    ///
    /// # Panics
    ///
    /// Panics if the internal mutex is poisoned.
    #[must_use]
    pub fn attempts(&self) -> usize {
        *self.attempts.lock().unwrap()
    }
}

#[async_trait]
impl Narrator for FailingNarrator {
    async fn speak(&self, _text: &str) -> Result<AudioClip, GatewayError> {
        *self.attempts.lock().unwrap() += 1;
        Err(GatewayError::Status {
            status: 429,
            body: "rate limited".into(),
        })
    }
}
