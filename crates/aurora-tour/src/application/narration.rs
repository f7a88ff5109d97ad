//! Fire-and-forget narration.
//!
//! Narration runs as a detached task: it can neither block nor fail the
//! tour. Its outcome is only logged.

use std::sync::{Arc, Mutex, PoisonError};

use aurora_core::gateway::{AudioClip, AudioSink, Narrator};
use aurora_core::preferences;
use aurora_core::store::KeyValueStore;
use tokio::task::JoinHandle;
use tracing::{Instrument, debug, debug_span};

/// Keeps the most recently delivered clip so the view can fetch and play
/// it.
#[derive(Debug, Default)]
pub struct LatestClip {
    latest: Mutex<Option<(usize, AudioClip)>>,
}

impl LatestClip {
    /// Creates an empty sink.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// The last clip delivered and the step it narrates.
    #[must_use]
    pub fn latest(&self) -> Option<(usize, AudioClip)> {
        self.latest
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .clone()
    }
}

impl AudioSink for LatestClip {
    fn play(&self, step_index: usize, clip: AudioClip) {
        *self.latest.lock().unwrap_or_else(PoisonError::into_inner) = Some((step_index, clip));
    }
}

/// Spawns the narration of one step. Skipped when narration is disabled;
/// gateway failures are logged at debug level and dropped.
pub fn spawn_narration(
    store: Arc<dyn KeyValueStore>,
    narrator: Arc<dyn Narrator>,
    sink: Arc<dyn AudioSink>,
    slug: &str,
    step_index: usize,
    text: String,
) -> JoinHandle<()> {
    let span = debug_span!("narration", slug, step = step_index);
    tokio::spawn(
        async move {
            match preferences::narration_enabled(store.as_ref()).await {
                Ok(true) => {}
                Ok(false) => {
                    debug!("narration disabled");
                    return;
                }
                Err(e) => {
                    debug!(error = %e, "narration preference unavailable, skipping");
                    return;
                }
            }
            match narrator.speak(&text).await {
                Ok(clip) => sink.play(step_index, clip),
                Err(e) => debug!(error = %e, "narration failed"),
            }
        }
        .instrument(span),
    )
}
