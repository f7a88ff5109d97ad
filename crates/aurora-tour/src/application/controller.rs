//! The Tour Controller.
//!
//! One controller per mounted entity panel. The style variant is read from
//! the visit counter once, at mount, and stays fixed for the mount; the
//! counter itself only moves on `start`, so the rotation shows from the
//! next visit on.
//!
//! Starting is split in two so the store and generator calls can run
//! without holding the panel: [`TourController::prepare_start`] hands out a
//! [`PendingStart`], which loads the steps on its own, and
//! [`TourController::finish_start`] shows step 0 unless the tour was closed
//! in the meantime.

use std::sync::Arc;

use aurora_catalog::domain::entity::Entity;
use aurora_core::error::{DomainError, GatewayError};
use aurora_core::gateway::{AudioSink, ContentGenerator, GenerationRequest, Narrator};
use aurora_core::keys;
use aurora_core::store::{self, KeyValueStore};
use aurora_core::variant::StyleVariant;
use tokio::task::JoinHandle;
use tracing::{debug, info, warn};

use crate::application::narration::spawn_narration;
use crate::domain::aggregates::{StepView, TourSession};
use crate::domain::ledger::merge_used_facts;

/// Collaborators shared by every tour.
#[derive(Clone)]
pub struct TourServices {
    /// Persistent key-value store.
    pub store: Arc<dyn KeyValueStore>,
    /// Content generation gateway.
    pub generator: Arc<dyn ContentGenerator>,
    /// Narration gateway.
    pub narrator: Arc<dyn Narrator>,
}

/// Drives the tour overlay of one entity panel.
pub struct TourController {
    session: TourSession,
    context: String,
    services: TourServices,
    sink: Arc<dyn AudioSink>,
    narrations: Vec<JoinHandle<()>>,
    /// Bumped by every `reset`, so a start that was pending across a close
    /// can tell.
    closes: u64,
}

impl std::fmt::Debug for TourController {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("TourController")
            .field("session", &self.session)
            .field("pending_narrations", &self.narrations.len())
            .finish_non_exhaustive()
    }
}

/// A start in progress, detached from its controller.
pub struct PendingStart {
    slug: String,
    variant: StyleVariant,
    context: String,
    services: TourServices,
    needs_steps: bool,
    closes: u64,
}

impl std::fmt::Debug for PendingStart {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("PendingStart")
            .field("slug", &self.slug)
            .field("variant", &self.variant)
            .field("needs_steps", &self.needs_steps)
            .finish_non_exhaustive()
    }
}

async fn visit_count(store: &dyn KeyValueStore, slug: &str) -> Result<u64, DomainError> {
    Ok(store::load(store, &keys::visits(slug)).await?.unwrap_or(0))
}

impl PendingStart {
    /// Counts the visit and, if the tour had no steps when the start began,
    /// fetches them.
    ///
    /// # Errors
    ///
    /// Returns `DomainError` if the visit counter cannot be updated or the
    /// steps cannot be loaded.
    pub async fn run(&self) -> Result<Option<Vec<String>>, DomainError> {
        let store = self.services.store.as_ref();
        let visits = visit_count(store, &self.slug).await? + 1;
        store::save(store, &keys::visits(&self.slug), &visits).await?;
        if self.needs_steps {
            self.fetch_steps().await.map(Some)
        } else {
            Ok(None)
        }
    }

    /// Reads the cached steps for this entity and variant, generating and
    /// caching them on a miss.
    async fn fetch_steps(&self) -> Result<Vec<String>, DomainError> {
        let store = self.services.store.as_ref();
        let slug = self.slug.as_str();
        let variant = self.variant;
        let cache_key = keys::tour_steps(slug, variant);

        let cached: Option<Vec<String>> = store::load(store, &cache_key).await?;
        if let Some(steps) = cached.filter(|s| !s.is_empty()) {
            debug!(%slug, %variant, "tour cache hit");
            return Ok(steps);
        }

        let request = GenerationRequest {
            slug: slug.to_owned(),
            context: self.context.clone(),
            style: variant,
        };
        let steps = self.services.generator.generate_steps(&request).await?;
        if steps.is_empty() {
            return Err(GatewayError::Format("steps array is empty".into()).into());
        }
        info!(%slug, %variant, count = steps.len(), "tour steps generated");

        store::save(store, &cache_key, &steps).await?;
        if let Err(e) = self.record_used_facts(&steps).await {
            warn!(%slug, error = %e, "failed to record used facts");
        }
        Ok(steps)
    }

    async fn record_used_facts(&self, steps: &[String]) -> Result<(), DomainError> {
        let store = self.services.store.as_ref();
        let ledger_key = keys::used_facts(&self.slug);
        let ledger: Vec<String> = store::load(store, &ledger_key).await?.unwrap_or_default();
        store::save(store, &ledger_key, &merge_used_facts(ledger, steps)).await
    }
}

impl TourController {
    /// Mounts a controller for `entity`, fixing the style variant from the
    /// current visit count.
    ///
    /// # Errors
    ///
    /// Returns `DomainError` if the visit counter cannot be read.
    pub async fn mount(
        entity: &Entity,
        services: TourServices,
        sink: Arc<dyn AudioSink>,
    ) -> Result<Self, DomainError> {
        let visits = visit_count(services.store.as_ref(), &entity.slug).await?;
        let variant = StyleVariant::for_visit_count(visits);
        debug!(slug = %entity.slug, visits, %variant, "tour mounted");
        Ok(Self {
            session: TourSession::new(entity.slug.clone(), variant),
            context: entity.primary_context().to_owned(),
            services,
            sink,
            narrations: Vec::new(),
            closes: 0,
        })
    }

    /// Read-only tour state.
    #[must_use]
    pub fn session(&self) -> &TourSession {
        &self.session
    }

    fn pending(&self, needs_steps: bool) -> PendingStart {
        PendingStart {
            slug: self.session.slug().to_owned(),
            variant: self.session.variant(),
            context: self.context.clone(),
            services: self.services.clone(),
            needs_steps,
            closes: self.closes,
        }
    }

    /// Loads the steps for this entity and variant, generating and caching
    /// them on a cache miss. Newly generated steps are also folded into the
    /// used-facts ledger; a failure to write the ledger is only logged.
    ///
    /// # Errors
    ///
    /// Returns `DomainError::Gateway` if generation fails or yields no
    /// steps; nothing is cached in that case. Returns the store's error if
    /// it fails.
    pub async fn ensure_generated(&mut self) -> Result<(), DomainError> {
        let steps = self.pending(true).fetch_steps().await?;
        self.session.load_steps(steps);
        Ok(())
    }

    /// Begins a start. Run the returned [`PendingStart`] without holding
    /// the controller, then hand its result to [`Self::finish_start`].
    #[must_use]
    pub fn prepare_start(&self) -> PendingStart {
        self.pending(!self.session.has_steps())
    }

    /// Completes a start: loads the fetched steps, then shows and narrates
    /// step 0. Returns `None`, leaving the overlay hidden, if the tour was
    /// closed while the start was pending. The steps are loaded either way.
    ///
    /// # Errors
    ///
    /// Returns `DomainError::Validation` if no steps are loaded.
    pub fn finish_start(
        &mut self,
        pending: &PendingStart,
        steps: Option<Vec<String>>,
    ) -> Result<Option<StepView>, DomainError> {
        if let Some(steps) = steps
            && !self.session.has_steps()
        {
            self.session.load_steps(steps);
        }
        if pending.closes != self.closes {
            debug!(slug = %self.session.slug(), "tour closed while starting");
            return Ok(None);
        }
        let step = self.session.begin()?;
        self.narrate(&step);
        Ok(Some(step))
    }

    /// Starts the tour: counts the visit, loads the steps if needed, shows
    /// step 0 and narrates it.
    ///
    /// # Errors
    ///
    /// Returns `DomainError` if the visit counter cannot be updated or the
    /// steps cannot be loaded. The overlay stays hidden in that case.
    pub async fn start(&mut self) -> Result<StepView, DomainError> {
        let pending = self.prepare_start();
        let steps = pending.run().await?;
        self.finish_start(&pending, steps)?
            .ok_or_else(|| DomainError::Validation("tour was closed while starting".into()))
    }

    /// Advances one step, clamped to the last step, and narrates the step
    /// now shown (again, when already on the last one). Returns `None` if no
    /// steps are loaded.
    ///
    /// Must be called from within a Tokio runtime.
    pub fn next(&mut self) -> Option<StepView> {
        let step = self.session.advance()?;
        self.narrate(&step);
        Some(step)
    }

    /// Hides the overlay. Loaded steps are kept for the next `start`.
    pub fn reset(&mut self) {
        self.session.reset();
        self.closes += 1;
    }

    /// Waits for every narration spawned so far.
    #[cfg(any(test, feature = "test-util"))]
    pub async fn settle_narration(&mut self) {
        for handle in self.narrations.drain(..) {
            if let Err(e) = handle.await {
                warn!(error = %e, "narration task aborted");
            }
        }
    }

    fn narrate(&mut self, step: &StepView) {
        self.narrations.retain(|h| !h.is_finished());
        self.narrations.push(spawn_narration(
            Arc::clone(&self.services.store),
            Arc::clone(&self.services.narrator),
            Arc::clone(&self.sink),
            self.session.slug(),
            step.index,
            step.text.clone(),
        ));
    }
}
