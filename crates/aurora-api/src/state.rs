//! Shared application state.

use std::sync::Arc;
use std::time::Duration;

use aurora_catalog::domain::catalog::Catalog;
use aurora_core::gateway::{ContentGenerator, Narrator};
use aurora_core::store::KeyValueStore;
use aurora_route::application::command_handlers::RouteRegistry;
use aurora_tour::application::command_handlers::TourRegistry;
use aurora_tour::application::controller::TourServices;

/// Application state shared across all request handlers.
#[derive(Clone)]
pub struct AppState {
    /// The entity catalog, loaded once at startup.
    pub catalog: Arc<Catalog>,
    /// Persistent key-value store.
    pub store: Arc<dyn KeyValueStore>,
    /// Content generation gateway.
    pub generator: Arc<dyn ContentGenerator>,
    /// Narration gateway.
    pub narrator: Arc<dyn Narrator>,
    /// Mounted tours.
    pub tours: Arc<TourRegistry>,
    /// Route navigators.
    pub routes: Arc<RouteRegistry>,
}

impl AppState {
    /// Create new application state with no mounted tours or routes.
    #[must_use]
    pub fn new(
        catalog: Catalog,
        store: Arc<dyn KeyValueStore>,
        generator: Arc<dyn ContentGenerator>,
        narrator: Arc<dyn Narrator>,
    ) -> Self {
        Self {
            catalog: Arc::new(catalog),
            store,
            generator,
            narrator,
            tours: Arc::new(TourRegistry::new()),
            routes: Arc::new(RouteRegistry::new()),
        }
    }

    /// Replaces the tour and route registries with empty ones that evict
    /// sessions idle for longer than `timeout`.
    #[must_use]
    pub fn with_session_idle_timeout(mut self, timeout: Duration) -> Self {
        self.tours = Arc::new(TourRegistry::with_idle_timeout(timeout));
        self.routes = Arc::new(RouteRegistry::with_idle_timeout(timeout));
        self
    }

    /// The collaborators handed to every tour.
    #[must_use]
    pub fn tour_services(&self) -> TourServices {
        TourServices {
            store: Arc::clone(&self.store),
            generator: Arc::clone(&self.generator),
            narrator: Arc::clone(&self.narrator),
        }
    }
}
