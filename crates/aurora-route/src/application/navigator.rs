//! The Route Controller.

use aurora_core::error::DomainError;
use tracing::debug;

use crate::domain::aggregates::Route;

/// Route mode for one client: either inactive or following a [`Route`].
#[derive(Debug, Default)]
pub struct RouteNavigator {
    route: Option<Route>,
}

impl RouteNavigator {
    /// Creates an inactive navigator.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Whether a route is being followed.
    #[must_use]
    pub fn is_active(&self) -> bool {
        self.route.is_some()
    }

    /// The route being followed.
    #[must_use]
    pub fn route(&self) -> Option<&Route> {
        self.route.as_ref()
    }

    /// Plans and activates a route, replacing any current one.
    ///
    /// # Errors
    ///
    /// Returns `DomainError::EntityNotFound` if either slug is not available.
    /// The navigator is left unchanged in that case.
    pub fn start(&mut self, from: &str, to: &str, available: &[String]) -> Result<(), DomainError> {
        let route = Route::plan(from, to, available)?;
        debug!(from, to, stops = route.stops().len(), "route started");
        self.route = Some(route);
        Ok(())
    }

    /// The current stop, `None` while inactive.
    #[must_use]
    pub fn current(&self) -> Option<&str> {
        self.route.as_ref().map(Route::current)
    }

    /// Moves to the next stop, clamped to the last one, and returns the
    /// current stop.
    #[allow(clippy::should_implement_trait)]
    pub fn next(&mut self) -> Option<&str> {
        let route = self.route.as_mut()?;
        route.advance();
        Some(route.current())
    }

    /// Moves to the previous stop, clamped to the first one, and returns the
    /// current stop.
    pub fn prev(&mut self) -> Option<&str> {
        let route = self.route.as_mut()?;
        route.retreat();
        Some(route.current())
    }

    /// Whether the current stop is the last one. Always `false` while
    /// inactive.
    #[must_use]
    pub fn at_end(&self) -> bool {
        self.route.as_ref().is_some_and(Route::at_end)
    }

    /// Replans from the current stop to `new_to`.
    ///
    /// # Errors
    ///
    /// Returns `DomainError::Validation` while inactive and
    /// `DomainError::EntityNotFound` if `new_to` is not available.
    pub fn reroute(&mut self, new_to: &str, available: &[String]) -> Result<(), DomainError> {
        let route = self
            .route
            .as_mut()
            .ok_or_else(|| DomainError::Validation("no active route to reroute".into()))?;
        route.reroute(new_to, available)?;
        debug!(from = route.from(), to = new_to, "route rerouted");
        Ok(())
    }

    /// Leaves route mode.
    pub fn leave(&mut self) {
        if self.route.take().is_some() {
            debug!("route left");
        }
    }
}
