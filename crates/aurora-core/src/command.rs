//! Commands built from view-facing events.

use uuid::Uuid;

/// A view-facing event (tour-start, route-next, ...) translated into a
/// command for one of the controllers.
pub trait Command: Send + Sync + std::fmt::Debug {
    /// The view event this command was built from, e.g. `"tour-start"`
    /// (for logging).
    fn event_name(&self) -> &'static str;

    /// Correlation ID to trace this command through the system.
    fn correlation_id(&self) -> Uuid;
}
