//! Command handlers for the Route Controller.

use aurora_catalog::domain::catalog::Catalog;
use aurora_core::error::DomainError;
use aurora_core::registry::SessionRegistry;
use aurora_core::view::ViewCommand;
use serde::Serialize;
use uuid::Uuid;

use crate::application::navigator::RouteNavigator;
use crate::domain::commands::{AdvanceRoute, LeaveRoute, RetreatRoute, Reroute, StartRoute};

/// Route navigators by identifier.
pub type RouteRegistry = SessionRegistry<RouteNavigator>;

/// Position on a route after a command, with the commands that show the
/// current stop.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct RouteStop {
    /// The route.
    pub route_id: Uuid,
    /// All stops, in visiting order.
    pub stops: Vec<String>,
    /// Index of the current stop.
    pub cursor: usize,
    /// The current stop.
    pub current: String,
    /// Whether the current stop is the last one.
    pub at_end: bool,
    /// Commands that bring the current stop into view.
    pub commands: Vec<ViewCommand>,
}

fn stop_of(route_id: Uuid, navigator: &RouteNavigator) -> Result<RouteStop, DomainError> {
    let route = navigator
        .route()
        .ok_or_else(|| DomainError::Validation("route is not active".into()))?;
    Ok(RouteStop {
        route_id,
        stops: route.stops().to_vec(),
        cursor: route.cursor(),
        current: route.current().to_owned(),
        at_end: route.at_end(),
        commands: ViewCommand::visit(route.current()),
    })
}

/// Handles the `StartRoute` command: plans a route over the catalog order
/// and registers a navigator for it.
///
/// # Errors
///
/// Returns `DomainError::EntityNotFound` if either endpoint is not in the
/// catalog.
pub fn handle_start_route(
    command: &StartRoute,
    catalog: &Catalog,
    registry: &RouteRegistry,
) -> Result<RouteStop, DomainError> {
    let mut navigator = RouteNavigator::new();
    navigator.start(&command.from, &command.to, &catalog.slugs())?;
    let stop = stop_of(Uuid::nil(), &navigator)?;
    let route_id = registry.insert(navigator);
    Ok(RouteStop { route_id, ..stop })
}

/// Handles the `AdvanceRoute` command.
///
/// # Errors
///
/// Returns `DomainError::SessionNotFound` for an unknown route and
/// `DomainError::Validation` if the route has been left.
pub async fn handle_advance_route(
    command: &AdvanceRoute,
    registry: &RouteRegistry,
) -> Result<RouteStop, DomainError> {
    let navigator = registry.get(command.route_id)?;
    let mut navigator = navigator.lock().await;
    navigator.next();
    stop_of(command.route_id, &navigator)
}

/// Handles the `RetreatRoute` command.
///
/// # Errors
///
/// Returns `DomainError::SessionNotFound` for an unknown route and
/// `DomainError::Validation` if the route has been left.
pub async fn handle_retreat_route(
    command: &RetreatRoute,
    registry: &RouteRegistry,
) -> Result<RouteStop, DomainError> {
    let navigator = registry.get(command.route_id)?;
    let mut navigator = navigator.lock().await;
    navigator.prev();
    stop_of(command.route_id, &navigator)
}

/// Handles the `Reroute` command.
///
/// # Errors
///
/// Returns `DomainError::SessionNotFound` for an unknown route,
/// `DomainError::Validation` if the route has been left, and
/// `DomainError::EntityNotFound` if the destination is not in the catalog.
pub async fn handle_reroute(
    command: &Reroute,
    catalog: &Catalog,
    registry: &RouteRegistry,
) -> Result<RouteStop, DomainError> {
    let navigator = registry.get(command.route_id)?;
    let mut navigator = navigator.lock().await;
    navigator.reroute(&command.to, &catalog.slugs())?;
    stop_of(command.route_id, &navigator)
}

/// Handles the `LeaveRoute` command: leaves route mode and drops the
/// navigator.
///
/// # Errors
///
/// Returns `DomainError::SessionNotFound` for an unknown route.
pub async fn handle_leave_route(
    command: &LeaveRoute,
    registry: &RouteRegistry,
) -> Result<(), DomainError> {
    let navigator = registry
        .remove(command.route_id)
        .ok_or(DomainError::SessionNotFound(command.route_id))?;
    navigator.lock().await.leave();
    Ok(())
}
