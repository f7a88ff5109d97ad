//! Query handlers for the Route Controller.

use aurora_core::error::DomainError;
use serde::Serialize;
use uuid::Uuid;

use crate::application::command_handlers::RouteRegistry;

/// Read-only view of a route navigator.
#[derive(Debug, Serialize)]
pub struct RouteView {
    /// The route identifier.
    pub route_id: Uuid,
    /// Whether route mode is on.
    pub active: bool,
    /// Where the current itinerary starts.
    pub from: Option<String>,
    /// Destination.
    pub to: Option<String>,
    /// All stops, empty while inactive.
    pub stops: Vec<String>,
    /// Index of the current stop.
    pub cursor: Option<usize>,
    /// The current stop.
    pub current: Option<String>,
    /// Whether the current stop is the last one.
    pub at_end: bool,
}

/// Retrieves a route navigator.
///
/// # Errors
///
/// Returns `DomainError::SessionNotFound` if the route is not registered.
pub async fn get_route_by_id(
    route_id: Uuid,
    registry: &RouteRegistry,
) -> Result<RouteView, DomainError> {
    let navigator = registry.get(route_id)?;
    let navigator = navigator.lock().await;
    let route = navigator.route();
    Ok(RouteView {
        route_id,
        active: navigator.is_active(),
        from: route.map(|r| r.from().to_owned()),
        to: route.map(|r| r.to().to_owned()),
        stops: route.map(|r| r.stops().to_vec()).unwrap_or_default(),
        cursor: route.map(|r| r.cursor()),
        current: navigator.current().map(str::to_owned),
        at_end: navigator.at_end(),
    })
}

#[cfg(test)]
mod tests {
    use aurora_core::error::DomainError;
    use uuid::Uuid;

    use super::*;
    use crate::application::navigator::RouteNavigator;

    fn slugs() -> Vec<String> {
        ["earth", "mars", "jupiter"]
            .into_iter()
            .map(String::from)
            .collect()
    }

    #[tokio::test]
    async fn test_get_route_by_id_returns_active_route() {
        // Arrange
        let registry = RouteRegistry::new();
        let mut navigator = RouteNavigator::new();
        navigator.start("earth", "jupiter", &slugs()).unwrap();
        navigator.next();
        let route_id = registry.insert(navigator);

        // Act
        let view = get_route_by_id(route_id, &registry).await.unwrap();

        // Assert
        assert!(view.active);
        assert_eq!(view.from.as_deref(), Some("earth"));
        assert_eq!(view.to.as_deref(), Some("jupiter"));
        assert_eq!(view.stops, slugs());
        assert_eq!(view.cursor, Some(1));
        assert_eq!(view.current.as_deref(), Some("mars"));
        assert!(!view.at_end);
    }

    #[tokio::test]
    async fn test_get_route_by_id_reports_left_route_as_inactive() {
        // Arrange
        let registry = RouteRegistry::new();
        let route_id = registry.insert(RouteNavigator::new());

        // Act
        let view = get_route_by_id(route_id, &registry).await.unwrap();

        // Assert
        assert!(!view.active);
        assert!(view.stops.is_empty());
        assert_eq!(view.current, None);
    }

    #[tokio::test]
    async fn test_get_route_by_id_returns_not_found_for_unknown_route() {
        // Arrange
        let registry = RouteRegistry::new();
        let route_id = Uuid::new_v4();

        // Act
        let result = get_route_by_id(route_id, &registry).await;

        // Assert
        assert!(matches!(result, Err(DomainError::SessionNotFound(id)) if id == route_id));
    }
}
