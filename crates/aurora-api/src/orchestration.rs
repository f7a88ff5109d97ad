//! Tour → route hand-off.
//!
//! Finishing a tour while following a route opens the next stop. A route
//! that has no stop left is left and dropped from the registry. Neither
//! controller knows about the other; the coupling lives here.

use aurora_core::error::DomainError;
use aurora_core::view::ViewCommand;
use aurora_tour::application::command_handlers::{self, AdvanceOutcome};
use aurora_tour::domain::commands::AdvanceTour;
use serde::Serialize;
use tracing::info;
use uuid::Uuid;

use crate::state::AppState;

/// Outcome of a tour-next event.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct TourNextOutcome {
    /// The tour's last step was acknowledged.
    pub finished: bool,
    /// Commands for the front end, in order.
    pub commands: Vec<ViewCommand>,
    /// The route stop opened by the hand-off, if any.
    pub next_stop: Option<String>,
}

/// Handles a tour-next event, advancing `route_id` when it finishes the
/// tour.
///
/// On finish the overlay is hidden. A named route that is active and not at
/// its end moves to its next stop, which is brought into view; a route at
/// its end is left and removed from the registry.
///
/// # Errors
///
/// Returns `DomainError::SessionNotFound` for an unknown tour or route.
/// The tour is not touched when the route is unknown.
pub async fn tour_next(
    state: &AppState,
    command: &AdvanceTour,
    route_id: Option<Uuid>,
) -> Result<TourNextOutcome, DomainError> {
    let route = route_id
        .map(|id| state.routes.get(id).map(|navigator| (id, navigator)))
        .transpose()?;

    match command_handlers::handle_advance_tour(command, &state.tours).await? {
        AdvanceOutcome::Step(step) => {
            return Ok(TourNextOutcome {
                finished: false,
                commands: vec![step],
                next_stop: None,
            });
        }
        AdvanceOutcome::Finished => {}
    }

    let mut result = TourNextOutcome {
        finished: true,
        commands: vec![ViewCommand::HideTourOverlay],
        next_stop: None,
    };
    let Some((route_id, navigator)) = route else {
        return Ok(result);
    };

    let mut navigator = navigator.lock().await;
    if navigator.is_active() && !navigator.at_end() {
        if let Some(stop) = navigator.next() {
            info!(
                correlation_id = %command.correlation_id,
                stop,
                "tour finished, opening next route stop"
            );
            result.commands.extend(ViewCommand::visit(stop));
            result.next_stop = Some(stop.to_owned());
        }
        return Ok(result);
    }

    navigator.leave();
    drop(navigator);
    state.routes.remove(route_id);
    info!(correlation_id = %command.correlation_id, %route_id, "route finished");
    Ok(result)
}

#[cfg(test)]
mod tests {
    use std::time::Duration;

    use aurora_core::view::ViewCommand;
    use aurora_route::application::navigator::RouteNavigator;
    use aurora_test_support::ScriptedGenerator;
    use aurora_tour::application::command_handlers::{handle_mount_tour, handle_start_tour};
    use aurora_tour::domain::commands::{MountTour, StartTour};

    use super::*;
    use crate::state::testing::Fakes;

    async fn started_tour(state: &AppState, slug: &str) -> Uuid {
        let mounted = handle_mount_tour(
            &MountTour {
                correlation_id: Uuid::new_v4(),
                slug: slug.to_owned(),
            },
            &state.catalog,
            &state.tour_services(),
            &state.tours,
        )
        .await
        .unwrap();
        handle_start_tour(
            &StartTour {
                correlation_id: Uuid::new_v4(),
                tour_id: mounted.tour_id,
            },
            &state.tours,
        )
        .await
        .unwrap();
        mounted.tour_id
    }

    fn route(state: &AppState, from: &str, to: &str) -> Uuid {
        let mut navigator = RouteNavigator::new();
        navigator
            .start(from, to, &state.catalog.slugs())
            .unwrap();
        state.routes.insert(navigator)
    }

    fn next(tour_id: Uuid) -> AdvanceTour {
        AdvanceTour {
            correlation_id: Uuid::new_v4(),
            tour_id,
        }
    }

    #[tokio::test]
    async fn test_next_mid_tour_shows_step_and_leaves_route_alone() {
        // Arrange
        let fakes = Fakes::new(ScriptedGenerator::numbered(2));
        let tour_id = started_tour(&fakes.state, "earth").await;
        let route_id = route(&fakes.state, "earth", "jupiter");

        // Act
        let outcome = tour_next(&fakes.state, &next(tour_id), Some(route_id))
            .await
            .unwrap();

        // Assert
        assert!(!outcome.finished);
        assert_eq!(
            outcome.commands,
            vec![ViewCommand::ShowTourOverlay {
                step_index: 1,
                total_steps: 2,
                text: "fact 2".to_owned(),
            }]
        );
        let navigator = fakes.state.routes.get(route_id).unwrap();
        assert_eq!(navigator.lock().await.current(), Some("earth"));
    }

    #[tokio::test]
    async fn test_finish_with_active_route_opens_next_stop() {
        // Arrange
        let fakes = Fakes::new(ScriptedGenerator::numbered(1));
        let tour_id = started_tour(&fakes.state, "earth").await;
        let route_id = route(&fakes.state, "earth", "jupiter");

        // Act
        let outcome = tour_next(&fakes.state, &next(tour_id), Some(route_id))
            .await
            .unwrap();

        // Assert
        assert!(outcome.finished);
        assert_eq!(outcome.next_stop.as_deref(), Some("mars"));
        let mut expected = vec![ViewCommand::HideTourOverlay];
        expected.extend(ViewCommand::visit("mars"));
        assert_eq!(outcome.commands, expected);
    }

    #[tokio::test]
    async fn test_finish_at_route_end_leaves_and_drops_route() {
        // Arrange
        let fakes = Fakes::new(ScriptedGenerator::numbered(1));
        let tour_id = started_tour(&fakes.state, "mars").await;
        let route_id = route(&fakes.state, "mars", "mars");

        // Act
        let outcome = tour_next(&fakes.state, &next(tour_id), Some(route_id))
            .await
            .unwrap();

        // Assert
        assert!(outcome.finished);
        assert_eq!(outcome.commands, vec![ViewCommand::HideTourOverlay]);
        assert_eq!(outcome.next_stop, None);
        assert!(matches!(
            fakes.state.routes.get(route_id),
            Err(DomainError::SessionNotFound(id)) if id == route_id
        ));
        assert!(fakes.state.routes.is_empty());
    }

    #[tokio::test]
    async fn test_finish_without_route_only_hides_overlay() {
        // Arrange
        let fakes = Fakes::new(ScriptedGenerator::numbered(1));
        let tour_id = started_tour(&fakes.state, "venus").await;

        // Act
        let outcome = tour_next(&fakes.state, &next(tour_id), None).await.unwrap();

        // Assert
        assert!(outcome.finished);
        assert_eq!(outcome.commands, vec![ViewCommand::HideTourOverlay]);
    }

    #[tokio::test]
    async fn test_unknown_route_leaves_tour_untouched() {
        // Arrange
        let fakes = Fakes::new(ScriptedGenerator::numbered(1));
        let tour_id = started_tour(&fakes.state, "venus").await;

        // Act
        let result = tour_next(&fakes.state, &next(tour_id), Some(Uuid::new_v4())).await;

        // Assert
        assert!(matches!(result, Err(DomainError::SessionNotFound(_))));
        let panel = fakes.state.tours.get(tour_id).unwrap();
        assert_eq!(panel.lock().await.controller.session().active_step(), Some(0));
    }

    #[tokio::test]
    async fn test_abandoned_tours_and_routes_are_evicted() {
        // Arrange
        let state = Fakes::new(ScriptedGenerator::numbered(1))
            .state
            .with_session_idle_timeout(Duration::from_millis(20));
        let abandoned_tour = started_tour(&state, "earth").await;
        let abandoned_route = route(&state, "earth", "jupiter");
        tokio::time::sleep(Duration::from_millis(50)).await;

        // Act
        let tour_id = started_tour(&state, "venus").await;
        let route_id = route(&state, "venus", "mars");

        // Assert
        assert_eq!(state.tours.len(), 1);
        assert_eq!(state.routes.len(), 1);
        assert!(state.tours.get(abandoned_tour).is_err());
        assert!(state.routes.get(abandoned_route).is_err());
        assert!(state.tours.get(tour_id).is_ok());
        assert!(state.routes.get(route_id).is_ok());
    }
}
