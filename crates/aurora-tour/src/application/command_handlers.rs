//! Command handlers for the Tour Controller.
//!
//! Each handler locks the targeted tour and drives its controller. Mounted
//! tours live in a [`TourRegistry`] until unmounted or evicted as idle.

use std::sync::Arc;

use aurora_catalog::domain::catalog::Catalog;
use aurora_core::error::DomainError;
use aurora_core::registry::SessionRegistry;
use aurora_core::variant::StyleVariant;
use aurora_core::view::ViewCommand;
use uuid::Uuid;

use crate::application::controller::{TourController, TourServices};
use crate::application::narration::LatestClip;
use crate::domain::commands::{AdvanceTour, CloseTour, MountTour, StartTour, UnmountTour};

/// A mounted tour and the sink its narration plays into.
#[derive(Debug)]
pub struct TourPanel {
    /// The tour's controller.
    pub controller: TourController,
    /// Latest narration clip for the panel.
    pub clips: Arc<LatestClip>,
}

/// Mounted tours by identifier.
pub type TourRegistry = SessionRegistry<TourPanel>;

/// Result of mounting a tour.
#[derive(Debug, Clone)]
pub struct MountedTour {
    /// Identifier of the new tour.
    pub tour_id: Uuid,
    /// Entity slug.
    pub slug: String,
    /// Style variant fixed for this mount.
    pub variant: StyleVariant,
    /// Commands that bring the entity into view.
    pub commands: Vec<ViewCommand>,
}

/// Result of pressing "Next" on the overlay.
#[derive(Debug, Clone, PartialEq)]
pub enum AdvanceOutcome {
    /// A step is shown.
    Step(ViewCommand),
    /// The last step was acknowledged and the overlay hidden.
    Finished,
}

/// Handles the `MountTour` command: resolves the entity and mounts a
/// controller for it.
///
/// # Errors
///
/// Returns `DomainError::EntityNotFound` if the slug is not in the catalog,
/// or the store's error if the visit counter cannot be read.
pub async fn handle_mount_tour(
    command: &MountTour,
    catalog: &Catalog,
    services: &TourServices,
    registry: &TourRegistry,
) -> Result<MountedTour, DomainError> {
    let entity = catalog.require(&command.slug)?;
    let clips = Arc::new(LatestClip::new());
    let controller = TourController::mount(entity, services.clone(), clips.clone()).await?;
    let variant = controller.session().variant();
    let tour_id = registry.insert(TourPanel { controller, clips });
    Ok(MountedTour {
        tour_id,
        slug: entity.slug.clone(),
        variant,
        commands: ViewCommand::visit(&entity.slug),
    })
}

/// Handles the `StartTour` command.
///
/// The tour is only locked to prepare the start and to finish it. Loading
/// or generating the steps runs in between, so a close or a view of the
/// same tour is not held up by the gateway. If the tour is closed meanwhile
/// the steps are still loaded and cached, but the overlay stays hidden.
///
/// # Errors
///
/// Returns `DomainError::SessionNotFound` for an unknown tour, or the
/// controller's error if the steps cannot be loaded.
pub async fn handle_start_tour(
    command: &StartTour,
    registry: &TourRegistry,
) -> Result<ViewCommand, DomainError> {
    let panel = registry.get(command.tour_id)?;
    let pending = panel.lock().await.controller.prepare_start();
    let steps = pending.run().await?;
    let shown = panel.lock().await.controller.finish_start(&pending, steps)?;
    Ok(shown.map_or(ViewCommand::HideTourOverlay, |step| step.overlay()))
}

/// Handles the `AdvanceTour` command. On the last step this acts as
/// "Finish" and hides the overlay.
///
/// # Errors
///
/// Returns `DomainError::SessionNotFound` for an unknown tour, or
/// `DomainError::Validation` if the tour has no steps yet.
pub async fn handle_advance_tour(
    command: &AdvanceTour,
    registry: &TourRegistry,
) -> Result<AdvanceOutcome, DomainError> {
    let panel = registry.get(command.tour_id)?;
    let mut panel = panel.lock().await;
    let controller = &mut panel.controller;
    if controller.session().is_on_last_step() {
        controller.reset();
        return Ok(AdvanceOutcome::Finished);
    }
    let step = controller
        .next()
        .ok_or_else(|| DomainError::Validation("tour has not been started".into()))?;
    Ok(AdvanceOutcome::Step(step.overlay()))
}

/// Handles the `CloseTour` command.
///
/// # Errors
///
/// Returns `DomainError::SessionNotFound` for an unknown tour.
pub async fn handle_close_tour(
    command: &CloseTour,
    registry: &TourRegistry,
) -> Result<ViewCommand, DomainError> {
    let panel = registry.get(command.tour_id)?;
    panel.lock().await.controller.reset();
    Ok(ViewCommand::HideTourOverlay)
}

/// Handles the `UnmountTour` command: drops the tour. Narration already in
/// flight finishes on its own.
///
/// # Errors
///
/// Returns `DomainError::SessionNotFound` for an unknown tour.
pub fn handle_unmount_tour(
    command: &UnmountTour,
    registry: &TourRegistry,
) -> Result<(), DomainError> {
    registry
        .remove(command.tour_id)
        .map(|_| ())
        .ok_or(DomainError::SessionNotFound(command.tour_id))
}

#[cfg(test)]
mod tests {
    use std::sync::Arc;
    use std::time::Duration;

    use aurora_core::error::DomainError;
    use aurora_core::keys;
    use aurora_core::variant::StyleVariant;
    use aurora_core::view::ViewCommand;
    use aurora_test_support::{
        GatedGenerator, InMemoryStore, RecordingNarrator, ScriptedGenerator, solar_system,
    };
    use uuid::Uuid;

    use super::*;

    fn services(generator: ScriptedGenerator) -> TourServices {
        TourServices {
            store: Arc::new(InMemoryStore::new()),
            generator: Arc::new(generator),
            narrator: Arc::new(RecordingNarrator::new()),
        }
    }

    async fn mount(slug: &str, services: &TourServices, registry: &TourRegistry) -> Uuid {
        let command = MountTour {
            correlation_id: Uuid::new_v4(),
            slug: slug.to_owned(),
        };
        handle_mount_tour(&command, &solar_system(), services, registry)
            .await
            .unwrap()
            .tour_id
    }

    #[tokio::test]
    async fn test_handle_mount_tour_registers_tour_and_focuses_entity() {
        // Arrange
        let registry = TourRegistry::new();
        let services = services(ScriptedGenerator::numbered(3));
        let command = MountTour {
            correlation_id: Uuid::new_v4(),
            slug: "mars".to_owned(),
        };

        // Act
        let mounted = handle_mount_tour(&command, &solar_system(), &services, &registry)
            .await
            .unwrap();

        // Assert
        assert_eq!(registry.len(), 1);
        assert_eq!(mounted.slug, "mars");
        assert_eq!(mounted.variant, StyleVariant::Explorer);
        assert_eq!(mounted.commands, ViewCommand::visit("mars"));
    }

    #[tokio::test]
    async fn test_handle_mount_tour_rejects_unknown_slug() {
        // Arrange
        let registry = TourRegistry::new();
        let command = MountTour {
            correlation_id: Uuid::new_v4(),
            slug: "vulcan".to_owned(),
        };

        // Act
        let result = handle_mount_tour(
            &command,
            &solar_system(),
            &services(ScriptedGenerator::numbered(1)),
            &registry,
        )
        .await;

        // Assert
        match result {
            Err(DomainError::EntityNotFound(slug)) => assert_eq!(slug, "vulcan"),
            other => panic!("expected EntityNotFound, got {other:?}"),
        }
        assert!(registry.is_empty());
    }

    #[tokio::test]
    async fn test_start_then_next_through_finish() {
        // Arrange
        let registry = TourRegistry::new();
        let services = services(ScriptedGenerator::numbered(2));
        let tour_id = mount("earth", &services, &registry).await;
        let correlation_id = Uuid::new_v4();

        // Act
        let shown = handle_start_tour(&StartTour { correlation_id, tour_id }, &registry)
            .await
            .unwrap();
        let second = handle_advance_tour(&AdvanceTour { correlation_id, tour_id }, &registry)
            .await
            .unwrap();
        let finished = handle_advance_tour(&AdvanceTour { correlation_id, tour_id }, &registry)
            .await
            .unwrap();

        // Assert
        assert_eq!(
            shown,
            ViewCommand::ShowTourOverlay {
                step_index: 0,
                total_steps: 2,
                text: "fact 1".to_owned(),
            }
        );
        assert_eq!(
            second,
            AdvanceOutcome::Step(ViewCommand::ShowTourOverlay {
                step_index: 1,
                total_steps: 2,
                text: "fact 2".to_owned(),
            })
        );
        assert_eq!(finished, AdvanceOutcome::Finished);
        let panel = registry.get(tour_id).unwrap();
        assert_eq!(panel.lock().await.controller.session().active_step(), None);
    }

    #[tokio::test]
    async fn test_handle_advance_tour_before_start_is_validation_error() {
        // Arrange
        let registry = TourRegistry::new();
        let services = services(ScriptedGenerator::numbered(2));
        let tour_id = mount("venus", &services, &registry).await;

        // Act
        let result = handle_advance_tour(
            &AdvanceTour {
                correlation_id: Uuid::new_v4(),
                tour_id,
            },
            &registry,
        )
        .await;

        // Assert
        assert!(matches!(result, Err(DomainError::Validation(_))));
    }

    #[tokio::test]
    async fn test_handle_close_tour_hides_overlay() {
        // Arrange
        let registry = TourRegistry::new();
        let services = services(ScriptedGenerator::numbered(3));
        let tour_id = mount("saturn", &services, &registry).await;
        let correlation_id = Uuid::new_v4();
        handle_start_tour(&StartTour { correlation_id, tour_id }, &registry)
            .await
            .unwrap();

        // Act
        let command = handle_close_tour(&CloseTour { correlation_id, tour_id }, &registry)
            .await
            .unwrap();

        // Assert
        assert_eq!(command, ViewCommand::HideTourOverlay);
        let panel = registry.get(tour_id).unwrap();
        assert_eq!(panel.lock().await.controller.session().active_step(), None);
    }

    #[tokio::test]
    async fn test_handle_unmount_tour_removes_tour() {
        // Arrange
        let registry = TourRegistry::new();
        let services = services(ScriptedGenerator::numbered(1));
        let tour_id = mount("pluto", &services, &registry).await;
        let command = UnmountTour {
            correlation_id: Uuid::new_v4(),
            tour_id,
        };

        // Act
        handle_unmount_tour(&command, &registry).unwrap();
        let again = handle_unmount_tour(&command, &registry);

        // Assert
        assert!(registry.is_empty());
        assert!(matches!(again, Err(DomainError::SessionNotFound(id)) if id == tour_id));
    }

    #[tokio::test]
    async fn test_handlers_reject_unknown_tour() {
        // Arrange
        let registry = TourRegistry::new();
        let tour_id = Uuid::new_v4();

        // Act
        let result = handle_start_tour(
            &StartTour {
                correlation_id: Uuid::new_v4(),
                tour_id,
            },
            &registry,
        )
        .await;

        // Assert
        assert!(matches!(result, Err(DomainError::SessionNotFound(id)) if id == tour_id));
    }

    #[tokio::test]
    async fn test_close_completes_while_generation_is_pending() {
        // Arrange
        let store = Arc::new(InMemoryStore::new());
        let generator = Arc::new(GatedGenerator::new(ScriptedGenerator::numbered(3)));
        let services = TourServices {
            store: store.clone(),
            generator: generator.clone(),
            narrator: Arc::new(RecordingNarrator::new()),
        };
        let registry = Arc::new(TourRegistry::new());
        let tour_id = mount("jupiter", &services, &registry).await;
        let correlation_id = Uuid::new_v4();
        let start = tokio::spawn({
            let registry = Arc::clone(&registry);
            async move {
                let command = StartTour {
                    correlation_id,
                    tour_id,
                };
                handle_start_tour(&command, &registry).await
            }
        });
        generator.entered().await;

        // Act
        let closed = tokio::time::timeout(
            Duration::from_secs(5),
            handle_close_tour(&CloseTour { correlation_id, tour_id }, &registry),
        )
        .await
        .expect("close must not wait for generation")
        .unwrap();
        generator.release();
        let started = start.await.unwrap().unwrap();

        // Assert
        assert_eq!(closed, ViewCommand::HideTourOverlay);
        assert_eq!(started, ViewCommand::HideTourOverlay);
        let panel = registry.get(tour_id).unwrap();
        let panel = panel.lock().await;
        assert_eq!(panel.controller.session().active_step(), None);
        assert_eq!(panel.controller.session().steps().len(), 3);
        assert!(
            store
                .raw(&keys::tour_steps("jupiter", StyleVariant::Explorer))
                .is_some()
        );
        assert_eq!(generator.call_count(), 1);
    }

    #[tokio::test]
    async fn test_idle_tours_are_evicted_on_next_mount() {
        // Arrange
        let registry = TourRegistry::with_idle_timeout(Duration::from_millis(20));
        let services = services(ScriptedGenerator::numbered(1));
        let abandoned = mount("mars", &services, &registry).await;
        tokio::time::sleep(Duration::from_millis(50)).await;

        // Act
        let fresh = mount("venus", &services, &registry).await;

        // Assert
        assert_eq!(registry.len(), 1);
        assert!(matches!(
            registry.get(abandoned),
            Err(DomainError::SessionNotFound(id)) if id == abandoned
        ));
        assert!(registry.get(fresh).is_ok());
    }
}
