//! Query handlers for the Tour Controller.

use aurora_core::error::DomainError;
use aurora_core::gateway::AudioClip;
use aurora_core::variant::StyleVariant;
use serde::Serialize;
use uuid::Uuid;

use crate::application::command_handlers::TourRegistry;

/// Read-only view of a mounted tour.
#[derive(Debug, Serialize)]
pub struct TourView {
    /// The tour identifier.
    pub tour_id: Uuid,
    /// Entity slug.
    pub slug: String,
    /// Style variant fixed for this mount.
    pub variant: StyleVariant,
    /// Loaded steps; empty until the tour is generated.
    pub steps: Vec<String>,
    /// Step shown in the overlay, `None` while hidden.
    pub active_step: Option<usize>,
    /// Number of loaded steps.
    pub total_steps: usize,
}

/// Retrieves a mounted tour.
///
/// # Errors
///
/// Returns `DomainError::SessionNotFound` if the tour is not mounted.
pub async fn get_tour_by_id(
    tour_id: Uuid,
    registry: &TourRegistry,
) -> Result<TourView, DomainError> {
    let panel = registry.get(tour_id)?;
    let panel = panel.lock().await;
    let session = panel.controller.session();
    Ok(TourView {
        tour_id,
        slug: session.slug().to_owned(),
        variant: session.variant(),
        steps: session.steps().to_vec(),
        active_step: session.active_step(),
        total_steps: session.steps().len(),
    })
}

/// The most recent narration clip of a tour and the step it narrates.
///
/// # Errors
///
/// Returns `DomainError::SessionNotFound` if the tour is not mounted.
pub async fn get_latest_narration(
    tour_id: Uuid,
    registry: &TourRegistry,
) -> Result<Option<(usize, AudioClip)>, DomainError> {
    let panel = registry.get(tour_id)?;
    let clips = panel.lock().await.clips.clone();
    Ok(clips.latest())
}

#[cfg(test)]
mod tests {
    use std::sync::Arc;

    use aurora_core::error::DomainError;
    use aurora_core::variant::StyleVariant;
    use aurora_test_support::{InMemoryStore, RecordingNarrator, ScriptedGenerator, solar_system};
    use uuid::Uuid;

    use super::*;
    use crate::application::command_handlers::{handle_mount_tour, handle_start_tour};
    use crate::application::controller::TourServices;
    use crate::domain::commands::{MountTour, StartTour};

    #[tokio::test]
    async fn test_get_tour_by_id_reflects_started_tour_and_narration() {
        // Arrange
        let registry = TourRegistry::new();
        let services = TourServices {
            store: Arc::new(InMemoryStore::new()),
            generator: Arc::new(ScriptedGenerator::numbered(3)),
            narrator: Arc::new(RecordingNarrator::new()),
        };
        let mounted = handle_mount_tour(
            &MountTour {
                correlation_id: Uuid::new_v4(),
                slug: "neptune".to_owned(),
            },
            &solar_system(),
            &services,
            &registry,
        )
        .await
        .unwrap();
        let tour_id = mounted.tour_id;
        handle_start_tour(
            &StartTour {
                correlation_id: Uuid::new_v4(),
                tour_id,
            },
            &registry,
        )
        .await
        .unwrap();
        registry
            .get(tour_id)
            .unwrap()
            .lock()
            .await
            .controller
            .settle_narration()
            .await;

        // Act
        let view = get_tour_by_id(tour_id, &registry).await.unwrap();
        let clip = get_latest_narration(tour_id, &registry).await.unwrap();

        // Assert
        assert_eq!(view.slug, "neptune");
        assert_eq!(view.variant, StyleVariant::Explorer);
        assert_eq!(view.steps, vec!["fact 1", "fact 2", "fact 3"]);
        assert_eq!(view.active_step, Some(0));
        assert_eq!(view.total_steps, 3);
        let (step, clip) = clip.unwrap();
        assert_eq!(step, 0);
        assert_eq!(clip.bytes, b"fact 1".to_vec());
    }

    #[tokio::test]
    async fn test_get_tour_by_id_returns_not_found_for_unknown_tour() {
        // Arrange
        let registry = TourRegistry::new();
        let tour_id = Uuid::new_v4();

        // Act
        let result = get_tour_by_id(tour_id, &registry).await;

        // Assert
        match result {
            Err(DomainError::SessionNotFound(id)) => assert_eq!(id, tour_id),
            other => panic!("expected SessionNotFound, got {other:?}"),
        }
    }
}
