//! Routes for the Tour Controller.

use axum::extract::{Path, State};
use axum::http::{HeaderValue, StatusCode, header};
use axum::response::{IntoResponse, Response};
use axum::routing::{get, post};
use axum::{Json, Router};
use serde::{Deserialize, Serialize};
use tracing::{info, instrument};
use uuid::Uuid;

use aurora_core::command::Command as _;
use aurora_core::variant::StyleVariant;
use aurora_core::view::ViewCommand;
use aurora_tour::application::command_handlers;
use aurora_tour::application::query_handlers::{self, TourView};
use aurora_tour::domain::commands;

use crate::error::ApiError;
use crate::orchestration::{self, TourNextOutcome};
use crate::state::AppState;

/// Header carrying the step a narration clip belongs to.
pub const STEP_INDEX_HEADER: &str = "x-step-index";

/// Request body for POST / (entity selected).
#[derive(Debug, Deserialize)]
pub struct MountTourRequest {
    /// The selected entity.
    pub slug: String,
}

/// Response body for a mounted tour.
#[derive(Debug, Serialize)]
pub struct MountTourResponse {
    /// Identifier of the new tour.
    pub tour_id: Uuid,
    /// Entity slug.
    pub slug: String,
    /// Style variant fixed for this mount.
    pub variant: StyleVariant,
    /// Commands that bring the entity into view.
    pub commands: Vec<ViewCommand>,
}

/// Request body for POST /{tour_id}/next.
#[derive(Debug, Default, Deserialize)]
pub struct TourNextRequest {
    /// Route to advance when this finishes the tour.
    #[serde(default)]
    pub route_id: Option<Uuid>,
}

/// Response body carrying view commands.
#[derive(Debug, Serialize)]
pub struct CommandsResponse {
    /// Commands for the front end, in order.
    pub commands: Vec<ViewCommand>,
}

/// POST /
#[instrument(skip(state, request), fields(slug = %request.slug))]
async fn mount_tour(
    State(state): State<AppState>,
    Json(request): Json<MountTourRequest>,
) -> Result<(StatusCode, Json<MountTourResponse>), ApiError> {
    let command = commands::MountTour {
        correlation_id: Uuid::new_v4(),
        slug: request.slug,
    };

    info!(
        correlation_id = %command.correlation_id,
        event = command.event_name(),
        "handling mount_tour command"
    );

    let mounted = command_handlers::handle_mount_tour(
        &command,
        &state.catalog,
        &state.tour_services(),
        &state.tours,
    )
    .await?;

    Ok((
        StatusCode::CREATED,
        Json(MountTourResponse {
            tour_id: mounted.tour_id,
            slug: mounted.slug,
            variant: mounted.variant,
            commands: mounted.commands,
        }),
    ))
}

/// GET /{tour_id}
async fn get_tour(
    State(state): State<AppState>,
    Path(tour_id): Path<Uuid>,
) -> Result<Json<TourView>, ApiError> {
    Ok(Json(query_handlers::get_tour_by_id(tour_id, &state.tours).await?))
}

/// POST /{tour_id}/start
#[instrument(skip(state))]
async fn start_tour(
    State(state): State<AppState>,
    Path(tour_id): Path<Uuid>,
) -> Result<Json<CommandsResponse>, ApiError> {
    let command = commands::StartTour {
        correlation_id: Uuid::new_v4(),
        tour_id,
    };

    info!(
        correlation_id = %command.correlation_id,
        event = command.event_name(),
        "handling start_tour command"
    );

    let overlay = command_handlers::handle_start_tour(&command, &state.tours).await?;

    Ok(Json(CommandsResponse {
        commands: vec![overlay],
    }))
}

/// POST /{tour_id}/next
///
/// The body is optional; without one no route is advanced.
#[instrument(skip(state, request))]
async fn next_step(
    State(state): State<AppState>,
    Path(tour_id): Path<Uuid>,
    request: Option<Json<TourNextRequest>>,
) -> Result<Json<TourNextOutcome>, ApiError> {
    let Json(request) = request.unwrap_or_default();
    let command = commands::AdvanceTour {
        correlation_id: Uuid::new_v4(),
        tour_id,
    };

    info!(
        correlation_id = %command.correlation_id,
        event = command.event_name(),
        route_id = ?request.route_id,
        "handling advance_tour command"
    );

    Ok(Json(
        orchestration::tour_next(&state, &command, request.route_id).await?,
    ))
}

/// POST /{tour_id}/close
#[instrument(skip(state))]
async fn close_tour(
    State(state): State<AppState>,
    Path(tour_id): Path<Uuid>,
) -> Result<Json<CommandsResponse>, ApiError> {
    let command = commands::CloseTour {
        correlation_id: Uuid::new_v4(),
        tour_id,
    };

    info!(
        correlation_id = %command.correlation_id,
        event = command.event_name(),
        "handling close_tour command"
    );

    let hide = command_handlers::handle_close_tour(&command, &state.tours).await?;

    Ok(Json(CommandsResponse {
        commands: vec![hide],
    }))
}

/// DELETE /{tour_id}
#[instrument(skip(state))]
async fn unmount_tour(
    State(state): State<AppState>,
    Path(tour_id): Path<Uuid>,
) -> Result<StatusCode, ApiError> {
    let command = commands::UnmountTour {
        correlation_id: Uuid::new_v4(),
        tour_id,
    };

    info!(
        correlation_id = %command.correlation_id,
        event = command.event_name(),
        "handling unmount_tour command"
    );

    command_handlers::handle_unmount_tour(&command, &state.tours)?;

    Ok(StatusCode::NO_CONTENT)
}

/// GET /{tour_id}/narration
///
/// The latest narration clip as raw audio, or 204 when none has arrived.
async fn get_narration(
    State(state): State<AppState>,
    Path(tour_id): Path<Uuid>,
) -> Result<Response, ApiError> {
    let Some((step_index, clip)) =
        query_handlers::get_latest_narration(tour_id, &state.tours).await?
    else {
        return Ok(StatusCode::NO_CONTENT.into_response());
    };

    let content_type = HeaderValue::from_str(&clip.content_type)
        .unwrap_or_else(|_| HeaderValue::from_static("application/octet-stream"));
    Ok((
        [
            (header::CONTENT_TYPE, content_type),
            (
                header::HeaderName::from_static(STEP_INDEX_HEADER),
                HeaderValue::from(step_index),
            ),
        ],
        clip.bytes,
    )
        .into_response())
}

/// Returns the router for the tour context.
pub fn router() -> Router<AppState> {
    Router::new()
        .route("/", post(mount_tour))
        .route("/{tour_id}", get(get_tour).delete(unmount_tour))
        .route("/{tour_id}/start", post(start_tour))
        .route("/{tour_id}/next", post(next_step))
        .route("/{tour_id}/close", post(close_tour))
        .route("/{tour_id}/narration", get(get_narration))
}
