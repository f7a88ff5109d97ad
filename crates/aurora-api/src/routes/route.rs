//! Routes for the Route Controller.

use axum::extract::{Path, State};
use axum::http::StatusCode;
use axum::routing::{get, post};
use axum::{Json, Router};
use serde::Deserialize;
use tracing::{info, instrument};
use uuid::Uuid;

use aurora_core::command::Command as _;
use aurora_route::application::command_handlers::{self, RouteStop};
use aurora_route::application::query_handlers::{self, RouteView};
use aurora_route::domain::commands;

use crate::error::ApiError;
use crate::state::AppState;

/// Request body for POST / (route start).
#[derive(Debug, Deserialize)]
pub struct StartRouteRequest {
    /// First stop.
    pub from: String,
    /// Destination.
    pub to: String,
}

/// Request body for POST /{route_id}/reroute.
#[derive(Debug, Deserialize)]
pub struct RerouteRequest {
    /// New destination.
    pub to: String,
}

/// POST /
#[instrument(skip(state, request), fields(from = %request.from, to = %request.to))]
async fn start_route(
    State(state): State<AppState>,
    Json(request): Json<StartRouteRequest>,
) -> Result<(StatusCode, Json<RouteStop>), ApiError> {
    let command = commands::StartRoute {
        correlation_id: Uuid::new_v4(),
        from: request.from,
        to: request.to,
    };

    info!(
        correlation_id = %command.correlation_id,
        event = command.event_name(),
        "handling start_route command"
    );

    let stop = command_handlers::handle_start_route(&command, &state.catalog, &state.routes)?;

    Ok((StatusCode::CREATED, Json(stop)))
}

/// GET /{route_id}
async fn get_route(
    State(state): State<AppState>,
    Path(route_id): Path<Uuid>,
) -> Result<Json<RouteView>, ApiError> {
    Ok(Json(
        query_handlers::get_route_by_id(route_id, &state.routes).await?,
    ))
}

/// POST /{route_id}/next
#[instrument(skip(state))]
async fn next_stop(
    State(state): State<AppState>,
    Path(route_id): Path<Uuid>,
) -> Result<Json<RouteStop>, ApiError> {
    let command = commands::AdvanceRoute {
        correlation_id: Uuid::new_v4(),
        route_id,
    };

    info!(
        correlation_id = %command.correlation_id,
        event = command.event_name(),
        "handling advance_route command"
    );

    Ok(Json(
        command_handlers::handle_advance_route(&command, &state.routes).await?,
    ))
}

/// POST /{route_id}/prev
#[instrument(skip(state))]
async fn previous_stop(
    State(state): State<AppState>,
    Path(route_id): Path<Uuid>,
) -> Result<Json<RouteStop>, ApiError> {
    let command = commands::RetreatRoute {
        correlation_id: Uuid::new_v4(),
        route_id,
    };

    info!(
        correlation_id = %command.correlation_id,
        event = command.event_name(),
        "handling retreat_route command"
    );

    Ok(Json(
        command_handlers::handle_retreat_route(&command, &state.routes).await?,
    ))
}

/// POST /{route_id}/reroute
#[instrument(skip(state, request), fields(to = %request.to))]
async fn reroute(
    State(state): State<AppState>,
    Path(route_id): Path<Uuid>,
    Json(request): Json<RerouteRequest>,
) -> Result<Json<RouteStop>, ApiError> {
    let command = commands::Reroute {
        correlation_id: Uuid::new_v4(),
        route_id,
        to: request.to,
    };

    info!(
        correlation_id = %command.correlation_id,
        event = command.event_name(),
        "handling reroute command"
    );

    Ok(Json(
        command_handlers::handle_reroute(&command, &state.catalog, &state.routes).await?,
    ))
}

/// DELETE /{route_id}
#[instrument(skip(state))]
async fn leave_route(
    State(state): State<AppState>,
    Path(route_id): Path<Uuid>,
) -> Result<StatusCode, ApiError> {
    let command = commands::LeaveRoute {
        correlation_id: Uuid::new_v4(),
        route_id,
    };

    info!(
        correlation_id = %command.correlation_id,
        event = command.event_name(),
        "handling leave_route command"
    );

    command_handlers::handle_leave_route(&command, &state.routes).await?;

    Ok(StatusCode::NO_CONTENT)
}

/// Returns the router for the route context.
pub fn router() -> Router<AppState> {
    Router::new()
        .route("/", post(start_route))
        .route("/{route_id}", get(get_route).delete(leave_route))
        .route("/{route_id}/next", post(next_stop))
        .route("/{route_id}/prev", post(previous_stop))
        .route("/{route_id}/reroute", post(reroute))
}
