//! Aurora — HTTP API.
//!
//! Translates view-facing events into commands for the Tour and Route
//! Controllers and returns the view commands the front end should apply.

pub mod config;
pub mod error;
pub mod orchestration;
pub mod routes;
pub mod state;
pub mod telemetry;

use axum::Router;

use crate::state::AppState;

/// Builds the application router with every context mounted.
pub fn app(state: AppState) -> Router {
    Router::new()
        .merge(routes::health::router())
        .nest("/api/v1/entities", routes::entities::router())
        .nest("/api/v1/tours", routes::tours::router())
        .nest("/api/v1/routes", routes::route::router())
        .nest("/api/v1/preferences", routes::preferences::router())
        .with_state(state)
}
