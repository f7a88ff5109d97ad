//! Routes for the Entity Catalog.

use axum::extract::{Path, State};
use axum::{Json, Router, routing::get};
use tracing::instrument;

use aurora_catalog::application::query_handlers::{
    self, EntityDetailView, EntitySummaryView,
};

use crate::error::ApiError;
use crate::state::AppState;

/// GET /
async fn list_entities(State(state): State<AppState>) -> Json<Vec<EntitySummaryView>> {
    Json(query_handlers::list_entities(&state.catalog))
}

/// GET /{slug}
#[instrument(skip(state))]
async fn get_entity(
    State(state): State<AppState>,
    Path(slug): Path<String>,
) -> Result<Json<EntityDetailView>, ApiError> {
    Ok(Json(query_handlers::get_entity_by_slug(&state.catalog, &slug)?))
}

/// Returns the router for the catalog context.
pub fn router() -> Router<AppState> {
    Router::new()
        .route("/", get(list_entities))
        .route("/{slug}", get(get_entity))
}
