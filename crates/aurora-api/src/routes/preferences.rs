//! Routes for user preferences.

use axum::extract::State;
use axum::routing::get;
use axum::{Json, Router};
use tracing::{info, instrument};

use aurora_core::preferences::{self, Preferences, PreferencesPatch};

use crate::error::ApiError;
use crate::state::AppState;

/// GET /
async fn get_preferences(State(state): State<AppState>) -> Result<Json<Preferences>, ApiError> {
    Ok(Json(preferences::load(state.store.as_ref()).await?))
}

/// PUT /
#[instrument(skip(state))]
async fn update_preferences(
    State(state): State<AppState>,
    Json(patch): Json<PreferencesPatch>,
) -> Result<Json<Preferences>, ApiError> {
    let updated = preferences::update(state.store.as_ref(), patch).await?;
    info!(
        muted = updated.muted,
        narration_enabled = updated.narration_enabled,
        "preferences updated"
    );
    Ok(Json(updated))
}

/// Returns the router for the preferences context.
pub fn router() -> Router<AppState> {
    Router::new().route("/", get(get_preferences).put(update_preferences))
}
