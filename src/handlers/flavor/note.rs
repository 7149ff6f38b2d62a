use axum::{extract::State, response::Response};

use super::FlavorRef;
use crate::middleware::{respond, Validated};
use crate::state::AppState;

/// GET /api/flavor/:flavorId/notes - user notes on a flavor, with the flavor and each author's profile
pub async fn list(State(state): State<AppState>, Validated(path): Validated<FlavorRef>) -> Response {
    respond("flavor note list", state.store.flavor_notes(path.flavor_id).await)
}
