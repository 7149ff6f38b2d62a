use axum::{extract::State, response::Response};

use crate::handlers::params::PageQuery;
use crate::middleware::{respond, Listing, Validated};
use crate::state::AppState;

/// GET /api/preparation - a page of preparations
pub async fn list(State(state): State<AppState>, Validated(query): Validated<PageQuery>) -> Response {
    let page = query.page(&state.config.api);
    respond("preparation list", state.store.preparations(page).await.map(Listing))
}
