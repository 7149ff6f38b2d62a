use axum::{extract::State, response::Response};

use crate::handlers::params::{LookupId, PageQuery};
use crate::middleware::{respond, Count, Listing, Validated};
use crate::state::AppState;

/// GET /api/ingredient - a page of ingredients with their category
pub async fn list(State(state): State<AppState>, Validated(query): Validated<PageQuery>) -> Response {
    let page = query.page(&state.config.api);
    respond("ingredient list", state.store.ingredients(page).await.map(Listing))
}

/// GET /api/ingredient/:id
pub async fn get(State(state): State<AppState>, Validated(path): Validated<LookupId>) -> Response {
    respond("ingredient lookup", state.store.ingredient(path.id).await)
}

/// GET /api/ingredient/count
pub async fn count(State(state): State<AppState>) -> Response {
    respond("ingredient count", state.store.ingredient_count().await.map(Count))
}
