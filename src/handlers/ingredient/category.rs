use axum::{extract::State, response::Response};

use crate::handlers::params::PageQuery;
use crate::middleware::{respond, Count, Listing, Validated};
use crate::state::AppState;

/// GET /api/ingredient-category - a page of categories in id order
pub async fn list(State(state): State<AppState>, Validated(query): Validated<PageQuery>) -> Response {
    let page = query.page(&state.config.api);
    respond(
        "ingredient category list",
        state.store.ingredient_categories(page).await.map(Listing),
    )
}

/// GET /api/ingredient-category/count
pub async fn count(State(state): State<AppState>) -> Response {
    respond(
        "ingredient category count",
        state.store.ingredient_category_count().await.map(Count),
    )
}
