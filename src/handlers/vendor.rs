use axum::{extract::State, response::Response};

use crate::handlers::params::{LookupId, PageQuery};
use crate::middleware::{respond, Count, Listing, Validated};
use crate::state::AppState;

/// GET /api/vendor
pub async fn list(State(state): State<AppState>, Validated(query): Validated<PageQuery>) -> Response {
    let page = query.page(&state.config.api);
    respond("vendor list", state.store.vendors(page).await.map(Listing))
}

/// GET /api/vendor/:id
pub async fn get(State(state): State<AppState>, Validated(path): Validated<LookupId>) -> Response {
    respond("vendor lookup", state.store.vendor(path.id).await)
}

/// GET /api/vendor/count
pub async fn count(State(state): State<AppState>) -> Response {
    respond("vendor count", state.store.vendor_count().await.map(Count))
}
