// handlers/public - routes answered without a bearer token

use axum::{extract::State, response::Json};
use serde_json::{json, Value};

use crate::error::ApiError;
use crate::state::AppState;

/// GET / - service name, version and route map
pub async fn root() -> Json<Value> {
    let version = env!("CARGO_PKG_VERSION");

    Json(json!({
        "name": "Flavor API",
        "version": version,
        "endpoints": {
            "health": "/health (public)",
            "flavor": "/api/flavor[/:flavorId] (protected)",
            "identifiers": "/api/flavor/:flavorId/identifiers, /api/flavor/:flavorId/identifier[/:dataSupplierId] (protected)",
            "notes": "/api/flavor/:flavorId/notes (protected)",
            "ingredient": "/api/ingredient[/:id|/count] (protected)",
            "ingredient_category": "/api/ingredient-category[/count] (protected)",
            "preparation": "/api/preparation (protected)",
            "vendor": "/api/vendor[/:id|/count] (protected)",
        }
    }))
}

/// GET /health - store round trip
pub async fn health(State(state): State<AppState>) -> Result<Json<Value>, ApiError> {
    let now = chrono::Utc::now();

    state.store.ping().await.map_err(|e| {
        tracing::error!("Health check failed: {}", e);
        ApiError::service_unavailable(format!("database unavailable: {}", e))
    })?;

    Ok(Json(json!({
        "status": "ok",
        "timestamp": now,
        "database": "ok"
    })))
}
