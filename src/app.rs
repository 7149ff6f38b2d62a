use axum::{
    http::HeaderValue,
    middleware,
    routing::get,
    Router,
};
use tower_http::{
    cors::{AllowOrigin, Any, CorsLayer},
    trace::TraceLayer,
};

use crate::config::SecurityConfig;
use crate::handlers;
use crate::middleware::jwt_auth_middleware;
use crate::state::AppState;

/// Full API surface: public routes at the root, resource groups under `/api`
/// behind the bearer-token gate.
pub fn app(state: AppState) -> Router {
    let cors = cors_layer(&state.config.security);

    Router::new()
        // Public
        .route("/", get(handlers::public::root))
        .route("/health", get(handlers::public::health))
        // Protected API
        .nest("/api", api_routes(state.clone()))
        // Global middleware
        .layer(cors)
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

fn api_routes(state: AppState) -> Router<AppState> {
    Router::new()
        .merge(flavor_routes())
        .merge(ingredient_routes())
        .merge(preparation_routes())
        .merge(vendor_routes())
        .route_layer(middleware::from_fn_with_state(state, jwt_auth_middleware))
}

fn flavor_routes() -> Router<AppState> {
    use axum::routing::post;
    use handlers::flavor;

    Router::new()
        .route("/flavor", post(flavor::flavor_post))
        .route(
            "/flavor/:flavorId",
            get(flavor::flavor_get)
                .put(flavor::flavor_put)
                .delete(flavor::flavor_delete),
        )
        // Supplier identifiers
        .route("/flavor/:flavorId/identifiers", get(flavor::identifier_list))
        .route("/flavor/:flavorId/identifier", post(flavor::identifier_post))
        .route(
            "/flavor/:flavorId/identifier/:dataSupplierId",
            get(flavor::identifier_get)
                .put(flavor::identifier_put)
                .delete(flavor::identifier_delete),
        )
        // User notes
        .route("/flavor/:flavorId/notes", get(flavor::note_list))
}

fn ingredient_routes() -> Router<AppState> {
    use handlers::ingredient;

    Router::new()
        .route("/ingredient", get(ingredient::ingredient_list))
        .route("/ingredient/count", get(ingredient::ingredient_count))
        .route("/ingredient/:id", get(ingredient::ingredient_get))
        .route("/ingredient-category", get(ingredient::category_list))
        .route("/ingredient-category/count", get(ingredient::category_count))
}

fn preparation_routes() -> Router<AppState> {
    Router::new().route("/preparation", get(handlers::preparation::list))
}

fn vendor_routes() -> Router<AppState> {
    use handlers::vendor;

    Router::new()
        .route("/vendor", get(vendor::list))
        .route("/vendor/count", get(vendor::count))
        .route("/vendor/:id", get(vendor::get))
}

fn cors_layer(security: &SecurityConfig) -> CorsLayer {
    if !security.enable_cors {
        return CorsLayer::new();
    }

    let allow_origin = if security.cors_origins.iter().any(|o| o == "*") {
        AllowOrigin::any()
    } else {
        AllowOrigin::list(parse_origins(&security.cors_origins))
    };

    CorsLayer::new()
        .allow_origin(allow_origin)
        .allow_methods(Any)
        .allow_headers(Any)
}

fn parse_origins(origins: &[String]) -> Vec<HeaderValue> {
    origins
        .iter()
        .filter_map(|origin| match origin.parse() {
            Ok(value) => Some(value),
            Err(_) => {
                tracing::warn!("Ignoring invalid CORS origin: {}", origin);
                None
            }
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn invalid_origins_are_skipped() {
        let origins = vec!["http://localhost:3000".to_string(), "bad\norigin".to_string()];
        assert_eq!(parse_origins(&origins), vec![HeaderValue::from_static("http://localhost:3000")]);
    }
}
