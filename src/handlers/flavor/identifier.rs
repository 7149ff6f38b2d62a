use axum::{extract::State, response::Response};
use serde::Deserialize;

use super::FlavorRef;
use crate::database::models::IdentifierKey;
use crate::middleware::{respond, Affected, Created, FieldRule, Rules, Validated};
use crate::state::AppState;

/// `:flavorId/identifier/:dataSupplierId`
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct IdentifierPath {
    pub flavor_id: i64,
    pub data_supplier_id: i64,
}

impl Rules for IdentifierPath {
    const RULES: &'static [FieldRule] = &[
        FieldRule::param("flavorId").int().min(1),
        FieldRule::param("dataSupplierId").int().min(1),
    ];
}

impl IdentifierPath {
    fn key(&self) -> IdentifierKey {
        IdentifierKey {
            flavor_id: self.flavor_id,
            data_supplier_id: self.data_supplier_id,
        }
    }
}

/// Create: supplier named in the body
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct IdentifierCreate {
    #[serde(flatten)]
    pub key: IdentifierPath,
    pub identifier: String,
}

impl Rules for IdentifierCreate {
    const RULES: &'static [FieldRule] = &[
        FieldRule::param("flavorId").int().min(1),
        FieldRule::body("dataSupplierId").int().min(1),
        FieldRule::body("identifier").text(),
    ];
}

/// Update: supplier named in the path
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct IdentifierUpdate {
    #[serde(flatten)]
    pub key: IdentifierPath,
    pub identifier: String,
}

impl Rules for IdentifierUpdate {
    const RULES: &'static [FieldRule] = &[
        FieldRule::param("flavorId").int().min(1),
        FieldRule::param("dataSupplierId").int().min(1),
        FieldRule::body("identifier").text(),
    ];
}

/// GET /api/flavor/:flavorId/identifiers - every supplier identifier of a flavor
pub async fn list(State(state): State<AppState>, Validated(path): Validated<FlavorRef>) -> Response {
    respond(
        "flavor identifier list",
        state.store.flavor_identifiers(path.flavor_id).await,
    )
}

/// GET /api/flavor/:flavorId/identifier/:dataSupplierId
pub async fn get(State(state): State<AppState>, Validated(path): Validated<IdentifierPath>) -> Response {
    respond("flavor identifier lookup", state.store.flavor_identifier(path.key()).await)
}

/// POST /api/flavor/:flavorId/identifier
pub async fn post(State(state): State<AppState>, Validated(req): Validated<IdentifierCreate>) -> Response {
    respond(
        "flavor identifier create",
        state
            .store
            .create_flavor_identifier(req.key.key(), req.identifier)
            .await
            .map(Created),
    )
}

/// PUT /api/flavor/:flavorId/identifier/:dataSupplierId
pub async fn put(State(state): State<AppState>, Validated(req): Validated<IdentifierUpdate>) -> Response {
    respond(
        "flavor identifier update",
        state
            .store
            .update_flavor_identifier(req.key.key(), req.identifier)
            .await,
    )
}

/// DELETE /api/flavor/:flavorId/identifier/:dataSupplierId
pub async fn delete(State(state): State<AppState>, Validated(path): Validated<IdentifierPath>) -> Response {
    respond(
        "flavor identifier delete",
        state.store.destroy_flavor_identifier(path.key()).await.map(Affected),
    )
}
