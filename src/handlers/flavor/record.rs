use axum::{extract::State, response::Response};
use rust_decimal::Decimal;
use serde::Deserialize;

use super::FlavorRef;
use crate::database::models::FlavorFields;
use crate::middleware::{respond, Affected, Created, FieldRule, Rules, Validated};
use crate::state::AppState;

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FlavorBody {
    pub vendor_id: i64,
    pub name: String,
    pub slug: String,
    pub density: Decimal,
}

impl Rules for FlavorBody {
    const RULES: &'static [FieldRule] = &[
        FieldRule::body("vendorId").int().min(1),
        FieldRule::body("name").text(),
        FieldRule::body("slug").text(),
        FieldRule::body("density").decimal(),
    ];
}

impl From<FlavorBody> for FlavorFields {
    fn from(body: FlavorBody) -> Self {
        Self {
            vendor_id: body.vendor_id,
            name: body.name,
            slug: body.slug,
            density: body.density,
        }
    }
}

/// `:flavorId` of a single-flavor lookup; zero matches nothing
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FlavorLookup {
    pub flavor_id: i64,
}

impl Rules for FlavorLookup {
    const RULES: &'static [FieldRule] = &[FieldRule::param("flavorId").int().min(0)];
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FlavorUpdate {
    pub flavor_id: i64,
    #[serde(flatten)]
    pub fields: FlavorBody,
}

impl Rules for FlavorUpdate {
    const RULES: &'static [FieldRule] = &[
        FieldRule::param("flavorId").int().min(1),
        FieldRule::body("vendorId").int().min(1),
        FieldRule::body("name").text(),
        FieldRule::body("slug").text(),
        FieldRule::body("density").decimal(),
    ];
}

/// GET /api/flavor/:flavorId - a flavor with its vendor
pub async fn get(State(state): State<AppState>, Validated(path): Validated<FlavorLookup>) -> Response {
    respond("flavor lookup", state.store.flavor(path.flavor_id).await)
}

/// POST /api/flavor - create a flavor
pub async fn post(State(state): State<AppState>, Validated(body): Validated<FlavorBody>) -> Response {
    respond("flavor create", state.store.create_flavor(body.into()).await.map(Created))
}

/// PUT /api/flavor/:flavorId - replace a flavor's columns, answering with the updated rows
pub async fn put(State(state): State<AppState>, Validated(update): Validated<FlavorUpdate>) -> Response {
    respond(
        "flavor update",
        state.store.update_flavor(update.flavor_id, update.fields.into()).await,
    )
}

/// DELETE /api/flavor/:flavorId - remove a flavor, answering with the number of rows removed
pub async fn delete(State(state): State<AppState>, Validated(path): Validated<FlavorRef>) -> Response {
    respond("flavor delete", state.store.destroy_flavor(path.flavor_id).await.map(Affected))
}
