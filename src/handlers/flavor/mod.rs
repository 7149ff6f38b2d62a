// handlers/flavor - /api/flavor routes: flavors, their supplier identifiers and user notes

pub mod identifier;
pub mod note;
pub mod record;

pub use record::delete as flavor_delete;
pub use record::get as flavor_get;
pub use record::post as flavor_post;
pub use record::put as flavor_put;

pub use identifier::delete as identifier_delete;
pub use identifier::get as identifier_get;
pub use identifier::list as identifier_list;
pub use identifier::post as identifier_post;
pub use identifier::put as identifier_put;

pub use note::list as note_list;

use serde::Deserialize;

use crate::middleware::{FieldRule, Rules};

/// `:flavorId` of the sub-resources hanging off a flavor
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FlavorRef {
    pub flavor_id: i64,
}

impl Rules for FlavorRef {
    const RULES: &'static [FieldRule] = &[FieldRule::param("flavorId").int().min(1)];
}
