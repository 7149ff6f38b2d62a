use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use sqlx::FromRow;

use super::Vendor;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, FromRow)]
#[serde(rename_all = "camelCase")]
pub struct Flavor {
    pub id: i64,
    pub vendor_id: i64,
    pub name: String,
    pub slug: String,
    pub density: Decimal,
}

/// Writable columns of a flavor, shared by create and update
#[derive(Debug, Clone, PartialEq)]
pub struct FlavorFields {
    pub vendor_id: i64,
    pub name: String,
    pub slug: String,
    pub density: Decimal,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct FlavorWithVendor {
    #[serde(flatten)]
    pub flavor: Flavor,
    pub vendor: Vendor,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, FromRow)]
pub struct DataSupplier {
    pub id: i64,
    pub name: String,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct IdentifierKey {
    pub flavor_id: i64,
    pub data_supplier_id: i64,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, FromRow)]
#[serde(rename_all = "camelCase")]
pub struct FlavorIdentifier {
    pub flavor_id: i64,
    pub data_supplier_id: i64,
    pub identifier: String,
}

impl FlavorIdentifier {
    pub fn key(&self) -> IdentifierKey {
        IdentifierKey {
            flavor_id: self.flavor_id,
            data_supplier_id: self.data_supplier_id,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct IdentifierWithSupplier {
    #[serde(flatten)]
    pub identifier: FlavorIdentifier,
    pub data_supplier: DataSupplier,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, FromRow)]
pub struct UserProfile {
    pub id: i64,
    pub name: String,
    pub location: Option<String>,
    pub bio: Option<String>,
    pub url: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, FromRow)]
#[serde(rename_all = "camelCase")]
pub struct UserFlavorNote {
    pub user_id: i64,
    pub flavor_id: i64,
    pub note: String,
}

/// A user's note on a flavor, with both ends of the link included
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct FlavorNote {
    #[serde(flatten)]
    pub note: UserFlavorNote,
    pub flavor: Flavor,
    pub user_profile: UserProfile,
}
