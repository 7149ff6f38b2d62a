//! Row shapes returned by the store and serialized straight into responses.
//!
//! Column names are snake_case, JSON field names are camelCase. Lookups that
//! follow a relation return a `*With*` type that flattens the base entity and
//! nests the related row under its own key.

pub mod flavor;
pub mod ingredient;
pub mod preparation;
pub mod vendor;

pub use flavor::{
    DataSupplier, Flavor, FlavorFields, FlavorIdentifier, FlavorNote, FlavorWithVendor, IdentifierKey,
    IdentifierWithSupplier, UserFlavorNote, UserProfile,
};
pub use ingredient::{Ingredient, IngredientCategory, IngredientWithCategory};
pub use preparation::Preparation;
pub use vendor::Vendor;
