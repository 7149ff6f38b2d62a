use async_trait::async_trait;
use thiserror::Error;

use super::models::{
    Flavor, FlavorFields, FlavorIdentifier, FlavorNote, FlavorWithVendor, IdentifierKey, IdentifierWithSupplier,
    IngredientCategory, IngredientWithCategory, Preparation, Vendor,
};

/// Faults raised by a store. The HTTP layer never inspects the variant, only
/// the message, which is what ends up in a 500 body.
#[derive(Debug, Error)]
pub enum StoreError {
    #[error("Missing configuration: {0}")]
    Config(&'static str),

    #[error("Foreign key violation: {0}")]
    ForeignKey(String),

    #[error("Duplicate key: {0}")]
    Duplicate(String),

    #[error(transparent)]
    Migrate(#[from] sqlx::migrate::MigrateError),

    #[error(transparent)]
    Sqlx(#[from] sqlx::Error),
}

/// A window over an ordered collection, already converted to a row skip
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Page {
    pub limit: i64,
    pub offset: i64,
}

impl Page {
    pub fn new(limit: i64, offset: i64) -> Self {
        Self { limit, offset }
    }

    /// Apply the window to an iterator of rows already sorted by id
    pub fn slice<T, I>(&self, rows: I) -> Vec<T>
    where
        I: IntoIterator<Item = T>,
    {
        rows.into_iter()
            .skip(self.offset.max(0) as usize)
            .take(self.limit.max(0) as usize)
            .collect()
    }
}

/// Data access used by the handlers. Every handler issues exactly one call.
///
/// Lookups return `None` or an empty vector when nothing matches; updates
/// return the rows they touched and deletes return the number removed, so an
/// absent target is never an error.
#[async_trait]
pub trait Store: Send + Sync {
    /// Cheap round trip used by the health endpoint
    async fn ping(&self) -> Result<(), StoreError>;

    async fn flavor(&self, id: i64) -> Result<Option<FlavorWithVendor>, StoreError>;
    async fn create_flavor(&self, fields: FlavorFields) -> Result<Flavor, StoreError>;
    async fn update_flavor(&self, id: i64, fields: FlavorFields) -> Result<Vec<Flavor>, StoreError>;
    async fn destroy_flavor(&self, id: i64) -> Result<u64, StoreError>;

    async fn flavor_identifiers(&self, flavor_id: i64) -> Result<Vec<IdentifierWithSupplier>, StoreError>;
    async fn flavor_identifier(&self, key: IdentifierKey) -> Result<Option<IdentifierWithSupplier>, StoreError>;
    async fn create_flavor_identifier(&self, key: IdentifierKey, identifier: String)
        -> Result<FlavorIdentifier, StoreError>;
    async fn update_flavor_identifier(
        &self,
        key: IdentifierKey,
        identifier: String,
    ) -> Result<Vec<FlavorIdentifier>, StoreError>;
    async fn destroy_flavor_identifier(&self, key: IdentifierKey) -> Result<u64, StoreError>;

    async fn flavor_notes(&self, flavor_id: i64) -> Result<Vec<FlavorNote>, StoreError>;

    async fn ingredients(&self, page: Page) -> Result<Vec<IngredientWithCategory>, StoreError>;
    async fn ingredient(&self, id: i64) -> Result<Option<IngredientWithCategory>, StoreError>;
    async fn ingredient_count(&self) -> Result<i64, StoreError>;

    async fn ingredient_categories(&self, page: Page) -> Result<Vec<IngredientCategory>, StoreError>;
    async fn ingredient_category_count(&self) -> Result<i64, StoreError>;

    async fn preparations(&self, page: Page) -> Result<Vec<Preparation>, StoreError>;

    async fn vendors(&self, page: Page) -> Result<Vec<Vendor>, StoreError>;
    async fn vendor(&self, id: i64) -> Result<Option<Vendor>, StoreError>;
    async fn vendor_count(&self) -> Result<i64, StoreError>;
}
