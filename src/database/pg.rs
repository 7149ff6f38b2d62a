use async_trait::async_trait;
use sqlx::{postgres::PgRow, FromRow, PgPool, Row};

use super::models::{
    DataSupplier, Flavor, FlavorFields, FlavorIdentifier, FlavorNote, FlavorWithVendor, IdentifierKey,
    IdentifierWithSupplier, Ingredient, IngredientCategory, IngredientWithCategory, Preparation, UserFlavorNote,
    UserProfile, Vendor,
};
use super::store::{Page, Store, StoreError};

const FLAVOR_COLUMNS: &str = "id, vendor_id, name, slug, density";
const IDENTIFIER_COLUMNS: &str = "flavor_id, data_supplier_id, identifier";

// Joined selects alias the related table's columns as `<relation>__<column>`
const FLAVOR_WITH_VENDOR: &str = r#"
    SELECT f.id, f.vendor_id, f.name, f.slug, f.density,
           v.id AS vendor__id, v.code AS vendor__code, v.name AS vendor__name
    FROM flavor f
    JOIN vendor v ON v.id = f.vendor_id
"#;

const IDENTIFIER_WITH_SUPPLIER: &str = r#"
    SELECT i.flavor_id, i.data_supplier_id, i.identifier,
           s.id AS supplier__id, s.name AS supplier__name
    FROM flavor_identifier i
    JOIN data_supplier s ON s.id = i.data_supplier_id
"#;

const NOTE_WITH_FLAVOR_AND_PROFILE: &str = r#"
    SELECT n.user_id, n.flavor_id, n.note,
           f.id AS flavor__id, f.vendor_id AS flavor__vendor_id, f.name AS flavor__name,
           f.slug AS flavor__slug, f.density AS flavor__density,
           p.id AS profile__id, p.name AS profile__name, p.location AS profile__location,
           p.bio AS profile__bio, p.url AS profile__url
    FROM user_flavor_note n
    JOIN flavor f ON f.id = n.flavor_id
    JOIN user_profile p ON p.id = n.user_id
"#;

const INGREDIENT_WITH_CATEGORY: &str = r#"
    SELECT i.id, i.ingredient_category_id, i.name, i.cas_number, i.density, i.vegan, i.notes,
           c.id AS category__id, c.name AS category__name
    FROM ingredient i
    JOIN ingredient_category c ON c.id = i.ingredient_category_id
"#;

/// `Store` backed by a PostgreSQL pool
#[derive(Clone)]
pub struct PgStore {
    pool: PgPool,
}

impl PgStore {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

fn flavor_with_vendor(row: PgRow) -> Result<FlavorWithVendor, sqlx::Error> {
    Ok(FlavorWithVendor {
        flavor: Flavor::from_row(&row)?,
        vendor: Vendor {
            id: row.try_get("vendor__id")?,
            code: row.try_get("vendor__code")?,
            name: row.try_get("vendor__name")?,
        },
    })
}

fn identifier_with_supplier(row: PgRow) -> Result<IdentifierWithSupplier, sqlx::Error> {
    Ok(IdentifierWithSupplier {
        identifier: FlavorIdentifier::from_row(&row)?,
        data_supplier: DataSupplier {
            id: row.try_get("supplier__id")?,
            name: row.try_get("supplier__name")?,
        },
    })
}

fn note_with_flavor_and_profile(row: PgRow) -> Result<FlavorNote, sqlx::Error> {
    Ok(FlavorNote {
        note: UserFlavorNote::from_row(&row)?,
        flavor: Flavor {
            id: row.try_get("flavor__id")?,
            vendor_id: row.try_get("flavor__vendor_id")?,
            name: row.try_get("flavor__name")?,
            slug: row.try_get("flavor__slug")?,
            density: row.try_get("flavor__density")?,
        },
        user_profile: UserProfile {
            id: row.try_get("profile__id")?,
            name: row.try_get("profile__name")?,
            location: row.try_get("profile__location")?,
            bio: row.try_get("profile__bio")?,
            url: row.try_get("profile__url")?,
        },
    })
}

fn ingredient_with_category(row: PgRow) -> Result<IngredientWithCategory, sqlx::Error> {
    Ok(IngredientWithCategory {
        ingredient: Ingredient::from_row(&row)?,
        ingredient_category: IngredientCategory {
            id: row.try_get("category__id")?,
            name: row.try_get("category__name")?,
        },
    })
}

#[async_trait]
impl Store for PgStore {
    async fn ping(&self) -> Result<(), StoreError> {
        sqlx::query("SELECT 1").execute(&self.pool).await?;
        Ok(())
    }

    async fn flavor(&self, id: i64) -> Result<Option<FlavorWithVendor>, StoreError> {
        let sql = format!("{FLAVOR_WITH_VENDOR} WHERE f.id = $1");
        let row = sqlx::query(&sql).bind(id).fetch_optional(&self.pool).await?;
        Ok(row.map(flavor_with_vendor).transpose()?)
    }

    async fn create_flavor(&self, fields: FlavorFields) -> Result<Flavor, StoreError> {
        let sql = format!(
            "INSERT INTO flavor (vendor_id, name, slug, density) VALUES ($1, $2, $3, $4) RETURNING {FLAVOR_COLUMNS}"
        );
        let flavor = sqlx::query_as::<_, Flavor>(&sql)
            .bind(fields.vendor_id)
            .bind(fields.name)
            .bind(fields.slug)
            .bind(fields.density)
            .fetch_one(&self.pool)
            .await?;
        Ok(flavor)
    }

    async fn update_flavor(&self, id: i64, fields: FlavorFields) -> Result<Vec<Flavor>, StoreError> {
        let sql = format!(
            "UPDATE flavor SET vendor_id = $1, name = $2, slug = $3, density = $4 WHERE id = $5 RETURNING {FLAVOR_COLUMNS}"
        );
        let rows = sqlx::query_as::<_, Flavor>(&sql)
            .bind(fields.vendor_id)
            .bind(fields.name)
            .bind(fields.slug)
            .bind(fields.density)
            .bind(id)
            .fetch_all(&self.pool)
            .await?;
        Ok(rows)
    }

    async fn destroy_flavor(&self, id: i64) -> Result<u64, StoreError> {
        let result = sqlx::query("DELETE FROM flavor WHERE id = $1")
            .bind(id)
            .execute(&self.pool)
            .await?;
        Ok(result.rows_affected())
    }

    async fn flavor_identifiers(&self, flavor_id: i64) -> Result<Vec<IdentifierWithSupplier>, StoreError> {
        let sql = format!("{IDENTIFIER_WITH_SUPPLIER} WHERE i.flavor_id = $1 ORDER BY i.data_supplier_id");
        let rows = sqlx::query(&sql).bind(flavor_id).fetch_all(&self.pool).await?;
        Ok(rows.into_iter().map(identifier_with_supplier).collect::<Result<_, _>>()?)
    }

    async fn flavor_identifier(&self, key: IdentifierKey) -> Result<Option<IdentifierWithSupplier>, StoreError> {
        let sql = format!("{IDENTIFIER_WITH_SUPPLIER} WHERE i.flavor_id = $1 AND i.data_supplier_id = $2");
        let row = sqlx::query(&sql)
            .bind(key.flavor_id)
            .bind(key.data_supplier_id)
            .fetch_optional(&self.pool)
            .await?;
        Ok(row.map(identifier_with_supplier).transpose()?)
    }

    async fn create_flavor_identifier(
        &self,
        key: IdentifierKey,
        identifier: String,
    ) -> Result<FlavorIdentifier, StoreError> {
        let sql = format!(
            "INSERT INTO flavor_identifier (flavor_id, data_supplier_id, identifier) VALUES ($1, $2, $3) RETURNING {IDENTIFIER_COLUMNS}"
        );
        let created = sqlx::query_as::<_, FlavorIdentifier>(&sql)
            .bind(key.flavor_id)
            .bind(key.data_supplier_id)
            .bind(identifier)
            .fetch_one(&self.pool)
            .await?;
        Ok(created)
    }

    async fn update_flavor_identifier(
        &self,
        key: IdentifierKey,
        identifier: String,
    ) -> Result<Vec<FlavorIdentifier>, StoreError> {
        let sql = format!(
            "UPDATE flavor_identifier SET identifier = $1 WHERE flavor_id = $2 AND data_supplier_id = $3 RETURNING {IDENTIFIER_COLUMNS}"
        );
        let rows = sqlx::query_as::<_, FlavorIdentifier>(&sql)
            .bind(identifier)
            .bind(key.flavor_id)
            .bind(key.data_supplier_id)
            .fetch_all(&self.pool)
            .await?;
        Ok(rows)
    }

    async fn destroy_flavor_identifier(&self, key: IdentifierKey) -> Result<u64, StoreError> {
        let result = sqlx::query("DELETE FROM flavor_identifier WHERE flavor_id = $1 AND data_supplier_id = $2")
            .bind(key.flavor_id)
            .bind(key.data_supplier_id)
            .execute(&self.pool)
            .await?;
        Ok(result.rows_affected())
    }

    async fn flavor_notes(&self, flavor_id: i64) -> Result<Vec<FlavorNote>, StoreError> {
        let sql = format!("{NOTE_WITH_FLAVOR_AND_PROFILE} WHERE n.flavor_id = $1 ORDER BY n.user_id");
        let rows = sqlx::query(&sql).bind(flavor_id).fetch_all(&self.pool).await?;
        Ok(rows.into_iter().map(note_with_flavor_and_profile).collect::<Result<_, _>>()?)
    }

    async fn ingredients(&self, page: Page) -> Result<Vec<IngredientWithCategory>, StoreError> {
        let sql = format!("{INGREDIENT_WITH_CATEGORY} ORDER BY i.id LIMIT $1 OFFSET $2");
        let rows = sqlx::query(&sql)
            .bind(page.limit)
            .bind(page.offset)
            .fetch_all(&self.pool)
            .await?;
        Ok(rows.into_iter().map(ingredient_with_category).collect::<Result<_, _>>()?)
    }

    async fn ingredient(&self, id: i64) -> Result<Option<IngredientWithCategory>, StoreError> {
        let sql = format!("{INGREDIENT_WITH_CATEGORY} WHERE i.id = $1");
        let row = sqlx::query(&sql).bind(id).fetch_optional(&self.pool).await?;
        Ok(row.map(ingredient_with_category).transpose()?)
    }

    async fn ingredient_count(&self) -> Result<i64, StoreError> {
        let count = sqlx::query_scalar::<_, i64>("SELECT COUNT(*) FROM ingredient")
            .fetch_one(&self.pool)
            .await?;
        Ok(count)
    }

    async fn ingredient_categories(&self, page: Page) -> Result<Vec<IngredientCategory>, StoreError> {
        let rows = sqlx::query_as::<_, IngredientCategory>(
            "SELECT id, name FROM ingredient_category ORDER BY id ASC LIMIT $1 OFFSET $2",
        )
        .bind(page.limit)
        .bind(page.offset)
        .fetch_all(&self.pool)
        .await?;
        Ok(rows)
    }

    async fn ingredient_category_count(&self) -> Result<i64, StoreError> {
        let count = sqlx::query_scalar::<_, i64>("SELECT COUNT(*) FROM ingredient_category")
            .fetch_one(&self.pool)
            .await?;
        Ok(count)
    }

    async fn preparations(&self, page: Page) -> Result<Vec<Preparation>, StoreError> {
        let rows = sqlx::query_as::<_, Preparation>(
            "SELECT id, user_id, recipe_id, volume_ml, nicotine_millipercent FROM preparation ORDER BY id LIMIT $1 OFFSET $2",
        )
        .bind(page.limit)
        .bind(page.offset)
        .fetch_all(&self.pool)
        .await?;
        Ok(rows)
    }

    async fn vendors(&self, page: Page) -> Result<Vec<Vendor>, StoreError> {
        let rows = sqlx::query_as::<_, Vendor>("SELECT id, code, name FROM vendor ORDER BY id LIMIT $1 OFFSET $2")
            .bind(page.limit)
            .bind(page.offset)
            .fetch_all(&self.pool)
            .await?;
        Ok(rows)
    }

    async fn vendor(&self, id: i64) -> Result<Option<Vendor>, StoreError> {
        let row = sqlx::query_as::<_, Vendor>("SELECT id, code, name FROM vendor WHERE id = $1")
            .bind(id)
            .fetch_optional(&self.pool)
            .await?;
        Ok(row)
    }

    async fn vendor_count(&self) -> Result<i64, StoreError> {
        let count = sqlx::query_scalar::<_, i64>("SELECT COUNT(*) FROM vendor")
            .fetch_one(&self.pool)
            .await?;
        Ok(count)
    }
}
