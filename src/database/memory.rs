use std::collections::BTreeMap;

use async_trait::async_trait;
use rust_decimal::Decimal;
use tokio::sync::RwLock;

use super::models::{
    DataSupplier, Flavor, FlavorFields, FlavorIdentifier, FlavorNote, FlavorWithVendor, IdentifierKey,
    IdentifierWithSupplier, Ingredient, IngredientCategory, IngredientWithCategory, Preparation, UserFlavorNote,
    UserProfile, Vendor,
};
use super::store::{Page, Store, StoreError};

#[derive(Debug, Default, Clone)]
struct Tables {
    vendors: BTreeMap<i64, Vendor>,
    flavors: BTreeMap<i64, Flavor>,
    suppliers: BTreeMap<i64, DataSupplier>,
    identifiers: BTreeMap<IdentifierKey, FlavorIdentifier>,
    profiles: BTreeMap<i64, UserProfile>,
    /// keyed by (flavor_id, user_id)
    notes: BTreeMap<(i64, i64), UserFlavorNote>,
    categories: BTreeMap<i64, IngredientCategory>,
    ingredients: BTreeMap<i64, Ingredient>,
    preparations: BTreeMap<i64, Preparation>,
}

impl Tables {
    fn check_vendor(&self, vendor_id: i64) -> Result<(), StoreError> {
        if self.vendors.contains_key(&vendor_id) {
            Ok(())
        } else {
            Err(StoreError::ForeignKey(format!("vendor {} does not exist", vendor_id)))
        }
    }

    fn flavor_with_vendor(&self, flavor: &Flavor) -> Option<FlavorWithVendor> {
        let vendor = self.vendors.get(&flavor.vendor_id)?;
        Some(FlavorWithVendor {
            flavor: flavor.clone(),
            vendor: vendor.clone(),
        })
    }

    fn identifier_with_supplier(&self, identifier: &FlavorIdentifier) -> Option<IdentifierWithSupplier> {
        let supplier = self.suppliers.get(&identifier.data_supplier_id)?;
        Some(IdentifierWithSupplier {
            identifier: identifier.clone(),
            data_supplier: supplier.clone(),
        })
    }

    fn ingredient_with_category(&self, ingredient: &Ingredient) -> Option<IngredientWithCategory> {
        let category = self.categories.get(&ingredient.ingredient_category_id)?;
        Some(IngredientWithCategory {
            ingredient: ingredient.clone(),
            ingredient_category: category.clone(),
        })
    }

    fn next_flavor_id(&self) -> i64 {
        self.flavors.keys().next_back().map_or(1, |id| id + 1)
    }
}

/// `Store` over in-process tables. Foreign keys and composite-key uniqueness
/// are checked the way the PostgreSQL schema declares them, and deleting a
/// flavor cascades to its identifiers and notes.
#[derive(Debug, Default)]
pub struct MemoryStore {
    tables: RwLock<Tables>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// A small catalog: three vendors, four flavors (flavor 123 is Capella's
    /// Pear), supplier identifiers, two user notes, five ingredients in four
    /// categories and three preparations.
    pub fn with_fixture() -> Self {
        Self {
            tables: RwLock::new(fixture()),
        }
    }
}

#[async_trait]
impl Store for MemoryStore {
    async fn ping(&self) -> Result<(), StoreError> {
        Ok(())
    }

    async fn flavor(&self, id: i64) -> Result<Option<FlavorWithVendor>, StoreError> {
        let tables = self.tables.read().await;
        Ok(tables.flavors.get(&id).and_then(|f| tables.flavor_with_vendor(f)))
    }

    async fn create_flavor(&self, fields: FlavorFields) -> Result<Flavor, StoreError> {
        let mut tables = self.tables.write().await;
        tables.check_vendor(fields.vendor_id)?;

        let flavor = Flavor {
            id: tables.next_flavor_id(),
            vendor_id: fields.vendor_id,
            name: fields.name,
            slug: fields.slug,
            density: fields.density,
        };
        tables.flavors.insert(flavor.id, flavor.clone());
        Ok(flavor)
    }

    async fn update_flavor(&self, id: i64, fields: FlavorFields) -> Result<Vec<Flavor>, StoreError> {
        let mut tables = self.tables.write().await;
        if !tables.flavors.contains_key(&id) {
            return Ok(vec![]);
        }
        tables.check_vendor(fields.vendor_id)?;

        let Some(flavor) = tables.flavors.get_mut(&id) else {
            return Ok(vec![]);
        };
        flavor.vendor_id = fields.vendor_id;
        flavor.name = fields.name;
        flavor.slug = fields.slug;
        flavor.density = fields.density;
        Ok(vec![flavor.clone()])
    }

    async fn destroy_flavor(&self, id: i64) -> Result<u64, StoreError> {
        let mut tables = self.tables.write().await;
        if tables.flavors.remove(&id).is_none() {
            return Ok(0);
        }
        tables.identifiers.retain(|key, _| key.flavor_id != id);
        tables.notes.retain(|(flavor_id, _), _| *flavor_id != id);
        Ok(1)
    }

    async fn flavor_identifiers(&self, flavor_id: i64) -> Result<Vec<IdentifierWithSupplier>, StoreError> {
        let tables = self.tables.read().await;
        Ok(tables
            .identifiers
            .values()
            .filter(|i| i.flavor_id == flavor_id)
            .filter_map(|i| tables.identifier_with_supplier(i))
            .collect())
    }

    async fn flavor_identifier(&self, key: IdentifierKey) -> Result<Option<IdentifierWithSupplier>, StoreError> {
        let tables = self.tables.read().await;
        Ok(tables
            .identifiers
            .get(&key)
            .and_then(|i| tables.identifier_with_supplier(i)))
    }

    async fn create_flavor_identifier(
        &self,
        key: IdentifierKey,
        identifier: String,
    ) -> Result<FlavorIdentifier, StoreError> {
        let mut tables = self.tables.write().await;
        if !tables.flavors.contains_key(&key.flavor_id) {
            return Err(StoreError::ForeignKey(format!("flavor {} does not exist", key.flavor_id)));
        }
        if !tables.suppliers.contains_key(&key.data_supplier_id) {
            return Err(StoreError::ForeignKey(format!(
                "data supplier {} does not exist",
                key.data_supplier_id
            )));
        }
        if tables.identifiers.contains_key(&key) {
            return Err(StoreError::Duplicate(format!(
                "flavor {} already has an identifier from data supplier {}",
                key.flavor_id, key.data_supplier_id
            )));
        }

        let created = FlavorIdentifier {
            flavor_id: key.flavor_id,
            data_supplier_id: key.data_supplier_id,
            identifier,
        };
        tables.identifiers.insert(key, created.clone());
        Ok(created)
    }

    async fn update_flavor_identifier(
        &self,
        key: IdentifierKey,
        identifier: String,
    ) -> Result<Vec<FlavorIdentifier>, StoreError> {
        let mut tables = self.tables.write().await;
        Ok(match tables.identifiers.get_mut(&key) {
            Some(existing) => {
                existing.identifier = identifier;
                vec![existing.clone()]
            }
            None => vec![],
        })
    }

    async fn destroy_flavor_identifier(&self, key: IdentifierKey) -> Result<u64, StoreError> {
        let mut tables = self.tables.write().await;
        Ok(tables.identifiers.remove(&key).map_or(0, |_| 1))
    }

    async fn flavor_notes(&self, flavor_id: i64) -> Result<Vec<FlavorNote>, StoreError> {
        let tables = self.tables.read().await;
        let Some(flavor) = tables.flavors.get(&flavor_id) else {
            return Ok(vec![]);
        };
        Ok(tables
            .notes
            .range((flavor_id, i64::MIN)..=(flavor_id, i64::MAX))
            .filter_map(|(_, note)| {
                let profile = tables.profiles.get(&note.user_id)?;
                Some(FlavorNote {
                    note: note.clone(),
                    flavor: flavor.clone(),
                    user_profile: profile.clone(),
                })
            })
            .collect())
    }

    async fn ingredients(&self, page: Page) -> Result<Vec<IngredientWithCategory>, StoreError> {
        let tables = self.tables.read().await;
        Ok(page.slice(
            tables
                .ingredients
                .values()
                .filter_map(|i| tables.ingredient_with_category(i)),
        ))
    }

    async fn ingredient(&self, id: i64) -> Result<Option<IngredientWithCategory>, StoreError> {
        let tables = self.tables.read().await;
        Ok(tables
            .ingredients
            .get(&id)
            .and_then(|i| tables.ingredient_with_category(i)))
    }

    async fn ingredient_count(&self) -> Result<i64, StoreError> {
        Ok(self.tables.read().await.ingredients.len() as i64)
    }

    async fn ingredient_categories(&self, page: Page) -> Result<Vec<IngredientCategory>, StoreError> {
        let tables = self.tables.read().await;
        Ok(page.slice(tables.categories.values().cloned()))
    }

    async fn ingredient_category_count(&self) -> Result<i64, StoreError> {
        Ok(self.tables.read().await.categories.len() as i64)
    }

    async fn preparations(&self, page: Page) -> Result<Vec<Preparation>, StoreError> {
        let tables = self.tables.read().await;
        Ok(page.slice(tables.preparations.values().cloned()))
    }

    async fn vendors(&self, page: Page) -> Result<Vec<Vendor>, StoreError> {
        let tables = self.tables.read().await;
        Ok(page.slice(tables.vendors.values().cloned()))
    }

    async fn vendor(&self, id: i64) -> Result<Option<Vendor>, StoreError> {
        Ok(self.tables.read().await.vendors.get(&id).cloned())
    }

    async fn vendor_count(&self) -> Result<i64, StoreError> {
        Ok(self.tables.read().await.vendors.len() as i64)
    }
}

fn fixture() -> Tables {
    let mut t = Tables::default();

    for (id, code, name) in [
        (1, "CAP", "Capella"),
        (2, "TPA", "The Perfumer's Apprentice"),
        (3, "FA", "Flavour Art"),
    ] {
        t.vendors.insert(
            id,
            Vendor {
                id,
                code: code.to_string(),
                name: name.to_string(),
            },
        );
    }

    for (id, vendor_id, name, slug, density) in [
        (123, 1, "Pear", "cap-pear", Decimal::new(10200, 4)),
        (124, 1, "Sweet Strawberry", "cap-sweet-strawberry", Decimal::new(10450, 4)),
        (200, 2, "Bavarian Cream", "tpa-bavarian-cream", Decimal::new(10380, 4)),
        (300, 3, "Fuji Apple", "fa-fuji-apple", Decimal::new(9980, 4)),
    ] {
        t.flavors.insert(
            id,
            Flavor {
                id,
                vendor_id,
                name: name.to_string(),
                slug: slug.to_string(),
                density,
            },
        );
    }

    for (id, name) in [(1, "ELR"), (2, "ATF")] {
        t.suppliers.insert(id, DataSupplier { id, name: name.to_string() });
    }

    for (flavor_id, data_supplier_id, identifier) in [
        (123, 1, "capella-pear"),
        (123, 2, "cap-pear-v1"),
        (200, 1, "tpa-bavarian-cream"),
    ] {
        let row = FlavorIdentifier {
            flavor_id,
            data_supplier_id,
            identifier: identifier.to_string(),
        };
        t.identifiers.insert(row.key(), row);
    }

    for (id, name, location) in [(1, "mixer", Some("Portland")), (2, "steeper", None)] {
        t.profiles.insert(
            id,
            UserProfile {
                id,
                name: name.to_string(),
                location: location.map(str::to_string),
                bio: None,
                url: None,
            },
        );
    }

    for (user_id, flavor_id, note) in [
        (1, 123, "Crisp and juicy, best around 3%"),
        (2, 123, "Pairs well with vanilla custard"),
    ] {
        t.notes.insert(
            (flavor_id, user_id),
            UserFlavorNote {
                user_id,
                flavor_id,
                note: note.to_string(),
            },
        );
    }

    for (id, name) in [(1, "Base"), (2, "Nicotine"), (3, "Flavor"), (4, "Additive")] {
        t.categories.insert(id, IngredientCategory { id, name: name.to_string() });
    }

    for (id, category, name, cas, density) in [
        (1, 1, "Propylene Glycol", "57-55-6", Some(Decimal::new(10360, 4))),
        (2, 1, "Vegetable Glycerin", "56-81-5", Some(Decimal::new(12610, 4))),
        (3, 2, "Nicotine", "54-11-5", Some(Decimal::new(10100, 4))),
        (4, 1, "Distilled Water", "7732-18-5", Some(Decimal::new(10000, 4))),
        (5, 4, "Sucralose", "56038-13-2", None),
    ] {
        t.ingredients.insert(
            id,
            Ingredient {
                id,
                ingredient_category_id: category,
                name: name.to_string(),
                cas_number: Some(cas.to_string()),
                density,
                vegan: Some(true),
                notes: None,
            },
        );
    }

    for (id, user_id, recipe_id, volume_ml, nicotine_millipercent) in
        [(1, 1, 10, 30, 3000), (2, 1, 11, 60, 6000), (3, 2, 10, 120, 0)]
    {
        t.preparations.insert(
            id,
            Preparation {
                id,
                user_id,
                recipe_id,
                volume_ml,
                nicotine_millipercent,
            },
        );
    }

    t
}

#[cfg(test)]
mod tests {
    use super::*;

    fn pear_fields() -> FlavorFields {
        FlavorFields {
            vendor_id: 1,
            name: "Pear".to_string(),
            slug: "cap-pear-2".to_string(),
            density: Decimal::new(10200, 4),
        }
    }

    #[tokio::test]
    async fn fixture_flavor_includes_vendor() {
        let store = MemoryStore::with_fixture();
        let pear = store.flavor(123).await.unwrap().expect("fixture flavor");
        assert_eq!(pear.flavor.name, "Pear");
        assert_eq!(pear.vendor.code, "CAP");
        assert!(store.flavor(0).await.unwrap().is_none());
    }

    #[tokio::test]
    async fn create_flavor_assigns_next_id_and_checks_vendor() {
        let store = MemoryStore::with_fixture();
        let created = store.create_flavor(pear_fields()).await.unwrap();
        assert_eq!(created.id, 301);

        let mut dangling = pear_fields();
        dangling.vendor_id = 99;
        let err = store.create_flavor(dangling).await.unwrap_err();
        assert!(matches!(err, StoreError::ForeignKey(_)));
    }

    #[tokio::test]
    async fn update_missing_flavor_touches_nothing() {
        let store = MemoryStore::with_fixture();
        assert!(store.update_flavor(999, pear_fields()).await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn destroy_flavor_cascades() {
        let store = MemoryStore::with_fixture();
        assert_eq!(store.destroy_flavor(123).await.unwrap(), 1);
        assert!(store.flavor_identifiers(123).await.unwrap().is_empty());
        assert!(store.flavor_notes(123).await.unwrap().is_empty());
        assert_eq!(store.destroy_flavor(123).await.unwrap(), 0);
    }

    #[tokio::test]
    async fn identifier_composite_key_is_unique() {
        let store = MemoryStore::with_fixture();
        let key = IdentifierKey {
            flavor_id: 123,
            data_supplier_id: 1,
        };
        let err = store
            .create_flavor_identifier(key, "again".to_string())
            .await
            .unwrap_err();
        assert!(matches!(err, StoreError::Duplicate(_)));
    }

    #[tokio::test]
    async fn notes_include_flavor_and_profile() {
        let store = MemoryStore::with_fixture();
        let notes = store.flavor_notes(123).await.unwrap();
        assert_eq!(notes.len(), 2);
        assert_eq!(notes[0].user_profile.name, "mixer");
        assert_eq!(notes[1].flavor.id, 123);
        assert!(store.flavor_notes(300).await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn categories_page_in_id_order() {
        let store = MemoryStore::with_fixture();
        let page = store.ingredient_categories(Page::new(2, 1)).await.unwrap();
        let ids: Vec<i64> = page.iter().map(|c| c.id).collect();
        assert_eq!(ids, vec![2, 3]);
        assert_eq!(store.ingredient_category_count().await.unwrap(), 4);
    }
}
