use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use sqlx::FromRow;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, FromRow)]
pub struct IngredientCategory {
    pub id: i64,
    pub name: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, FromRow)]
#[serde(rename_all = "camelCase")]
pub struct Ingredient {
    pub id: i64,
    pub ingredient_category_id: i64,
    pub name: String,
    pub cas_number: Option<String>,
    pub density: Option<Decimal>,
    pub vegan: Option<bool>,
    pub notes: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct IngredientWithCategory {
    #[serde(flatten)]
    pub ingredient: Ingredient,
    pub ingredient_category: IngredientCategory,
}
