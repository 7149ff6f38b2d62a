use serde::{Deserialize, Serialize};
use sqlx::FromRow;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, FromRow)]
#[serde(rename_all = "camelCase")]
pub struct Preparation {
    pub id: i64,
    pub user_id: i64,
    pub recipe_id: i64,
    pub volume_ml: i64,
    /// Nicotine strength in thousandths of a percent
    pub nicotine_millipercent: i64,
}
