// handlers/ingredient - /api/ingredient and /api/ingredient-category routes

pub mod category;
pub mod record;

pub use record::count as ingredient_count;
pub use record::get as ingredient_get;
pub use record::list as ingredient_list;

pub use category::count as category_count;
pub use category::list as category_list;
