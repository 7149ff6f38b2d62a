pub mod manager;
pub mod memory;
pub mod models;
pub mod pg;
pub mod store;

pub use manager::DatabaseManager;
pub use memory::MemoryStore;
pub use pg::PgStore;
pub use store::{Page, Store, StoreError};
