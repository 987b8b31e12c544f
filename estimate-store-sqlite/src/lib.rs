mod factory;
mod store;

pub use factory::SqliteStoreFactory;
pub use store::SqliteStore;
