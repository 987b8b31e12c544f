//! Coefficient persistence.
//!
//! The engine never chooses a storage medium. Callers hand in a
//! [`KeyValueStore`]; [`CoefficientRepository`] keeps one coefficient
//! profile per user scope in it.

pub mod coefficients;
pub mod factory;
pub mod kv;
pub mod memory;

pub use coefficients::{
    CoefficientRepository, load_coefficients, reset_coefficients, save_coefficients,
};
pub use factory::{MemoryStoreFactory, StoreConfig, StoreFactory, StoreRegistry};
pub use kv::{KeyValueStore, StoreError};
pub use memory::InMemoryStore;
