//! Infrastructure layer: inventory storage, configuration, and the
//! availability lookup built on top of them.

pub mod availability;
pub mod config;
pub mod inventory_store;

pub use availability::AvailabilityResolver;
pub use config::{ConfigError, DatabaseConfig};
pub use inventory_store::{
    InMemoryInventoryStore, InventoryStore, PostgresInventoryStore, ReadOnlyScope, StoreError,
};
