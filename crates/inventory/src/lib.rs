//! Inventory domain module.
//!
//! This crate contains the stock records and the availability answer derived
//! from them, implemented purely as deterministic domain logic (no IO, no
//! HTTP, no storage).

pub mod availability;
pub mod record;

pub use availability::AvailabilityEntry;
pub use record::InventoryRecord;
