//! Inventory record storage behind an explicit read-only scope.
//!
//! Callers never query a store directly. They open a [`ReadOnlyScope`] with
//! [`InventoryStore::begin_read_only`], run their lookups against it, and
//! finish with [`ReadOnlyScope::release`]. A scope dropped without being
//! released (early return, `?`, panic) is released by its `Drop` impl, so the
//! underlying transaction or lock never outlives the call that opened it.

use std::sync::Arc;

use async_trait::async_trait;
use thiserror::Error;

use stockcheck_core::SkuCode;
use stockcheck_inventory::InventoryRecord;

pub mod in_memory;
pub mod postgres;

pub use in_memory::InMemoryInventoryStore;
pub use postgres::PostgresInventoryStore;

/// Data-access failure raised by an inventory store.
///
/// These are **infrastructure errors**. A SKU without a record is not an
/// error; it is simply absent from the result.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum StoreError {
    /// Storage could not be reached (connection refused, pool closed or exhausted).
    #[error("inventory store unavailable: {0}")]
    Unavailable(String),

    /// The lookup could not be executed.
    #[error("inventory query failed: {0}")]
    Query(String),

    /// A persisted row could not be turned into a valid record.
    #[error("invalid inventory row: {0}")]
    Decode(String),
}

/// Source of inventory records keyed by SKU code.
#[async_trait]
pub trait InventoryStore: Send + Sync {
    /// Open a read-only scope observing one consistent view of the inventory.
    async fn begin_read_only(&self) -> Result<Box<dyn ReadOnlyScope>, StoreError>;
}

/// A read-only unit of work against an [`InventoryStore`].
#[async_trait]
pub trait ReadOnlyScope: Send {
    /// Fetch every record whose SKU appears in `codes`.
    ///
    /// Duplicate codes are allowed and yield at most one record per SKU.
    /// Codes without a record yield nothing.
    async fn find_by_sku_code_in(
        &mut self,
        codes: &[SkuCode],
    ) -> Result<Vec<InventoryRecord>, StoreError>;

    /// Close the scope.
    async fn release(self: Box<Self>) -> Result<(), StoreError>;
}

#[async_trait]
impl<S> InventoryStore for Arc<S>
where
    S: InventoryStore + ?Sized,
{
    async fn begin_read_only(&self) -> Result<Box<dyn ReadOnlyScope>, StoreError> {
        (**self).begin_read_only().await
    }
}
