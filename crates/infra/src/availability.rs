//! Batch stock-availability lookup.

use tracing::{Span, instrument};

use stockcheck_core::SkuCode;
use stockcheck_inventory::AvailabilityEntry;

use crate::inventory_store::{InventoryStore, StoreError};

/// Answers "which of these SKUs have stock?" against an [`InventoryStore`].
///
/// Each call runs in its own read-only scope, so all entries of one answer
/// come from the same view of the inventory. Store failures are returned as
/// is; there is no retry and no partial result.
#[derive(Debug, Clone)]
pub struct AvailabilityResolver<S> {
    store: S,
}

impl<S> AvailabilityResolver<S>
where
    S: InventoryStore,
{
    pub fn new(store: S) -> Self {
        Self { store }
    }

    pub fn store(&self) -> &S {
        &self.store
    }

    /// One entry per requested SKU that has a record; unknown SKUs are omitted.
    ///
    /// Duplicates in `sku_codes` are passed through to the store, which
    /// returns at most one record per SKU.
    #[instrument(
        skip(self, sku_codes),
        fields(requested = sku_codes.len(), matched = tracing::field::Empty),
        err
    )]
    pub async fn is_in_stock(&self, sku_codes: &[SkuCode]) -> Result<Vec<AvailabilityEntry>, StoreError> {
        let mut scope = self.store.begin_read_only().await?;
        let records = scope.find_by_sku_code_in(sku_codes).await?;
        scope.release().await?;

        let entries: Vec<AvailabilityEntry> = records.iter().map(AvailabilityEntry::from_record).collect();

        Span::current().record("matched", entries.len());
        Ok(entries)
    }
}
