use serde::Serialize;

use stockcheck_core::{DomainError, DomainResult, SkuCode};

/// Persisted stock state of one SKU.
///
/// Records are owned by the inventory store and are read-only snapshots from
/// the point of view of this crate.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct InventoryRecord {
    sku_code: SkuCode,
    quantity: i64,
}

impl InventoryRecord {
    /// Build a record, rejecting negative quantities.
    pub fn new(sku_code: impl Into<SkuCode>, quantity: i64) -> DomainResult<Self> {
        if quantity < 0 {
            return Err(DomainError::validation(format!(
                "quantity cannot be negative (sku={}, quantity={quantity})",
                sku_code.into()
            )));
        }
        Ok(Self {
            sku_code: sku_code.into(),
            quantity,
        })
    }

    pub fn sku_code(&self) -> &SkuCode {
        &self.sku_code
    }

    pub fn quantity(&self) -> i64 {
        self.quantity
    }

    /// Strictly positive quantity.
    pub fn is_in_stock(&self) -> bool {
        self.quantity > 0
    }
}
