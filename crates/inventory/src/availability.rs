use serde::{Deserialize, Serialize};

use stockcheck_core::{SkuCode, ValueObject};

use crate::record::InventoryRecord;

/// Availability answer for one SKU, as returned to callers.
///
/// Serialized as `{"skuCode": "...", "isInStock": true}`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AvailabilityEntry {
    pub sku_code: SkuCode,
    pub is_in_stock: bool,
}

impl ValueObject for AvailabilityEntry {}

impl AvailabilityEntry {
    pub fn from_record(record: &InventoryRecord) -> Self {
        Self {
            sku_code: record.sku_code().clone(),
            is_in_stock: record.is_in_stock(),
        }
    }
}

impl From<&InventoryRecord> for AvailabilityEntry {
    fn from(record: &InventoryRecord) -> Self {
        Self::from_record(record)
    }
}
