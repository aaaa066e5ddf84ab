use std::collections::{BTreeMap, BTreeSet};
use std::sync::Arc;

use async_trait::async_trait;
use tokio::sync::{OwnedRwLockReadGuard, RwLock};

use stockcheck_core::SkuCode;
use stockcheck_inventory::InventoryRecord;

use super::{InventoryStore, ReadOnlyScope, StoreError};

type RecordMap = BTreeMap<SkuCode, InventoryRecord>;

/// In-memory inventory store for tests/dev.
///
/// A read-only scope holds a shared read guard over the whole map, so it sees
/// one snapshot for its entire lifetime; writers wait until every open scope
/// is released.
#[derive(Debug, Clone, Default)]
pub struct InMemoryInventoryStore {
    inner: Arc<RwLock<RecordMap>>,
}

impl InMemoryInventoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Build a store pre-populated with `records` (later duplicates win).
    pub fn with_records(records: impl IntoIterator<Item = InventoryRecord>) -> Self {
        let map = records
            .into_iter()
            .map(|r| (r.sku_code().clone(), r))
            .collect::<RecordMap>();
        Self {
            inner: Arc::new(RwLock::new(map)),
        }
    }

    /// Insert or replace the record for its SKU.
    pub async fn upsert(&self, record: InventoryRecord) {
        let mut map = self.inner.write().await;
        map.insert(record.sku_code().clone(), record);
    }

    pub async fn remove(&self, sku_code: &SkuCode) -> Option<InventoryRecord> {
        self.inner.write().await.remove(sku_code)
    }

    pub async fn len(&self) -> usize {
        self.inner.read().await.len()
    }

    pub async fn is_empty(&self) -> bool {
        self.inner.read().await.is_empty()
    }
}

#[async_trait]
impl InventoryStore for InMemoryInventoryStore {
    async fn begin_read_only(&self) -> Result<Box<dyn ReadOnlyScope>, StoreError> {
        let snapshot = self.inner.clone().read_owned().await;
        Ok(Box::new(InMemoryReadScope { snapshot }))
    }
}

struct InMemoryReadScope {
    snapshot: OwnedRwLockReadGuard<RecordMap>,
}

#[async_trait]
impl ReadOnlyScope for InMemoryReadScope {
    async fn find_by_sku_code_in(
        &mut self,
        codes: &[SkuCode],
    ) -> Result<Vec<InventoryRecord>, StoreError> {
        // Set semantics: one lookup per distinct code, in SKU order.
        let wanted: BTreeSet<&str> = codes.iter().map(SkuCode::as_str).collect();
        Ok(wanted
            .into_iter()
            .filter_map(|code| self.snapshot.get(code).cloned())
            .collect())
    }

    async fn release(self: Box<Self>) -> Result<(), StoreError> {
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn record(sku: &str, quantity: i64) -> InventoryRecord {
        InventoryRecord::new(sku, quantity).unwrap()
    }

    fn codes(raw: &[&str]) -> Vec<SkuCode> {
        raw.iter().copied().map(SkuCode::from).collect()
    }

    #[tokio::test]
    async fn returns_only_matching_records() {
        let store = InMemoryInventoryStore::with_records([record("A1", 5), record("B2", 0)]);

        let mut scope = store.begin_read_only().await.unwrap();
        let found = scope
            .find_by_sku_code_in(&codes(&["C3", "B2", "A1"]))
            .await
            .unwrap();
        scope.release().await.unwrap();

        assert_eq!(found, vec![record("A1", 5), record("B2", 0)]);
    }

    #[tokio::test]
    async fn duplicate_codes_yield_one_record() {
        let store = InMemoryInventoryStore::with_records([record("A1", 3)]);

        let mut scope = store.begin_read_only().await.unwrap();
        let found = scope.find_by_sku_code_in(&codes(&["A1", "A1"])).await.unwrap();

        assert_eq!(found, vec![record("A1", 3)]);
    }

    #[tokio::test]
    async fn empty_input_yields_empty_output() {
        let store = InMemoryInventoryStore::with_records([record("A1", 3)]);

        let mut scope = store.begin_read_only().await.unwrap();
        assert!(scope.find_by_sku_code_in(&[]).await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn open_scope_sees_a_stable_snapshot() {
        let store = InMemoryInventoryStore::with_records([record("A1", 1)]);

        let mut scope = store.begin_read_only().await.unwrap();

        let writer = {
            let store = store.clone();
            tokio::spawn(async move { store.upsert(record("A1", 0)).await })
        };
        tokio::task::yield_now().await;

        let first = scope.find_by_sku_code_in(&codes(&["A1"])).await.unwrap();
        let second = scope.find_by_sku_code_in(&codes(&["A1"])).await.unwrap();
        assert_eq!(first, second);
        assert_eq!(first, vec![record("A1", 1)]);
        assert!(!writer.is_finished());

        scope.release().await.unwrap();
        writer.await.unwrap();

        let mut scope = store.begin_read_only().await.unwrap();
        let after = scope.find_by_sku_code_in(&codes(&["A1"])).await.unwrap();
        assert_eq!(after, vec![record("A1", 0)]);
    }

    #[tokio::test]
    async fn dropped_scope_releases_the_snapshot() {
        let store = InMemoryInventoryStore::new();

        {
            let _scope = store.begin_read_only().await.unwrap();
        }

        store.upsert(record("A1", 2)).await;
        assert_eq!(store.len().await, 1);
        assert_eq!(store.remove(&SkuCode::from("A1")).await, Some(record("A1", 2)));
        assert!(store.is_empty().await);
    }
}
