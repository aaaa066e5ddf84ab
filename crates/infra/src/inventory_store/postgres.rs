//! Postgres-backed inventory store.
//!
//! Records live in a single `inventory` table keyed by `sku_code`. Every read
//! runs inside a `READ ONLY` transaction opened by
//! [`InventoryStore::begin_read_only`]; the transaction commits on
//! [`ReadOnlyScope::release`] and rolls back when the scope is dropped.
//!
//! ## Error Mapping
//!
//! | SQLx Error | StoreError | Scenario |
//! |------------|------------|----------|
//! | `PoolTimedOut`, `PoolClosed`, `Io`, `Tls` | `Unavailable` | Database unreachable or pool exhausted |
//! | `ColumnNotFound`, `ColumnDecode`, `Decode` | `Decode` | Row shape does not match the schema |
//! | `Database` and anything else | `Query` | Statement failed to execute |

use std::sync::Arc;

use async_trait::async_trait;
use sqlx::postgres::{PgPoolOptions, PgRow};
use sqlx::{FromRow, PgPool, Postgres, Row, Transaction};
use tracing::{Span, instrument};

use stockcheck_core::SkuCode;
use stockcheck_inventory::InventoryRecord;

use super::{InventoryStore, ReadOnlyScope, StoreError};
use crate::config::DatabaseConfig;

const CREATE_INVENTORY_TABLE: &str = r#"
    CREATE TABLE IF NOT EXISTS inventory (
        sku_code TEXT PRIMARY KEY,
        quantity BIGINT NOT NULL CHECK (quantity >= 0)
    )
"#;

/// Postgres-backed inventory store.
///
/// Uses the SQLx connection pool, which is `Send + Sync`; each read-only
/// scope checks out its own connection for the lifetime of its transaction.
#[derive(Debug, Clone)]
pub struct PostgresInventoryStore {
    pool: Arc<PgPool>,
}

impl PostgresInventoryStore {
    /// Create a new PostgresInventoryStore with the given connection pool.
    pub fn new(pool: PgPool) -> Self {
        Self {
            pool: Arc::new(pool),
        }
    }

    /// Open a pool from `config` and wrap it.
    #[instrument(skip(config), fields(max_connections = config.max_connections), err)]
    pub async fn connect(config: &DatabaseConfig) -> Result<Self, StoreError> {
        let pool = PgPoolOptions::new()
            .max_connections(config.max_connections)
            .acquire_timeout(config.acquire_timeout)
            .connect(&config.url)
            .await
            .map_err(|e| map_sqlx_error("connect", e))?;
        Ok(Self::new(pool))
    }

    /// Create the `inventory` table if it does not exist yet.
    #[instrument(skip(self), err)]
    pub async fn ensure_schema(&self) -> Result<(), StoreError> {
        sqlx::query(CREATE_INVENTORY_TABLE)
            .execute(&*self.pool)
            .await
            .map_err(|e| map_sqlx_error("ensure_schema", e))?;
        Ok(())
    }
}

#[async_trait]
impl InventoryStore for PostgresInventoryStore {
    #[instrument(skip(self), err)]
    async fn begin_read_only(&self) -> Result<Box<dyn ReadOnlyScope>, StoreError> {
        let mut tx = self
            .pool
            .begin()
            .await
            .map_err(|e| map_sqlx_error("begin_transaction", e))?;

        // Must be the first statement of the transaction.
        sqlx::query("SET TRANSACTION READ ONLY")
            .execute(&mut *tx)
            .await
            .map_err(|e| map_sqlx_error("set_transaction_read_only", e))?;

        Ok(Box::new(PostgresReadScope { tx }))
    }
}

/// A `READ ONLY` transaction. Dropping it without `release` rolls it back.
struct PostgresReadScope {
    tx: Transaction<'static, Postgres>,
}

#[async_trait]
impl ReadOnlyScope for PostgresReadScope {
    #[instrument(skip(self, codes), fields(requested = codes.len(), found = tracing::field::Empty), err)]
    async fn find_by_sku_code_in(
        &mut self,
        codes: &[SkuCode],
    ) -> Result<Vec<InventoryRecord>, StoreError> {
        if codes.is_empty() {
            return Ok(vec![]);
        }

        let keys: Vec<String> = codes.iter().map(|c| c.as_str().to_owned()).collect();

        let rows = sqlx::query(
            r#"
            SELECT
                sku_code,
                quantity
            FROM inventory
            WHERE sku_code = ANY($1)
            ORDER BY sku_code ASC
            "#,
        )
        .bind(keys)
        .fetch_all(&mut *self.tx)
        .await
        .map_err(|e| map_sqlx_error("find_by_sku_code_in", e))?;

        let mut records = Vec::with_capacity(rows.len());
        for row in rows {
            let row = InventoryRow::from_row(&row).map_err(|e| map_sqlx_error("decode_row", e))?;
            records.push(row.into_record()?);
        }

        Span::current().record("found", records.len());
        Ok(records)
    }

    async fn release(self: Box<Self>) -> Result<(), StoreError> {
        let scope = *self;
        scope
            .tx
            .commit()
            .await
            .map_err(|e| map_sqlx_error("commit_transaction", e))
    }
}

/// Raw `inventory` row, before domain validation.
#[derive(Debug, Clone, PartialEq, Eq)]
struct InventoryRow {
    sku_code: String,
    quantity: i64,
}

impl InventoryRow {
    fn into_record(self) -> Result<InventoryRecord, StoreError> {
        InventoryRecord::new(self.sku_code, self.quantity)
            .map_err(|e| StoreError::Decode(e.to_string()))
    }
}

impl<'r> FromRow<'r, PgRow> for InventoryRow {
    fn from_row(row: &'r PgRow) -> Result<Self, sqlx::Error> {
        Ok(Self {
            sku_code: row.try_get("sku_code")?,
            quantity: row.try_get("quantity")?,
        })
    }
}

/// Map SQLx errors to StoreError.
fn map_sqlx_error(operation: &str, err: sqlx::Error) -> StoreError {
    match err {
        sqlx::Error::PoolTimedOut => {
            StoreError::Unavailable(format!("connection pool timed out in {operation}"))
        }
        sqlx::Error::PoolClosed => {
            StoreError::Unavailable(format!("connection pool closed in {operation}"))
        }
        sqlx::Error::Io(e) => StoreError::Unavailable(format!("io error in {operation}: {e}")),
        sqlx::Error::Tls(e) => StoreError::Unavailable(format!("tls error in {operation}: {e}")),
        sqlx::Error::ColumnNotFound(column) => {
            StoreError::Decode(format!("column '{column}' not found in {operation}"))
        }
        sqlx::Error::ColumnDecode { index, source } => StoreError::Decode(format!(
            "failed to decode column {index} in {operation}: {source}"
        )),
        sqlx::Error::Decode(e) => StoreError::Decode(format!("decode error in {operation}: {e}")),
        sqlx::Error::Database(db_err) => StoreError::Query(format!(
            "database error in {operation}: {}",
            db_err.message()
        )),
        other => StoreError::Query(format!("sqlx error in {operation}: {other}")),
    }
}
