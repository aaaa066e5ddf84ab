use std::sync::Arc;

use anyhow::Context;

use stockcheck_infra::{AvailabilityResolver, InMemoryInventoryStore, InventoryStore, PostgresInventoryStore};

use crate::config::ApiConfig;

/// Resolver over whichever store the process was configured with.
pub type Availability = AvailabilityResolver<Arc<dyn InventoryStore>>;

#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub enum Backend {
    InMemory,
    Postgres,
}

impl Backend {
    pub fn as_str(&self) -> &'static str {
        match self {
            Backend::InMemory => "in_memory",
            Backend::Postgres => "postgres",
        }
    }
}

#[derive(Clone)]
pub struct AppServices {
    backend: Backend,
    availability: Availability,
}

impl AppServices {
    pub fn new(backend: Backend, store: Arc<dyn InventoryStore>) -> Self {
        Self {
            backend,
            availability: AvailabilityResolver::new(store),
        }
    }

    pub fn in_memory(store: InMemoryInventoryStore) -> Self {
        Self::new(Backend::InMemory, Arc::new(store))
    }

    pub fn postgres(store: PostgresInventoryStore) -> Self {
        Self::new(Backend::Postgres, Arc::new(store))
    }

    pub fn backend(&self) -> Backend {
        self.backend
    }

    pub fn availability(&self) -> &Availability {
        &self.availability
    }
}

/// Select and prepare the inventory store described by `config`.
pub async fn build_services(config: &ApiConfig) -> anyhow::Result<AppServices> {
    let services = match &config.database {
        Some(db) => {
            if !config.seed.is_empty() {
                tracing::warn!(
                    records = config.seed.len(),
                    "INVENTORY_SEED is ignored when DATABASE_URL is set"
                );
            }

            let store = PostgresInventoryStore::connect(db)
                .await
                .context("failed to connect to Postgres")?;
            store
                .ensure_schema()
                .await
                .context("failed to prepare inventory schema")?;
            AppServices::postgres(store)
        }
        None => {
            tracing::warn!("DATABASE_URL not set; using in-memory inventory store");
            AppServices::in_memory(InMemoryInventoryStore::with_records(config.seed.iter().cloned()))
        }
    };

    tracing::info!(backend = services.backend().as_str(), "inventory store ready");
    Ok(services)
}

#[cfg(test)]
mod tests {
    use super::*;
    use stockcheck_core::SkuCode;
    use stockcheck_inventory::InventoryRecord;

    #[tokio::test]
    async fn without_database_the_seed_is_served_from_memory() {
        let config = ApiConfig {
            bind_addr: "127.0.0.1:0".parse().unwrap(),
            database: None,
            seed: vec![InventoryRecord::new("A1", 2).unwrap()],
        };

        let services = build_services(&config).await.unwrap();
        assert_eq!(services.backend(), Backend::InMemory);

        let entries = services
            .availability()
            .is_in_stock(&[SkuCode::from("A1")])
            .await
            .unwrap();
        assert_eq!(entries.len(), 1);
        assert!(entries[0].is_in_stock);
    }
}
