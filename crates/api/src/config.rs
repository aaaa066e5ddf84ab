//! Process configuration for the API binary.

use std::net::SocketAddr;

use stockcheck_infra::config::{self as infra_config, ConfigError, DatabaseConfig};
use stockcheck_inventory::InventoryRecord;

pub const BIND_ADDR: &str = "BIND_ADDR";

const DEFAULT_BIND_ADDR: &str = "0.0.0.0:8080";

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ApiConfig {
    pub bind_addr: SocketAddr,
    /// `None` selects the in-memory store.
    pub database: Option<DatabaseConfig>,
    /// Records loaded into the in-memory store at startup.
    pub seed: Vec<InventoryRecord>,
}

impl ApiConfig {
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self, ConfigError> {
        let raw_addr = lookup(BIND_ADDR).unwrap_or_else(|| DEFAULT_BIND_ADDR.to_string());
        let bind_addr = raw_addr.trim().parse::<SocketAddr>().map_err(|e| {
            ConfigError::invalid(BIND_ADDR, format!("'{raw_addr}' is not a socket address: {e}"))
        })?;

        let database = DatabaseConfig::from_lookup(&lookup)?;

        let seed = match lookup(infra_config::INVENTORY_SEED) {
            Some(raw) => infra_config::parse_seed(&raw)?,
            None => vec![],
        };

        Ok(Self {
            bind_addr,
            database,
            seed,
        })
    }
}

#[cfg(test)]
mod tests {
    use std::collections::HashMap;

    use super::*;

    fn lookup(pairs: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let map: HashMap<String, String> = pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        move |key| map.get(key).cloned()
    }

    #[test]
    fn defaults_to_in_memory_on_port_8080() {
        let cfg = ApiConfig::from_lookup(lookup(&[])).unwrap();
        assert_eq!(cfg.bind_addr, "0.0.0.0:8080".parse().unwrap());
        assert_eq!(cfg.database, None);
        assert!(cfg.seed.is_empty());
    }

    #[test]
    fn reads_bind_addr_database_and_seed() {
        let cfg = ApiConfig::from_lookup(lookup(&[
            (BIND_ADDR, "127.0.0.1:9000"),
            (infra_config::DATABASE_URL, "postgres://db/inventory"),
            (infra_config::INVENTORY_SEED, "A1=5,B2=0"),
        ]))
        .unwrap();

        assert_eq!(cfg.bind_addr, "127.0.0.1:9000".parse().unwrap());
        assert_eq!(cfg.database.unwrap().url, "postgres://db/inventory");
        assert_eq!(cfg.seed.len(), 2);
    }

    #[test]
    fn bad_bind_addr_is_rejected() {
        let err = ApiConfig::from_lookup(lookup(&[(BIND_ADDR, "localhost")])).unwrap_err();
        assert!(matches!(err, ConfigError::Invalid { key: BIND_ADDR, .. }));
    }
}
