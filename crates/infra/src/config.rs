//! Configuration loading and representation.
//!
//! Values come from environment variables. Loading goes through a lookup
//! function so tests can feed a fixed map instead of mutating the process
//! environment.

use std::time::Duration;

use thiserror::Error;

use stockcheck_inventory::InventoryRecord;

pub const DATABASE_URL: &str = "DATABASE_URL";
pub const DATABASE_MAX_CONNECTIONS: &str = "DATABASE_MAX_CONNECTIONS";
pub const DATABASE_ACQUIRE_TIMEOUT_SECS: &str = "DATABASE_ACQUIRE_TIMEOUT_SECS";
pub const INVENTORY_SEED: &str = "INVENTORY_SEED";

const DEFAULT_MAX_CONNECTIONS: u32 = 5;
const DEFAULT_ACQUIRE_TIMEOUT_SECS: u64 = 5;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ConfigError {
    #[error("invalid value for {key}: {message}")]
    Invalid { key: &'static str, message: String },
}

impl ConfigError {
    pub fn invalid(key: &'static str, message: impl Into<String>) -> Self {
        Self::Invalid {
            key,
            message: message.into(),
        }
    }
}

/// Postgres connection settings.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DatabaseConfig {
    pub url: String,
    pub max_connections: u32,
    pub acquire_timeout: Duration,
}

impl DatabaseConfig {
    /// Read settings from the process environment.
    ///
    /// Returns `Ok(None)` when `DATABASE_URL` is unset or blank.
    pub fn from_env() -> Result<Option<Self>, ConfigError> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Option<Self>, ConfigError> {
        let url = match lookup(DATABASE_URL) {
            Some(url) if !url.trim().is_empty() => url.trim().to_string(),
            _ => return Ok(None),
        };

        let max_connections = match lookup(DATABASE_MAX_CONNECTIONS) {
            Some(raw) => parse_positive(DATABASE_MAX_CONNECTIONS, &raw)?,
            None => DEFAULT_MAX_CONNECTIONS,
        };

        let acquire_timeout_secs = match lookup(DATABASE_ACQUIRE_TIMEOUT_SECS) {
            Some(raw) => parse_positive(DATABASE_ACQUIRE_TIMEOUT_SECS, &raw)?,
            None => DEFAULT_ACQUIRE_TIMEOUT_SECS,
        };

        Ok(Some(Self {
            url,
            max_connections,
            acquire_timeout: Duration::from_secs(acquire_timeout_secs),
        }))
    }
}

fn parse_positive<T>(key: &'static str, raw: &str) -> Result<T, ConfigError>
where
    T: core::str::FromStr + PartialOrd + Default,
{
    match raw.trim().parse::<T>() {
        Ok(v) if v > T::default() => Ok(v),
        _ => Err(ConfigError::invalid(key, format!("expected a positive integer, got '{raw}'"))),
    }
}

/// Parse `INVENTORY_SEED`-style data: `sku=qty` pairs separated by commas.
///
/// Blank entries are skipped. A missing `=`, an empty SKU, or a quantity that
/// is not a non-negative integer is an error.
pub fn parse_seed(raw: &str) -> Result<Vec<InventoryRecord>, ConfigError> {
    let mut records = Vec::new();
    for entry in raw.split(',').map(str::trim).filter(|e| !e.is_empty()) {
        let (sku, quantity) = entry
            .split_once('=')
            .ok_or_else(|| ConfigError::invalid(INVENTORY_SEED, format!("expected sku=qty, got '{entry}'")))?;

        let sku = sku.trim();
        if sku.is_empty() {
            return Err(ConfigError::invalid(INVENTORY_SEED, format!("empty sku in '{entry}'")));
        }

        let quantity: i64 = quantity.trim().parse().map_err(|_| {
            ConfigError::invalid(INVENTORY_SEED, format!("invalid quantity in '{entry}'"))
        })?;

        let record = InventoryRecord::new(sku, quantity)
            .map_err(|e| ConfigError::invalid(INVENTORY_SEED, e.to_string()))?;
        records.push(record);
    }
    Ok(records)
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
    fn missing_url_means_no_database() {
        assert_eq!(DatabaseConfig::from_lookup(lookup(&[])).unwrap(), None);
        assert_eq!(
            DatabaseConfig::from_lookup(lookup(&[(DATABASE_URL, "  ")])).unwrap(),
            None
        );
    }

    #[test]
    fn defaults_apply_when_only_url_is_set() {
        let cfg = DatabaseConfig::from_lookup(lookup(&[(DATABASE_URL, "postgres://localhost/inventory")]))
            .unwrap()
            .unwrap();
        assert_eq!(cfg.url, "postgres://localhost/inventory");
        assert_eq!(cfg.max_connections, 5);
        assert_eq!(cfg.acquire_timeout, Duration::from_secs(5));
    }

    #[test]
    fn overrides_are_parsed() {
        let cfg = DatabaseConfig::from_lookup(lookup(&[
            (DATABASE_URL, "postgres://db/inventory"),
            (DATABASE_MAX_CONNECTIONS, "12"),
            (DATABASE_ACQUIRE_TIMEOUT_SECS, "30"),
        ]))
        .unwrap()
        .unwrap();
        assert_eq!(cfg.max_connections, 12);
        assert_eq!(cfg.acquire_timeout, Duration::from_secs(30));
    }

    #[test]
    fn zero_or_garbage_pool_size_is_rejected() {
        for bad in ["0", "-1", "many"] {
            let err = DatabaseConfig::from_lookup(lookup(&[
                (DATABASE_URL, "postgres://db/inventory"),
                (DATABASE_MAX_CONNECTIONS, bad),
            ]))
            .unwrap_err();
            assert!(matches!(err, ConfigError::Invalid { key: DATABASE_MAX_CONNECTIONS, .. }));
        }
    }

    #[test]
    fn seed_parses_pairs() {
        let records = parse_seed("iphone_13=100, iphone_13_red=0,,").unwrap();
        assert_eq!(
            records,
            vec![
                InventoryRecord::new("iphone_13", 100).unwrap(),
                InventoryRecord::new("iphone_13_red", 0).unwrap(),
            ]
        );
        assert!(parse_seed("").unwrap().is_empty());
    }

    #[test]
    fn seed_rejects_malformed_entries() {
        for bad in ["A1", "=3", "A1=x", "A1=-2"] {
            let err = parse_seed(bad).unwrap_err();
            assert!(matches!(err, ConfigError::Invalid { key: INVENTORY_SEED, .. }), "{bad}");
        }
    }
}
