//! Analytics engine configuration.

use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AnalyticsConfig {
    /// History entries older than this many days are pruned on record.
    #[serde(default = "default_retention_days")]
    pub retention_days: i64,
    /// Hard cap on stored history entries per tenant.
    #[serde(default = "default_max_history_per_tenant")]
    pub max_history_per_tenant: usize,
    /// How long cached read views stay valid.
    #[serde(default = "default_cache_ttl_secs")]
    pub cache_ttl_secs: u64,
    /// Read cache capacity across all tenants and operations.
    #[serde(default = "default_cache_capacity")]
    pub cache_capacity: usize,
}

impl Default for AnalyticsConfig {
    fn default() -> Self {
        Self {
            retention_days: default_retention_days(),
            max_history_per_tenant: default_max_history_per_tenant(),
            cache_ttl_secs: default_cache_ttl_secs(),
            cache_capacity: default_cache_capacity(),
        }
    }
}

fn default_retention_days() -> i64 {
    90
}

fn default_max_history_per_tenant() -> usize {
    1000
}

fn default_cache_ttl_secs() -> u64 {
    300
}

fn default_cache_capacity() -> usize {
    256
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_are_sane() {
        let config = AnalyticsConfig::default();
        assert_eq!(config.retention_days, 90);
        assert_eq!(config.cache_ttl_secs, 300);
        assert!(config.cache_capacity > 0);
    }
}
