//! Configuration for a store instance and its connection pool.

use std::time::Duration;

/// Store configuration: keyspace count and connection-pool sizing.
#[derive(Debug, Clone)]
pub struct StoreConfig {
    /// Number of independent logical databases
    pub databases: u16,
    /// Maximum connections a pool hands out concurrently
    pub max_connections: usize,
    /// How long `acquire` waits for a free connection before failing
    pub acquire_timeout: Duration,
}

impl StoreConfig {
    /// Conventional sizing: 16 databases, 8 pooled connections.
    pub fn standard() -> Self {
        Self {
            databases: 16,
            max_connections: 8,
            acquire_timeout: Duration::from_secs(5),
        }
    }

    /// Tight sizing for tests: 2 databases, 2 connections, short timeout.
    pub fn minimal() -> Self {
        Self {
            databases: 2,
            max_connections: 2,
            acquire_timeout: Duration::from_millis(100),
        }
    }

    /// Validate all configuration parameters.
    pub fn validate(&self) -> Result<(), String> {
        if self.databases == 0 {
            return Err("databases must be > 0".into());
        }
        if self.max_connections == 0 {
            return Err("max_connections must be > 0".into());
        }
        if self.acquire_timeout.as_millis() == 0 {
            return Err("acquire_timeout must be > 0".into());
        }
        Ok(())
    }
}

impl Default for StoreConfig {
    fn default() -> Self {
        Self::standard()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_presets_valid() {
        assert!(StoreConfig::standard().validate().is_ok());
        assert!(StoreConfig::minimal().validate().is_ok());
    }

    #[test]
    fn test_zero_databases_rejected() {
        let mut config = StoreConfig::default();
        config.databases = 0;
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_zero_connections_rejected() {
        let mut config = StoreConfig::default();
        config.max_connections = 0;
        assert!(config.validate().is_err());
    }
}
