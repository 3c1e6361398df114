//! Store configuration

use crate::error::{StoreError, StoreResult};
use serde::{Deserialize, Serialize};

/// Configuration for a [`SerialStore`](crate::SerialStore)
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct StoreConfig {
    /// Worker thread name, also used as the log label
    pub name: String,

    /// Depth of the request queue. 1 keeps the hand-off close to a rendezvous.
    pub channel_capacity: usize,

    /// Number of entries to pre-allocate in the map
    pub initial_capacity: usize,
}

impl StoreConfig {
    /// Parse a configuration from a JSON document. Missing fields take their defaults.
    pub fn from_json(json: &str) -> StoreResult<Self> {
        let config: StoreConfig =
            serde_json::from_str(json).map_err(|e| StoreError::InvalidConfig(e.to_string()))?;
        config.validate()?;
        Ok(config)
    }

    /// Check the configuration before a worker is started
    pub fn validate(&self) -> StoreResult<()> {
        if self.channel_capacity == 0 {
            return Err(StoreError::InvalidConfig(
                "channel_capacity must be at least 1".to_string(),
            ));
        }
        if self.name.is_empty() || self.name.contains('\0') {
            return Err(StoreError::InvalidConfig(
                "name must be non-empty and free of NUL bytes".to_string(),
            ));
        }
        Ok(())
    }
}

impl Default for StoreConfig {
    fn default() -> Self {
        StoreConfig {
            name: "serialstore".to_string(),
            channel_capacity: 1,
            initial_capacity: 0,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_is_valid() {
        let config = StoreConfig::default();
        assert!(config.validate().is_ok());
        assert_eq!(config.channel_capacity, 1);
    }

    #[test]
    fn test_from_json_partial() {
        let config = StoreConfig::from_json(r#"{ "name": "sessions", "initial_capacity": 256 }"#).unwrap();
        assert_eq!(config.name, "sessions");
        assert_eq!(config.initial_capacity, 256);
        assert_eq!(config.channel_capacity, 1);
    }

    #[test]
    fn test_zero_capacity_rejected() {
        let err = StoreConfig::from_json(r#"{ "channel_capacity": 0 }"#).unwrap_err();
        assert!(matches!(err, StoreError::InvalidConfig(_)));
    }

    #[test]
    fn test_malformed_json_rejected() {
        let err = StoreConfig::from_json("{ name: ").unwrap_err();
        assert!(matches!(err, StoreError::InvalidConfig(_)));
    }
}
