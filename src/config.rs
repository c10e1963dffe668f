//! Fetcher configuration.

use serde::{Deserialize, Serialize};
use std::time::Duration;

use crate::strategy::DrainPolicy;

/// Fetcher configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FetcherConfig {
    /// Whether the initial fetch waits for an item.
    #[serde(default = "default_block")]
    pub block: bool,

    /// Maximum wait for the initial fetch, in milliseconds.
    #[serde(default = "default_timeout_ms")]
    pub timeout_ms: u64,

    /// Drain strategy; `Auto` probes the queue at construction.
    #[serde(default)]
    pub drain: DrainPolicy,
}

fn default_block() -> bool {
    true
}

fn default_timeout_ms() -> u64 {
    100
}

impl FetcherConfig {
    /// Initial fetch timeout as a [`Duration`].
    pub fn timeout(&self) -> Duration {
        Duration::from_millis(self.timeout_ms)
    }
}

impl Default for FetcherConfig {
    fn default() -> Self {
        Self {
            block: default_block(),
            timeout_ms: default_timeout_ms(),
            drain: DrainPolicy::default(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let config = FetcherConfig::default();
        assert!(config.block);
        assert_eq!(config.timeout(), Duration::from_millis(100));
        assert_eq!(config.drain, DrainPolicy::Auto);
    }

    #[test]
    fn test_deserialize_empty() {
        let config: FetcherConfig = serde_json::from_str("{}").unwrap();
        assert!(config.block);
        assert_eq!(config.timeout_ms, 100);
    }

    #[test]
    fn test_deserialize_override() {
        let config: FetcherConfig =
            serde_json::from_str(r#"{"block": false, "timeout_ms": 250, "drain": "exhaustive"}"#)
                .unwrap();
        assert!(!config.block);
        assert_eq!(config.timeout_ms, 250);
        assert_eq!(config.drain, DrainPolicy::Exhaustive);
    }
}
