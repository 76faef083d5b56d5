//! Configuration types for DecisionEngine

use fraudgate_core::Console;
use serde::{Deserialize, Serialize};
use std::time::Duration;

/// Main engine configuration
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EngineConfig {
    /// Console used when a charge does not carry one
    #[serde(default)]
    pub default_console: Console,

    /// Fetch candidates for all components concurrently
    #[serde(default = "default_concurrent_fetch")]
    pub concurrent_fetch: bool,

    /// Timeout for each repository call, in milliseconds
    #[serde(default = "default_fetch_timeout_ms")]
    pub fetch_timeout_ms: u64,

    /// Timeout for each score lookup, in milliseconds
    #[serde(default = "default_score_timeout_ms")]
    pub score_timeout_ms: u64,
}

fn default_concurrent_fetch() -> bool {
    true
}

fn default_fetch_timeout_ms() -> u64 {
    2000
}

fn default_score_timeout_ms() -> u64 {
    500
}

impl EngineConfig {
    /// Create a new engine configuration
    pub fn new() -> Self {
        Self {
            default_console: Console::default(),
            concurrent_fetch: default_concurrent_fetch(),
            fetch_timeout_ms: default_fetch_timeout_ms(),
            score_timeout_ms: default_score_timeout_ms(),
        }
    }

    pub fn with_default_console(mut self, console: Console) -> Self {
        self.default_console = console;
        self
    }

    pub fn with_concurrent_fetch(mut self, enable: bool) -> Self {
        self.concurrent_fetch = enable;
        self
    }

    pub fn with_fetch_timeout(mut self, timeout: Duration) -> Self {
        self.fetch_timeout_ms = timeout.as_millis() as u64;
        self
    }

    pub fn with_score_timeout(mut self, timeout: Duration) -> Self {
        self.score_timeout_ms = timeout.as_millis() as u64;
        self
    }

    pub fn fetch_timeout(&self) -> Duration {
        Duration::from_millis(self.fetch_timeout_ms)
    }

    pub fn score_timeout(&self) -> Duration {
        Duration::from_millis(self.score_timeout_ms)
    }
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let config = EngineConfig::default();
        assert!(config.concurrent_fetch);
        assert_eq!(config.fetch_timeout(), Duration::from_secs(2));
        assert_eq!(config.score_timeout(), Duration::from_millis(500));
        assert_eq!(config.default_console.len(), 9);
    }

    #[test]
    fn test_partial_deserialize() {
        let config: EngineConfig =
            serde_json::from_str(r#"{"concurrent_fetch": false, "fetch_timeout_ms": 250}"#).unwrap();
        assert!(!config.concurrent_fetch);
        assert_eq!(config.fetch_timeout(), Duration::from_millis(250));
        assert_eq!(config.score_timeout_ms, 500);
        assert_eq!(config.default_console, Console::default());
    }
}
