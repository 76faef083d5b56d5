//! Server configuration

use fraudgate_core::Console;
use fraudgate_runtime::ScoreClientConfig;
use fraudgate_sdk::EngineConfig;
use serde::{Deserialize, Serialize};
use std::path::PathBuf;

/// Server configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ServerConfig {
    /// Server host
    #[serde(default = "default_host")]
    pub host: String,

    /// Server port (HTTP)
    #[serde(default = "default_port")]
    pub port: u16,

    /// Log level used when `RUST_LOG` is unset
    #[serde(default = "default_log_level")]
    pub log_level: String,

    /// YAML seed with rules, list entries and families loaded at startup
    #[serde(default)]
    pub seed_file: Option<PathBuf>,

    /// Timeout for each repository call, in milliseconds
    #[serde(default = "default_fetch_timeout_ms")]
    pub fetch_timeout_ms: u64,

    /// Timeout for each score lookup, in milliseconds
    #[serde(default = "default_score_timeout_ms")]
    pub score_timeout_ms: u64,

    /// Fetch component candidates concurrently
    #[serde(default = "default_concurrent_fetch")]
    pub concurrent_fetch: bool,

    /// Omniscore endpoint; the score reads as -1 when unset
    #[serde(default)]
    pub omniscore: Option<ScoreClientConfig>,

    /// Merchant-score endpoint; the score reads as -1 when unset
    #[serde(default)]
    pub merchant_score: Option<ScoreClientConfig>,

    /// Console for charges that do not carry one
    #[serde(default)]
    pub default_console: Option<Console>,
}

fn default_host() -> String {
    "127.0.0.1".to_string()
}

fn default_port() -> u16 {
    8080
}

fn default_log_level() -> String {
    "info".to_string()
}

fn default_fetch_timeout_ms() -> u64 {
    2000
}

fn default_score_timeout_ms() -> u64 {
    500
}

fn default_concurrent_fetch() -> bool {
    true
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: default_host(),
            port: default_port(),
            log_level: default_log_level(),
            seed_file: None,
            fetch_timeout_ms: default_fetch_timeout_ms(),
            score_timeout_ms: default_score_timeout_ms(),
            concurrent_fetch: default_concurrent_fetch(),
            omniscore: None,
            merchant_score: None,
            default_console: None,
        }
    }
}

impl ServerConfig {
    /// Load configuration from environment variables and config file
    pub fn load() -> anyhow::Result<Self> {
        // Load .env file if exists
        dotenvy::dotenv().ok();

        let config_result = config::Config::builder()
            .add_source(config::File::with_name("config/server").required(false))
            .add_source(config::Environment::with_prefix("FRAUDGATE"))
            .build();

        match config_result {
            Ok(cfg) => cfg
                .try_deserialize()
                .map_err(|e| anyhow::anyhow!("Failed to deserialize config: {}", e)),
            Err(e) => {
                tracing::info!("No usable config source ({}), using default configuration", e);
                Ok(Self::default())
            }
        }
    }

    /// Engine settings derived from this configuration
    pub fn engine_config(&self) -> EngineConfig {
        let config = EngineConfig::new()
            .with_concurrent_fetch(self.concurrent_fetch)
            .with_fetch_timeout(std::time::Duration::from_millis(self.fetch_timeout_ms))
            .with_score_timeout(std::time::Duration::from_millis(self.score_timeout_ms));

        match &self.default_console {
            Some(console) => config.with_default_console(console.clone()),
            None => config,
        }
    }

    /// Default `EnvFilter` directives for the configured log level
    pub fn log_directives(&self) -> String {
        let level = &self.log_level;
        format!(
            "fraudgate_server={level},fraudgate_sdk={level},fraudgate_runtime={level},fraudgate_repository={level},tower_http=debug"
        )
    }
}
