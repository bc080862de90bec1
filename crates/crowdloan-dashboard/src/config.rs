//! Dashboard configuration.
//!
//! [`DashboardConfig`] is layered: built-in defaults, then an optional TOML
//! file, then `CROWDLOAN__*` environment variables. Nested keys use `__` as
//! the separator, e.g. `CROWDLOAN__INCENTIVES__TARGET_AUCTION_ID=5`.

use std::path::{Path, PathBuf};

use config::{Config, Environment, File, FileFormat, Map};
use serde::{Deserialize, Serialize};

use crowdloan_core::config::IncentiveConfig;
use crowdloan_core::constants::{BLOCK_TIME_MS, OWN_CROWDLOAN_BLOCK_NUM, OWN_PARACHAIN_ID};
use crowdloan_core::error::ConfigError;

/// Prefix of environment variables read by [`DashboardConfig::load`].
pub const ENV_PREFIX: &str = "CROWDLOAN";

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct DashboardConfig {
    /// Home crowdloan, as `<para id>-<fund account>`.
    pub own_parachain_id: String,
    /// Only data newer than this block is fetched for the home crowdloan.
    pub own_crowdloan_block_num: u64,
    /// Chronicle polling interval.
    pub block_time_ms: u64,
    pub indexer_url: String,
    pub node_url: String,
    /// Log level filter string (e.g. "info", "crowdloan_incentives=debug").
    pub log_level: String,
    pub incentives: IncentiveConfig,
}

impl Default for DashboardConfig {
    fn default() -> Self {
        Self {
            own_parachain_id: OWN_PARACHAIN_ID.to_string(),
            own_crowdloan_block_num: OWN_CROWDLOAN_BLOCK_NUM,
            block_time_ms: BLOCK_TIME_MS,
            indexer_url: "https://ksm-arch.hydration.cloud/".to_string(),
            node_url: "wss://ksm-arch.hydration.cloud:1144".to_string(),
            log_level: "info".to_string(),
            incentives: IncentiveConfig::default(),
        }
    }
}

impl DashboardConfig {
    /// `<config dir>/crowdloan-dashboard/config.toml`.
    pub fn default_path() -> PathBuf {
        dirs::config_dir()
            .unwrap_or_else(|| PathBuf::from("."))
            .join("crowdloan-dashboard")
            .join("config.toml")
    }

    /// Load from `path` (or the default path, if it exists) and the process
    /// environment.
    pub fn load(path: Option<&Path>) -> Result<Self, ConfigError> {
        Self::load_with_env(path, None)
    }

    /// Like [`load`](Self::load), reading variables from `env` instead of
    /// the process environment when given.
    pub fn load_with_env(
        path: Option<&Path>,
        env: Option<Map<String, String>>,
    ) -> Result<Self, ConfigError> {
        let file = match path {
            Some(p) => File::from(p).format(FileFormat::Toml).required(true),
            None => File::from(Self::default_path())
                .format(FileFormat::Toml)
                .required(false),
        };
        let cfg: Self = Config::builder()
            .add_source(file)
            .add_source(
                Environment::with_prefix(ENV_PREFIX)
                    .prefix_separator("__")
                    .separator("__")
                    .try_parsing(true)
                    .source(env),
            )
            .build()
            .and_then(Config::try_deserialize)
            .map_err(|e| ConfigError::Load(e.to_string()))?;
        cfg.validate()?;
        Ok(cfg)
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.own_parachain_id.is_empty() {
            return Err(ConfigError::Empty { name: "own_parachain_id" });
        }
        if self.block_time_ms == 0 {
            return Err(ConfigError::NotPositive { name: "block_time_ms" });
        }
        self.incentives.validate()
    }
}
