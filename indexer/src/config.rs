use std::path::Path;

use anyhow::{anyhow, Result};
use crowdsale_common::logger::LogLevel;
use log::{info, warn};
use serde::{Deserialize, Serialize};
use url::Url;

pub use crowdsale_common::config::VERSION;

// Sled trees, one per entity kind and one per event record kind
pub const ACCOUNTS_TREE: &str = "accounts";
pub const CROWDSALES_TREE: &str = "crowdsales";
pub const VESTING_VAULTS_TREE: &str = "vesting_vaults";
pub const VESTINGS_TREE: &str = "vestings";
pub const VESTING_WALLETS_TREE: &str = "vesting_wallets";
pub const ERC20S_TREE: &str = "erc20s";
pub const TRANSACTIONS_TREE: &str = "transactions";
pub const TOKEN_PURCHASES_TREE: &str = "token_purchases";
pub const VESTING_LOCKS_TREE: &str = "vesting_locks";
pub const VESTING_RELEASES_TREE: &str = "vesting_releases";
pub const ETHER_RELEASES_TREE: &str = "ether_releases";
pub const ERC20_RELEASES_TREE: &str = "erc20_releases";
pub const EXTRA_TREE: &str = "extra";

/// Default values for configuration
pub mod defaults {
    use super::*;

    pub const LOG_LEVEL: LogLevel = LogLevel::Info;
    pub const FILENAME_LOG: &str = "crowdsale-indexer.log";
    pub const LOGS_PATH: &str = "logs/";
    pub const DIR_PATH: &str = "ledger/";
    pub const BLOCK_TAG: BlockTag = BlockTag::Event;

    pub const REQUEST_TIMEOUT_SECS: u64 = 30;
    pub const MIN_TIMEOUT_SECS: u64 = 1;
    pub const MAX_TIMEOUT_SECS: u64 = 300;

    // Default page size for listings
    pub const LIST_LIMIT: usize = 20;
}

/// Block at which live contract state is read.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize, strum::Display)]
#[serde(rename_all = "lowercase")]
#[strum(serialize_all = "lowercase")]
#[derive(clap::ValueEnum)]
pub enum BlockTag {
    // Block of the event being handled
    Event,
    // Chain head at the time of the call
    Latest,
}

/// Indexer configuration, from the command line or a JSON file.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct IndexerConfig {
    #[serde(default = "default_log_level")]
    pub log_level: LogLevel,

    #[serde(default)]
    pub disable_file_logging: bool,

    #[serde(default)]
    pub disable_log_color: bool,

    #[serde(default = "default_filename_log")]
    pub filename_log: String,

    #[serde(default = "default_logs_path")]
    pub logs_path: String,

    /// Ledger database directory
    #[serde(default = "default_dir_path")]
    pub dir_path: String,

    /// Sled cache capacity in bytes
    #[serde(default)]
    pub cache_size: Option<u64>,

    /// Ethereum JSON-RPC endpoint used for contract reads
    #[serde(default)]
    pub rpc_url: Option<String>,

    /// JSON file with fixed contract answers, used instead of a node
    #[serde(default)]
    pub contract_state: Option<String>,

    #[serde(default = "default_block_tag")]
    pub block_tag: BlockTag,

    #[serde(default = "default_request_timeout_secs")]
    pub request_timeout_secs: u64,
}

fn default_log_level() -> LogLevel {
    defaults::LOG_LEVEL
}
fn default_filename_log() -> String {
    defaults::FILENAME_LOG.to_string()
}
fn default_logs_path() -> String {
    defaults::LOGS_PATH.to_string()
}
fn default_dir_path() -> String {
    defaults::DIR_PATH.to_string()
}
fn default_block_tag() -> BlockTag {
    defaults::BLOCK_TAG
}
fn default_request_timeout_secs() -> u64 {
    defaults::REQUEST_TIMEOUT_SECS
}

impl Default for IndexerConfig {
    fn default() -> Self {
        Self {
            log_level: default_log_level(),
            disable_file_logging: false,
            disable_log_color: false,
            filename_log: default_filename_log(),
            logs_path: default_logs_path(),
            dir_path: default_dir_path(),
            cache_size: None,
            rpc_url: None,
            contract_state: None,
            block_tag: default_block_tag(),
            request_timeout_secs: default_request_timeout_secs(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ConfigValidationError {
    #[error("Invalid RPC url: '{0}' - must be a valid HTTP/HTTPS URL")]
    InvalidRpcUrl(String),
    #[error("Invalid {field}: {value} seconds - must be between {min} and {max} seconds")]
    InvalidTimeout {
        field: &'static str,
        value: u64,
        min: u64,
        max: u64,
    },
    #[error("Invalid {field}: '{path}' - {reason}")]
    InvalidPath {
        field: &'static str,
        path: String,
        reason: &'static str,
    },
    #[error("Only one contract state source can be set: rpc url or contract state file")]
    ConflictingReaders,
}

impl IndexerConfig {
    /// Check the configuration, returning warnings that do not prevent a run
    pub fn validate(&self) -> Result<Vec<String>, ConfigValidationError> {
        let mut warnings = Vec::new();

        if self.dir_path.trim().is_empty() {
            return Err(ConfigValidationError::InvalidPath {
                field: "dir_path",
                path: self.dir_path.clone(),
                reason: "must not be empty",
            });
        }

        if self.rpc_url.is_some() && self.contract_state.is_some() {
            return Err(ConfigValidationError::ConflictingReaders);
        }

        if let Some(url) = self.rpc_url.as_deref() {
            let parsed =
                Url::parse(url).map_err(|_| ConfigValidationError::InvalidRpcUrl(url.to_string()))?;
            if parsed.scheme() != "http" && parsed.scheme() != "https" {
                return Err(ConfigValidationError::InvalidRpcUrl(url.to_string()));
            }
        }

        if let Some(path) = self.contract_state.as_deref() {
            if !Path::new(path).is_file() {
                return Err(ConfigValidationError::InvalidPath {
                    field: "contract_state",
                    path: path.to_string(),
                    reason: "file does not exist",
                });
            }
        }

        if !(defaults::MIN_TIMEOUT_SECS..=defaults::MAX_TIMEOUT_SECS)
            .contains(&self.request_timeout_secs)
        {
            return Err(ConfigValidationError::InvalidTimeout {
                field: "request_timeout_secs",
                value: self.request_timeout_secs,
                min: defaults::MIN_TIMEOUT_SECS,
                max: defaults::MAX_TIMEOUT_SECS,
            });
        }

        if self.rpc_url.is_none() && self.contract_state.is_none() {
            warnings.push("No contract state source set, every contract read is unavailable".to_string());
        }

        if self.rpc_url.is_none() && self.block_tag != defaults::BLOCK_TAG {
            warnings.push(format!("Block tag {} has no effect without an rpc url", self.block_tag));
        }

        for warning in &warnings {
            if log::log_enabled!(log::Level::Warn) {
                warn!("{}", warning);
            }
        }

        Ok(warnings)
    }

    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let content = std::fs::read_to_string(&path).map_err(|e| {
            anyhow!(
                "Failed to read config file '{}': {}",
                path.as_ref().display(),
                e
            )
        })?;

        let config: IndexerConfig = serde_json::from_str(&content).map_err(|e| {
            anyhow!(
                "Failed to parse config file '{}': {}",
                path.as_ref().display(),
                e
            )
        })?;

        config.validate()?;
        if log::log_enabled!(log::Level::Info) {
            info!("Configuration loaded from {}", path.as_ref().display());
        }
        Ok(config)
    }

    /// Write the default configuration as a starting point
    pub fn generate_template<P: AsRef<Path>>(path: P) -> Result<()> {
        let content = serde_json::to_string_pretty(&IndexerConfig::default())?;
        std::fs::write(&path, content).map_err(|e| {
            anyhow!(
                "Failed to write template to '{}': {}",
                path.as_ref().display(),
                e
            )
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_missing_fields_use_defaults() {
        let config: IndexerConfig = serde_json::from_str(r#"{"dir_path": "data/"}"#).unwrap();
        assert_eq!(config.dir_path, "data/");
        assert_eq!(config.filename_log, defaults::FILENAME_LOG);
        assert_eq!(config.block_tag, BlockTag::Event);
        assert_eq!(config.request_timeout_secs, defaults::REQUEST_TIMEOUT_SECS);
    }

    #[test]
    fn test_validate() {
        let mut config = IndexerConfig::default();
        assert_eq!(config.validate().unwrap().len(), 1);

        config.rpc_url = Some("ftp://node".to_string());
        assert!(matches!(
            config.validate(),
            Err(ConfigValidationError::InvalidRpcUrl(_))
        ));

        config.rpc_url = Some("http://127.0.0.1:8545".to_string());
        assert!(config.validate().unwrap().is_empty());

        config.contract_state = Some("state.json".to_string());
        assert_eq!(
            config.validate(),
            Err(ConfigValidationError::ConflictingReaders)
        );

        config.contract_state = None;
        config.request_timeout_secs = 0;
        assert!(matches!(
            config.validate(),
            Err(ConfigValidationError::InvalidTimeout { .. })
        ));
    }

    #[test]
    fn test_template_round_trip() {
        let dir = tempdir::TempDir::new("config").unwrap();
        let path = dir.path().join("config.json");
        IndexerConfig::generate_template(&path).unwrap();
        let config = IndexerConfig::from_file(&path).unwrap();
        assert_eq!(config.dir_path, defaults::DIR_PATH);
    }
}
