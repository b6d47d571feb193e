//! Configuration types for the token client
//!
//! Node endpoint, target network, and the polling cadence callers use between
//! a broadcast and its confirmation.

use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use std::time::Duration;

use crate::chain::ChainId;

/// Client configuration
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ClientConfig {
    pub node: NodeConfig,
    pub chain_id: ChainId,
    /// Average time in seconds for a block to be packed
    pub avg_block_delay_secs: u64,
}

/// Ledger node connection configuration
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NodeConfig {
    /// Base URL of the node API
    pub host: String,
}

/// Default average block delay in seconds
pub const DEFAULT_AVG_BLOCK_DELAY_SECS: u64 = 6;

impl ClientConfig {
    /// Create default configuration for test net
    pub fn default_testnet() -> Self {
        Self {
            node: NodeConfig {
                host: "http://localhost:9922".to_string(),
            },
            chain_id: ChainId::TestNet,
            avg_block_delay_secs: DEFAULT_AVG_BLOCK_DELAY_SECS,
        }
    }

    /// Create default configuration for main net
    pub fn default_mainnet() -> Self {
        Self {
            node: NodeConfig {
                host: "https://wallet.v.systems/api".to_string(),
            },
            chain_id: ChainId::MainNet,
            avg_block_delay_secs: DEFAULT_AVG_BLOCK_DELAY_SECS,
        }
    }

    /// One block interval
    pub fn block_interval(&self) -> Duration {
        Duration::from_secs(self.avg_block_delay_secs)
    }

    /// Sleep for one block interval
    ///
    /// The suggested gap between broadcasting and polling for confirmation.
    pub async fn wait_for_block(&self) {
        tokio::time::sleep(self.block_interval()).await;
    }
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self::default_testnet()
    }
}

/// Configuration error types
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    #[error("Invalid configuration: {0}")]
    Invalid(String),

    #[error("Config directory not found")]
    DirectoryNotFound,
}

/// Configuration overrides from caller arguments or environment variables
#[derive(Debug, Default, Clone)]
pub struct ConfigOverrides {
    pub chain_id: Option<ChainId>,
    pub node_host: Option<String>,
    pub avg_block_delay_secs: Option<u64>,
}

impl ConfigOverrides {
    /// Create empty overrides
    pub fn new() -> Self {
        Self::default()
    }

    /// Create overrides from environment variables
    ///
    /// Supports both VSYS_* and JS_VSYS_* prefixes; VSYS_* takes precedence if
    /// both are set.
    pub fn from_env() -> Self {
        Self {
            chain_id: std::env::var("VSYS_CHAIN_ID")
                .ok()
                .and_then(|s| s.parse().ok()),
            node_host: std::env::var("VSYS_HOST")
                .or_else(|_| std::env::var("JS_VSYS_HOST"))
                .ok(),
            avg_block_delay_secs: std::env::var("VSYS_AVG_BLOCK_DELAY")
                .or_else(|_| std::env::var("JS_VSYS_AVG_BLOCK_DELAY"))
                .ok()
                .and_then(|s| s.parse().ok()),
        }
    }

    /// Merge with another set of overrides (other takes precedence)
    pub fn merge(mut self, other: Self) -> Self {
        if other.chain_id.is_some() {
            self.chain_id = other.chain_id;
        }
        if other.node_host.is_some() {
            self.node_host = other.node_host;
        }
        if other.avg_block_delay_secs.is_some() {
            self.avg_block_delay_secs = other.avg_block_delay_secs;
        }
        self
    }
}

/// Get the default configuration directory path
///
/// Returns: `~/.vsys-token-client/`
pub fn default_config_dir() -> Result<PathBuf, ConfigError> {
    dirs::home_dir()
        .map(|home| home.join(".vsys-token-client"))
        .ok_or(ConfigError::DirectoryNotFound)
}

/// Get the default configuration file path
///
/// Returns: `~/.vsys-token-client/config.json`
pub fn default_config_path() -> Result<PathBuf, ConfigError> {
    Ok(default_config_dir()?.join("config.json"))
}

/// Load configuration from file with overrides
///
/// # Priority (highest to lowest):
/// 1. Caller overrides (passed as argument)
/// 2. Environment variables
/// 3. Config file
/// 4. Network defaults
///
/// # Example
///
/// ```ignore
/// use vsys_token_client::config::{load_config, ConfigOverrides};
/// use vsys_token_client::chain::ChainId;
///
/// let mut overrides = ConfigOverrides::new();
/// overrides.chain_id = Some(ChainId::TestNet);
///
/// let config = load_config(None, overrides)?;
/// ```
pub fn load_config(
    config_path: Option<&Path>,
    overrides: ConfigOverrides,
) -> Result<ClientConfig, ConfigError> {
    let path = match config_path {
        Some(p) => p.to_path_buf(),
        None => default_config_path()?,
    };

    let mut config = if path.exists() {
        let contents = std::fs::read_to_string(&path)?;
        serde_json::from_str(&contents)?
    } else {
        match overrides.chain_id {
            Some(ChainId::MainNet) => ClientConfig::default_mainnet(),
            _ => ClientConfig::default_testnet(),
        }
    };

    apply_overrides(&mut config, ConfigOverrides::from_env().merge(overrides));
    validate(&config)?;

    Ok(config)
}

/// Save configuration to file
///
/// Creates parent directories if they don't exist.
pub fn save_config(config: &ClientConfig, config_path: Option<&Path>) -> Result<(), ConfigError> {
    let path = match config_path {
        Some(p) => p.to_path_buf(),
        None => default_config_path()?,
    };

    if let Some(parent) = path.parent() {
        std::fs::create_dir_all(parent)?;
    }

    let json = serde_json::to_string_pretty(config)?;
    std::fs::write(&path, json)?;

    Ok(())
}

fn apply_overrides(config: &mut ClientConfig, overrides: ConfigOverrides) {
    if let Some(chain_id) = overrides.chain_id {
        if config.chain_id != chain_id {
            config.chain_id = chain_id;
            // Follow the network's default host unless one was given explicitly
            if overrides.node_host.is_none() {
                config.node.host = match chain_id {
                    ChainId::MainNet => ClientConfig::default_mainnet().node.host,
                    ChainId::TestNet => ClientConfig::default_testnet().node.host,
                };
            }
        }
    }

    if let Some(host) = overrides.node_host {
        config.node.host = host;
    }
    if let Some(delay) = overrides.avg_block_delay_secs {
        config.avg_block_delay_secs = delay;
    }
}

fn validate(config: &ClientConfig) -> Result<(), ConfigError> {
    if config.node.host.trim().is_empty() {
        return Err(ConfigError::Invalid("node host is empty".to_string()));
    }
    if config.avg_block_delay_secs == 0 {
        return Err(ConfigError::Invalid(
            "avg_block_delay_secs must be positive".to_string(),
        ));
    }
    Ok(())
}
