use std::collections::BTreeMap;
use std::path::{Path, PathBuf};

use serde::Deserialize;
use tracing::{info, warn};

use crate::types::InstantiateMsg;
use crate::wallet::{Wallet, WalletError, Wallets, DEFAULT_WALLET};

pub const CONFIG_PATH_VAR: &str = "COWBET_CONFIG";
pub const PRIVATE_KEY_VAR: &str = "PRIVATE_KEY";
const DEFAULT_CONFIG_PATH: &str = "config.yaml";

#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("failed to read {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("yaml error: {0}")]
    Yaml(#[from] serde_yaml::Error),
    #[error("{0}")]
    Wallet(#[from] WalletError),
}

#[derive(Deserialize, Clone, Debug, PartialEq)]
pub struct Config {
    #[serde(default = "default_wallet")]
    pub default_wallet: String,
    /// Wallet name to hex encoded private key.
    #[serde(default)]
    pub wallets: BTreeMap<String, String>,
    #[serde(default)]
    pub contracts: Contracts,
}

#[derive(Deserialize, Clone, Debug, Default, PartialEq)]
pub struct Contracts {
    #[serde(default)]
    pub counter: CounterConfig,
}

#[derive(Deserialize, Clone, Debug, PartialEq)]
pub struct CounterConfig {
    #[serde(default = "default_instantiate")]
    pub instantiate: InstantiateMsg,
}

impl Default for CounterConfig {
    fn default() -> Self {
        Self {
            instantiate: default_instantiate(),
        }
    }
}

fn default_wallet() -> String {
    DEFAULT_WALLET.to_string()
}

fn default_instantiate() -> InstantiateMsg {
    InstantiateMsg { count: 0 }
}

impl Default for Config {
    fn default() -> Self {
        Self {
            default_wallet: default_wallet(),
            wallets: BTreeMap::new(),
            contracts: Contracts::default(),
        }
    }
}

impl Config {
    pub fn parse(yaml: &str) -> Result<Self, ConfigError> {
        Ok(serde_yaml::from_str(yaml)?)
    }

    pub fn load(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let path = path.as_ref();
        let yaml = std::fs::read_to_string(path).map_err(|source| ConfigError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        Self::parse(&yaml)
    }

    /// Loads `.env`, then the file named by `COWBET_CONFIG` (or `config.yaml`
    /// when present), then applies the `PRIVATE_KEY` override.
    pub fn from_env() -> Result<Self, ConfigError> {
        dotenv::dotenv().ok();

        let mut config = match std::env::var(CONFIG_PATH_VAR) {
            Ok(path) => Self::load(path)?,
            Err(_) if Path::new(DEFAULT_CONFIG_PATH).exists() => Self::load(DEFAULT_CONFIG_PATH)?,
            Err(_) => {
                warn!("No config file found, using defaults");
                Self::default()
            }
        };

        if let Ok(key) = std::env::var(PRIVATE_KEY_VAR) {
            config.override_default_key(key);
        }
        Ok(config)
    }

    pub fn override_default_key(&mut self, key: impl Into<String>) {
        info!("Using {} for wallet {}", PRIVATE_KEY_VAR, self.default_wallet);
        self.wallets.insert(self.default_wallet.clone(), key.into());
    }

    pub fn wallets(&self) -> Result<Wallets, ConfigError> {
        let mut wallets = Wallets::new();
        for (name, key) in &self.wallets {
            wallets.insert(Wallet::from_private_key(name.as_str(), key)?);
        }
        wallets.set_default(self.default_wallet.as_str());
        Ok(wallets)
    }
}
