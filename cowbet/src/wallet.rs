use std::collections::BTreeMap;
use std::fmt;

use alloy::primitives::Address;
use alloy::signers::local::{LocalSignerError, PrivateKeySigner};

pub const DEFAULT_WALLET: &str = "bombay";

#[derive(Debug, thiserror::Error)]
pub enum WalletError {
    #[error("invalid private key for wallet {name}: {source}")]
    InvalidKey {
        name: String,
        #[source]
        source: LocalSignerError,
    },
    #[error("unknown wallet: {0}")]
    Unknown(String),
}

/// A named signing identity.
#[derive(Clone)]
pub struct Wallet {
    name: String,
    signer: PrivateKeySigner,
}

impl Wallet {
    pub fn new(name: impl Into<String>, signer: PrivateKeySigner) -> Self {
        Self {
            name: name.into(),
            signer,
        }
    }

    /// Parses a hex encoded 32 byte key. The `0x` prefix is optional.
    pub fn from_private_key(name: impl Into<String>, key: &str) -> Result<Self, WalletError> {
        let name = name.into();
        match key.trim().parse::<PrivateKeySigner>() {
            Ok(signer) => Ok(Self::new(name, signer)),
            Err(source) => Err(WalletError::InvalidKey { name, source }),
        }
    }

    pub fn random(name: impl Into<String>) -> Self {
        Self::new(name, PrivateKeySigner::random())
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn address(&self) -> Address {
        self.signer.address()
    }

    pub fn signer(&self) -> &PrivateKeySigner {
        &self.signer
    }
}

impl PartialEq for Wallet {
    fn eq(&self, other: &Self) -> bool {
        self.name == other.name && self.address() == other.address()
    }
}

impl Eq for Wallet {}

impl fmt::Debug for Wallet {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Wallet")
            .field("name", &self.name)
            .field("address", &self.address())
            .finish()
    }
}

impl fmt::Display for Wallet {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} ({})", self.name, self.address())
    }
}

/// Wallets addressable by name, one of which is the default signer.
#[derive(Clone, Debug)]
pub struct Wallets {
    default: String,
    entries: BTreeMap<String, Wallet>,
}

impl Default for Wallets {
    fn default() -> Self {
        Self {
            default: DEFAULT_WALLET.to_string(),
            entries: BTreeMap::new(),
        }
    }
}

impl Wallets {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn insert(&mut self, wallet: Wallet) -> Option<Wallet> {
        self.entries.insert(wallet.name().to_string(), wallet)
    }

    pub fn get(&self, name: &str) -> Result<&Wallet, WalletError> {
        self.entries
            .get(name)
            .ok_or_else(|| WalletError::Unknown(name.to_string()))
    }

    pub fn default_name(&self) -> &str {
        &self.default
    }

    pub fn set_default(&mut self, name: impl Into<String>) {
        self.default = name.into();
    }

    pub fn default_wallet(&self) -> Result<&Wallet, WalletError> {
        self.get(&self.default)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &Wallet> {
        self.entries.values()
    }
}

impl FromIterator<Wallet> for Wallets {
    fn from_iter<I: IntoIterator<Item = Wallet>>(iter: I) -> Self {
        let mut wallets = Wallets::new();
        for wallet in iter {
            wallets.insert(wallet);
        }
        wallets
    }
}
