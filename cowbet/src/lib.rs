pub mod chain;
pub mod client;
pub mod config;
pub mod counter;
pub mod error;
pub mod types;
pub mod wallet;

pub use chain::LocalChain;
pub use client::ContractClient;
pub use config::Config;
pub use counter::Counter;
pub use wallet::{Wallet, Wallets};
