use anyhow::{Context, Result};
use tracing::{error, info, warn};
use tracing_subscriber::EnvFilter;

use cowbet::types::CountResponse;
use cowbet::{Config, Counter, LocalChain, Wallet};

const DEFAULT_INCREMENTS: u32 = 3;

#[tokio::main]
async fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .init();

    if let Err(e) = run().await {
        error!("cowbet error: {:#}", e);
        std::process::exit(1);
    }
}

async fn run() -> Result<()> {
    let config = Config::from_env().context("Failed to load config")?;
    let mut wallets = config.wallets().context("Failed to load wallets")?;
    if wallets.default_wallet().is_err() {
        let name = wallets.default_name().to_string();
        warn!("Wallet {} not configured, generating a throwaway key", name);
        wallets.insert(Wallet::random(name));
    }

    let increments = match std::env::var("INCREMENTS") {
        Ok(value) => value
            .parse::<u32>()
            .with_context(|| format!("INCREMENTS must be a number, got {}", value))?,
        Err(_) => DEFAULT_INCREMENTS,
    };

    let chain = LocalChain::new();
    let owner = wallets.default_wallet()?;
    let address = chain
        .instantiate(
            owner,
            Counter::<&LocalChain>::TARGET,
            config.contracts.counter.instantiate.clone(),
        )
        .await
        .context("Failed to instantiate counter")?;
    info!("Counter deployed at {}", address);

    let counter = Counter::from_wallets(&chain, &wallets)?;

    info!("Sending {} increments as {}", increments, counter.default_signer());
    for _ in 0..increments {
        let receipt = counter
            .increment(None)
            .await
            .context("Failed to increment counter")?;
        info!("Increment confirmed at height {}", receipt.height);
    }

    let res = counter.get_count().await.context("Failed to query count")?;
    let count: CountResponse = serde_json::from_value(res)?;
    info!("Count is now {}", count.count);
    Ok(())
}
