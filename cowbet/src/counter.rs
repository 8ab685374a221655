use tracing::debug;

use crate::client::ContractClient;
use crate::types::{ExecuteMsg, QueryMsg};
use crate::wallet::{Wallet, WalletError, Wallets};

/// Typed binding for the `counter` contract.
///
/// Both calls go straight to the underlying client. Responses and errors are
/// returned exactly as the client produced them.
pub struct Counter<C> {
    client: C,
    default_signer: Wallet,
}

impl<C: ContractClient> Counter<C> {
    pub const TARGET: &'static str = "counter";

    pub fn new(client: C, default_signer: Wallet) -> Self {
        Self {
            client,
            default_signer,
        }
    }

    /// Binds to `client`, using the registry's default wallet for
    /// [`Counter::increment`] calls that do not name a signer.
    pub fn from_wallets(client: C, wallets: &Wallets) -> Result<Self, WalletError> {
        let default_signer = wallets.default_wallet()?.clone();
        Ok(Self::new(client, default_signer))
    }

    pub fn client(&self) -> &C {
        &self.client
    }

    pub fn default_signer(&self) -> &Wallet {
        &self.default_signer
    }

    pub async fn get_count(&self) -> Result<C::QueryResponse, C::Error> {
        debug!("Querying {} get_count", Self::TARGET);
        self.client.query(Self::TARGET, &QueryMsg::GetCount {}).await
    }

    pub async fn increment(
        &self,
        signer: Option<&Wallet>,
    ) -> Result<C::ExecuteResponse, C::Error> {
        let signer = signer.unwrap_or(&self.default_signer);
        debug!("Executing {} increment as {}", Self::TARGET, signer);
        self.client
            .execute(signer, Self::TARGET, &ExecuteMsg::Increment {})
            .await
    }
}
