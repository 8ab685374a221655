use std::collections::{BTreeMap, HashMap};

use alloy::primitives::Address;
use serde::Serialize;
use serde_json::Value;
use tokio::sync::Mutex;
use tracing::{debug, info};

use crate::client::ContractClient;
use crate::error::{ChainError, ContractError};
use crate::types::{Attribute, CountResponse, ExecuteMsg, InstantiateMsg, QueryMsg, Receipt};
use crate::wallet::Wallet;

#[derive(Clone, Debug, PartialEq, Eq)]
struct CounterState {
    count: i32,
    owner: Address,
}

impl CounterState {
    fn execute(&mut self, sender: Address, msg: ExecuteMsg) -> Result<Vec<Attribute>, ContractError> {
        match msg {
            ExecuteMsg::Increment {} => {
                self.count = self.count.checked_add(1).ok_or(ContractError::Overflow)?;
                Ok(vec![Attribute::new("method", "try_increment")])
            }
            ExecuteMsg::Reset { count } => {
                if sender != self.owner {
                    return Err(ContractError::Unauthorized {
                        sender,
                        owner: self.owner,
                    });
                }
                self.count = count;
                Ok(vec![
                    Attribute::new("method", "reset"),
                    Attribute::new("owner", self.owner),
                    Attribute::new("count", count),
                ])
            }
        }
    }

    fn query(&self, msg: QueryMsg) -> CountResponse {
        match msg {
            QueryMsg::GetCount {} => CountResponse { count: self.count },
        }
    }
}

#[derive(Default)]
struct ChainState {
    height: u64,
    nonces: HashMap<Address, u64>,
    refs: BTreeMap<String, Address>,
    contracts: HashMap<Address, CounterState>,
}

impl ChainState {
    // Targets are either a registered contract name or a contract address.
    fn resolve(&self, target: &str) -> Result<Address, ChainError> {
        let address = match self.refs.get(target) {
            Some(address) => *address,
            None => target
                .parse::<Address>()
                .map_err(|_| ChainError::UnknownContract(target.to_string()))?,
        };
        if self.contracts.contains_key(&address) {
            Ok(address)
        } else {
            Err(ChainError::UnknownContract(target.to_string()))
        }
    }
}

/// In-process chain hosting counter contracts.
///
/// Every successful execute produces one block. Failed executes leave both
/// contract state and height untouched.
#[derive(Default)]
pub struct LocalChain {
    state: Mutex<ChainState>,
}

impl LocalChain {
    pub fn new() -> Self {
        Self::default()
    }

    pub async fn instantiate(
        &self,
        signer: &Wallet,
        name: &str,
        msg: InstantiateMsg,
    ) -> Result<Address, ChainError> {
        let mut state = self.state.lock().await;
        if state.refs.contains_key(name) {
            return Err(ChainError::AlreadyInstantiated(name.to_string()));
        }

        let creator = signer.address();
        let nonce = state.nonces.entry(creator).or_insert(0);
        let address = creator.create(*nonce);
        *nonce += 1;

        state.contracts.insert(
            address,
            CounterState {
                count: msg.count,
                owner: creator,
            },
        );
        state.refs.insert(name.to_string(), address);
        state.height += 1;

        info!(
            "Instantiated {} at {} with count {} (owner {})",
            name, address, msg.count, signer
        );
        Ok(address)
    }

    pub async fn contract_address(&self, name: &str) -> Option<Address> {
        self.state.lock().await.refs.get(name).copied()
    }

    pub async fn refs(&self) -> BTreeMap<String, Address> {
        self.state.lock().await.refs.clone()
    }

    pub async fn height(&self) -> u64 {
        self.state.lock().await.height
    }
}

impl ContractClient for LocalChain {
    type QueryResponse = Value;
    type ExecuteResponse = Receipt;
    type Error = ChainError;

    async fn query<M>(&self, target: &str, msg: &M) -> Result<Value, ChainError>
    where
        M: Serialize + Sync,
    {
        let msg: QueryMsg = serde_json::from_value(serde_json::to_value(msg)?)?;
        let state = self.state.lock().await;
        let address = state.resolve(target)?;
        let contract = state
            .contracts
            .get(&address)
            .ok_or_else(|| ChainError::UnknownContract(target.to_string()))?;

        debug!("Query {:?} on {}", msg, address);
        Ok(serde_json::to_value(contract.query(msg))?)
    }

    async fn execute<M>(&self, signer: &Wallet, target: &str, msg: &M) -> Result<Receipt, ChainError>
    where
        M: Serialize + Sync,
    {
        let msg: ExecuteMsg = serde_json::from_value(serde_json::to_value(msg)?)?;
        let mut state = self.state.lock().await;
        let address = state.resolve(target)?;
        let sender = signer.address();

        let contract = state
            .contracts
            .get_mut(&address)
            .ok_or_else(|| ChainError::UnknownContract(target.to_string()))?;
        let mut next = contract.clone();
        let attributes = next.execute(sender, msg)?;
        *contract = next;

        state.height += 1;
        info!(
            "Executed on {} as {} at height {}",
            address, signer, state.height
        );
        Ok(Receipt {
            height: state.height,
            sender,
            contract: address,
            attributes,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    async fn deployed(count: i32) -> (LocalChain, Wallet) {
        let chain = LocalChain::new();
        let owner = Wallet::random("bombay");
        chain
            .instantiate(&owner, "counter", InstantiateMsg { count })
            .await
            .unwrap();
        (chain, owner)
    }

    #[tokio::test]
    async fn increments_and_queries() {
        let (chain, owner) = deployed(17).await;

        let receipt = chain
            .execute(&owner, "counter", &ExecuteMsg::Increment {})
            .await
            .unwrap();
        assert_eq!(receipt.attribute("method"), Some("try_increment"));
        assert_eq!(receipt.sender, owner.address());
        assert_eq!(receipt.height, 2);

        let res = chain.query("counter", &QueryMsg::GetCount {}).await.unwrap();
        assert_eq!(res, json!({ "count": 18 }));
    }

    #[tokio::test]
    async fn resolves_by_address() {
        let (chain, _) = deployed(3).await;
        let address = chain.contract_address("counter").await.unwrap();

        let res = chain
            .query(&address.to_string(), &QueryMsg::GetCount {})
            .await
            .unwrap();
        assert_eq!(res, json!({ "count": 3 }));
    }

    #[tokio::test]
    async fn only_owner_can_reset() {
        let (chain, owner) = deployed(17).await;
        let anyone = Wallet::random("anyone");

        match chain
            .execute(&anyone, "counter", &ExecuteMsg::Reset { count: 5 })
            .await
        {
            Err(ChainError::Contract(ContractError::Unauthorized { sender, .. })) => {
                assert_eq!(sender, anyone.address())
            }
            other => panic!("Must return unauthorized error, got {:?}", other),
        }

        let receipt = chain
            .execute(&owner, "counter", &ExecuteMsg::Reset { count: 5 })
            .await
            .unwrap();
        assert_eq!(receipt.attribute("count"), Some("5"));

        let res = chain.query("counter", &QueryMsg::GetCount {}).await.unwrap();
        assert_eq!(res, json!({ "count": 5 }));
    }

    #[tokio::test]
    async fn overflow_leaves_state_untouched() {
        let (chain, owner) = deployed(i32::MAX).await;
        let height = chain.height().await;

        match chain.execute(&owner, "counter", &ExecuteMsg::Increment {}).await {
            Err(ChainError::Contract(ContractError::Overflow)) => {}
            other => panic!("Expected overflow, got {:?}", other),
        }
        assert_eq!(chain.height().await, height);

        let res = chain.query("counter", &QueryMsg::GetCount {}).await.unwrap();
        assert_eq!(res, json!({ "count": i32::MAX }));
    }

    #[tokio::test]
    async fn rejects_unknown_targets_and_messages() {
        let (chain, owner) = deployed(0).await;

        match chain.query("vault", &QueryMsg::GetCount {}).await {
            Err(ChainError::UnknownContract(name)) => assert_eq!(name, "vault"),
            other => panic!("Unexpected result: {:?}", other),
        }

        match chain.execute(&owner, "counter", &json!({ "end_vault": {} })).await {
            Err(ChainError::InvalidMessage(_)) => {}
            other => panic!("Unexpected result: {:?}", other),
        }
    }

    #[tokio::test]
    async fn names_are_unique_and_addresses_distinct() {
        let (chain, owner) = deployed(0).await;

        match chain
            .instantiate(&owner, "counter", InstantiateMsg { count: 1 })
            .await
        {
            Err(ChainError::AlreadyInstantiated(name)) => assert_eq!(name, "counter"),
            other => panic!("Unexpected result: {:?}", other),
        }

        let second = chain
            .instantiate(&owner, "counter2", InstantiateMsg { count: 1 })
            .await
            .unwrap();
        let refs = chain.refs().await;
        assert_eq!(refs.len(), 2);
        assert_ne!(refs["counter"], second);
    }
}
