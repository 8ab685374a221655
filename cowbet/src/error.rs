use alloy::primitives::Address;

/// Failures raised by the counter contract itself.
#[derive(Debug, thiserror::Error, PartialEq, Eq)]
pub enum ContractError {
    #[error("unauthorized: sender {sender} is not the owner {owner}")]
    Unauthorized { sender: Address, owner: Address },
    #[error("counter overflow")]
    Overflow,
}

#[derive(Debug, thiserror::Error)]
pub enum ChainError {
    #[error("unknown contract: {0}")]
    UnknownContract(String),
    #[error("contract {0} is already instantiated")]
    AlreadyInstantiated(String),
    #[error("invalid message: {0}")]
    InvalidMessage(#[from] serde_json::Error),
    #[error("{0}")]
    Contract(#[from] ContractError),
}
