use std::future::Future;

use serde::Serialize;

use crate::wallet::Wallet;

/// A backend able to run read-only queries and signed executes against a
/// named contract.
///
/// Implementations define their own response and error types; callers
/// layered on top (see [`crate::counter::Counter`]) hand both back untouched.
pub trait ContractClient {
    type QueryResponse;
    type ExecuteResponse;
    type Error;

    fn query<M>(
        &self,
        target: &str,
        msg: &M,
    ) -> impl Future<Output = Result<Self::QueryResponse, Self::Error>> + Send
    where
        M: Serialize + Sync;

    fn execute<M>(
        &self,
        signer: &Wallet,
        target: &str,
        msg: &M,
    ) -> impl Future<Output = Result<Self::ExecuteResponse, Self::Error>> + Send
    where
        M: Serialize + Sync;
}

impl<T> ContractClient for &T
where
    T: ContractClient + Sync,
{
    type QueryResponse = T::QueryResponse;
    type ExecuteResponse = T::ExecuteResponse;
    type Error = T::Error;

    fn query<M>(
        &self,
        target: &str,
        msg: &M,
    ) -> impl Future<Output = Result<Self::QueryResponse, Self::Error>> + Send
    where
        M: Serialize + Sync,
    {
        (**self).query(target, msg)
    }

    fn execute<M>(
        &self,
        signer: &Wallet,
        target: &str,
        msg: &M,
    ) -> impl Future<Output = Result<Self::ExecuteResponse, Self::Error>> + Send
    where
        M: Serialize + Sync,
    {
        (**self).execute(signer, target, msg)
    }
}
