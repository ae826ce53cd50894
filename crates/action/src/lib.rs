pub mod blacklist;
pub mod burn;
pub mod deploy;
pub mod mint;
pub mod ownership;
pub mod pause;
pub mod revert;

use alloy_primitives::{Address, Bytes, TxHash, U256};
use alloy_provider::Provider;
use alloy_rpc_types::TransactionRequest;
use alloy_rpc_types_eth::TransactionReceipt;
pub use client::fill_transaction;
use std::{future::Future, pin::Pin, sync::Arc};
use tracing::info;

/// A function that signs a transaction request and returns signed bytes.
///
/// This abstraction allows actions to work with both local key signing
/// and delegation to an external wallet service.
pub type SignerFn = Arc<
    dyn Fn(TransactionRequest) -> Pin<Box<dyn Future<Output = eyre::Result<Bytes>> + Send>>
        + Send
        + Sync,
>;

/// Trait for executable onchain actions.
pub trait Action: Send + Sync {
    /// Check to see if the action is ready to be executed.
    ///
    /// Returns true if all preconditions are met.
    fn is_ready(&self) -> impl Future<Output = eyre::Result<bool>> + Send;

    /// Check if the action has already been completed.
    ///
    /// Returns true if the action was already executed successfully.
    fn is_completed(&self) -> impl Future<Output = eyre::Result<bool>> + Send;

    /// Execute the action.
    ///
    /// Returns the confirmation details of the executed action.
    fn execute(&mut self) -> impl Future<Output = eyre::Result<Result>> + Send;

    /// Get a human-readable description of this action.
    fn description(&self) -> String;
}

/// Result of a confirmed action.
pub struct Result {
    /// Transaction hash
    pub tx_hash: TxHash,
    /// Block number where transaction was included
    pub block_number: Option<u64>,
    /// Gas used
    pub gas_used: Option<U256>,
    /// Address of the created contract (deployments only)
    pub contract_address: Option<Address>,
}

impl Result {
    /// Build a result from a confirmation receipt.
    pub fn from_receipt(receipt: &TransactionReceipt) -> Self {
        Self {
            tx_hash: receipt.transaction_hash,
            block_number: receipt.block_number,
            gas_used: Some(U256::from(receipt.gas_used)),
            contract_address: receipt.contract_address,
        }
    }
}

/// Fill, sign, and broadcast a transaction, then wait for its receipt.
///
/// Submission and confirmation are distinct states: the hash is logged as
/// soon as the transaction is accepted by the node, and the function only
/// returns once the confirmation receipt arrives. A reverted receipt is an
/// error — callers must not treat it as success.
pub async fn send_transaction<P>(
    provider: &P,
    signer: &SignerFn,
    tx: TransactionRequest,
) -> eyre::Result<TransactionReceipt>
where
    P: Provider + Clone,
{
    let filled = fill_transaction(tx, provider).await?;
    let signed = signer(filled).await?;

    let pending = provider.send_raw_transaction(&signed).await?;
    info!(tx_hash = %pending.tx_hash(), "Transaction submitted");

    let receipt = pending.get_receipt().await?;
    if !receipt.status() {
        eyre::bail!("transaction {} reverted", receipt.transaction_hash);
    }

    Ok(receipt)
}

#[cfg(test)]
pub(crate) mod test_utils {
    use super::SignerFn;
    use alloy_provider::{network::Ethereum, Provider, RootProvider};
    use std::sync::Arc;

    /// Mock provider for unit tests.
    #[derive(Clone)]
    pub struct MockProvider;

    impl Provider for MockProvider {
        fn root(&self) -> &RootProvider<Ethereum> {
            todo!()
        }
    }

    /// Create a mock signer for testing that panics if called.
    /// Used for tests that don't actually execute transactions.
    pub fn mock_signer() -> SignerFn {
        Arc::new(|_tx| Box::pin(async { panic!("mock signer should not be called") }))
    }
}
