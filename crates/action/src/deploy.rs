//! Token deployment action.
//!
//! Broadcasts the creation transaction for compiled bytecode and resolves
//! the new contract address from the confirmation receipt.

use crate::{Action, SignerFn};
use alloy_primitives::{Address, Bytes, B256, U256};
use alloy_network::TransactionBuilder;
use alloy_provider::Provider;
use alloy_rpc_types::{TransactionInput, TransactionRequest};
use tracing::info;

/// Deployment input data.
#[derive(Clone, Debug)]
pub struct Deploy {
    /// Creation bytecode from the compiler service
    pub bytecode: Bytes,
    /// Address funding and signing the deployment
    pub deployer: Address,
    /// Optional: set once the creation transaction has been broadcast
    pub tx_hash: Option<B256>,
}

pub struct DeployAction<P> {
    provider: P,
    signer: SignerFn,
    action: Deploy,
}

impl<P: Provider + Clone> DeployAction<P> {
    pub fn new(provider: P, signer: SignerFn, action: Deploy) -> Self {
        Self {
            provider,
            signer,
            action,
        }
    }

    /// Hash of the broadcast creation transaction, if any.
    pub const fn tx_hash(&self) -> Option<B256> {
        self.action.tx_hash
    }
}

impl<P> Action for DeployAction<P>
where
    P: Provider + Clone,
{
    async fn is_ready(&self) -> eyre::Result<bool> {
        if self.action.bytecode.is_empty() {
            return Ok(false);
        }

        // The deployer must at least be able to pay for gas
        let balance = self.provider.get_balance(self.action.deployer).await?;
        Ok(balance > U256::ZERO)
    }

    async fn is_completed(&self) -> eyre::Result<bool> {
        let Some(tx_hash) = self.action.tx_hash else {
            return Ok(false);
        };

        let Some(receipt) = self.provider.get_transaction_receipt(tx_hash).await? else {
            return Ok(false);
        };

        Ok(receipt.contract_address.is_some())
    }

    async fn execute(&mut self) -> eyre::Result<crate::Result> {
        if self.is_completed().await? {
            eyre::bail!("Deployment already broadcast and confirmed")
        }

        // Creation transaction: no recipient, bytecode as input
        let tx = TransactionRequest::default()
            .from(self.action.deployer)
            .input(TransactionInput::new(self.action.bytecode.clone()))
            .into_create();

        let filled = crate::fill_transaction(tx, &self.provider).await?;
        let signed = (self.signer)(filled).await?;

        let pending = self.provider.send_raw_transaction(&signed).await?;
        let tx_hash = *pending.tx_hash();
        self.action.tx_hash = Some(tx_hash);
        info!(%tx_hash, "Deployment transaction submitted");

        let receipt = pending.get_receipt().await?;
        if !receipt.status() {
            eyre::bail!("deployment transaction {} reverted", receipt.transaction_hash);
        }

        let contract_address = receipt
            .contract_address
            .ok_or_else(|| eyre::eyre!("deployment receipt carries no contract address"))?;

        info!(
            tx_hash = %receipt.transaction_hash,
            block_number = receipt.block_number,
            gas_used = receipt.gas_used,
            contract = %contract_address,
            "Deployment confirmed."
        );

        Ok(crate::Result {
            tx_hash: receipt.transaction_hash,
            block_number: receipt.block_number,
            gas_used: Some(U256::from(receipt.gas_used)),
            contract_address: Some(contract_address),
        })
    }

    fn description(&self) -> String {
        format!(
            "Deploying contract ({} bytes of creation bytecode)",
            self.action.bytecode.len()
        )
    }
}
