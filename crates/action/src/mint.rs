//! Mint action for a deployed token.

use crate::{revert::map_token_error, Action, SignerFn};
use alloy_primitives::{Address, B256, U256};
use alloy_provider::Provider;
use alloy_sol_types::SolEvent;
use binding::token::IManagedToken;
use tracing::info;

/// Mint input data.
#[derive(Clone, Debug)]
pub struct Mint {
    /// Deployed token contract address
    pub token: Address,
    /// Owner address signing the call
    pub caller: Address,
    /// Recipient of the newly created supply
    pub to: Address,
    /// Amount in base units
    pub amount: U256,
    /// Optional: set once the mint transaction has been broadcast
    pub tx_hash: Option<B256>,
}

pub struct MintAction<P> {
    provider: P,
    signer: SignerFn,
    action: Mint,
}

impl<P: Provider + Clone> MintAction<P> {
    pub fn new(provider: P, signer: SignerFn, action: Mint) -> Self {
        Self {
            provider,
            signer,
            action,
        }
    }
}

impl<P> Action for MintAction<P>
where
    P: Provider + Clone,
{
    async fn is_ready(&self) -> eyre::Result<bool> {
        if self.action.to == Address::ZERO {
            return Ok(false);
        }

        let contract = IManagedToken::new(self.action.token, &self.provider);
        let owner = contract.owner().call().await?;
        Ok(owner == self.action.caller)
    }

    async fn is_completed(&self) -> eyre::Result<bool> {
        let Some(tx_hash) = self.action.tx_hash else {
            return Ok(false);
        };

        let Some(receipt) = self.provider.get_transaction_receipt(tx_hash).await? else {
            return Ok(false);
        };

        // Verify the receipt carries our mint, not just any transaction
        let Ok(event) = parse_mint_event(&receipt) else {
            return Ok(false);
        };
        Ok(event.to == self.action.to && event.amount == self.action.amount)
    }

    async fn execute(&mut self) -> eyre::Result<crate::Result> {
        if self.is_completed().await? {
            eyre::bail!("Mint already broadcast and confirmed")
        }

        let contract = IManagedToken::new(self.action.token, &self.provider);
        let call = contract
            .mint(self.action.to, self.action.amount)
            .from(self.action.caller);

        // Simulate first so a revert surfaces with a decodable reason
        call.call().await.map_err(map_token_error)?;

        let receipt = crate::send_transaction(
            &self.provider,
            &self.signer,
            call.into_transaction_request(),
        )
        .await?;
        self.action.tx_hash = Some(receipt.transaction_hash);

        let event = parse_mint_event(&receipt)?;
        info!(
            tx_hash = %receipt.transaction_hash,
            token = %self.action.token,
            to = %event.to,
            amount = %event.amount,
            "Supply minted."
        );

        Ok(crate::Result::from_receipt(&receipt))
    }

    fn description(&self) -> String {
        format!(
            "Minting {} base units of {} to {}",
            self.action.amount, self.action.token, self.action.to
        )
    }
}

fn parse_mint_event(
    receipt: &alloy_rpc_types_eth::TransactionReceipt,
) -> eyre::Result<IManagedToken::Mint> {
    for log in receipt.logs() {
        if let Ok(event) = IManagedToken::Mint::decode_log(&log.inner) {
            return Ok(event.data);
        }
    }

    eyre::bail!("Mint event not found in receipt")
}
