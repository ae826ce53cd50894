//! Burn action for a deployed token.
//!
//! Burning only draws from the owner's own balance; there is no
//! burn-from-allowance path in the generated contract.

use crate::{revert::map_token_error, Action, SignerFn};
use alloy_primitives::{Address, B256, U256};
use alloy_provider::Provider;
use alloy_sol_types::SolEvent;
use binding::token::IManagedToken;
use tracing::info;

/// Burn input data.
#[derive(Clone, Debug)]
pub struct Burn {
    /// Deployed token contract address
    pub token: Address,
    /// Owner address signing the call
    pub caller: Address,
    /// Amount in base units, drawn from the owner's balance
    pub amount: U256,
    /// Optional: set once the burn transaction has been broadcast
    pub tx_hash: Option<B256>,
}

pub struct BurnAction<P> {
    provider: P,
    signer: SignerFn,
    action: Burn,
}

impl<P: Provider + Clone> BurnAction<P> {
    pub fn new(provider: P, signer: SignerFn, action: Burn) -> Self {
        Self {
            provider,
            signer,
            action,
        }
    }
}

impl<P> Action for BurnAction<P>
where
    P: Provider + Clone,
{
    async fn is_ready(&self) -> eyre::Result<bool> {
        let contract = IManagedToken::new(self.action.token, &self.provider);
        let owner = contract.owner().call().await?;
        if owner != self.action.caller {
            return Ok(false);
        }

        let balance = contract.balanceOf(self.action.caller).call().await?;
        Ok(balance >= self.action.amount)
    }

    async fn is_completed(&self) -> eyre::Result<bool> {
        let Some(tx_hash) = self.action.tx_hash else {
            return Ok(false);
        };

        let Some(receipt) = self.provider.get_transaction_receipt(tx_hash).await? else {
            return Ok(false);
        };

        let Ok(event) = parse_burn_event(&receipt) else {
            return Ok(false);
        };
        Ok(event.from == self.action.caller && event.amount == self.action.amount)
    }

    async fn execute(&mut self) -> eyre::Result<crate::Result> {
        if self.is_completed().await? {
            eyre::bail!("Burn already broadcast and confirmed")
        }

        let contract = IManagedToken::new(self.action.token, &self.provider);
        let call = contract.burn(self.action.amount).from(self.action.caller);

        // Simulate first so a revert surfaces with a decodable reason
        call.call().await.map_err(map_token_error)?;

        let receipt = crate::send_transaction(
            &self.provider,
            &self.signer,
            call.into_transaction_request(),
        )
        .await?;
        self.action.tx_hash = Some(receipt.transaction_hash);

        let event = parse_burn_event(&receipt)?;
        info!(
            tx_hash = %receipt.transaction_hash,
            token = %self.action.token,
            from = %event.from,
            amount = %event.amount,
            "Supply burned."
        );

        Ok(crate::Result::from_receipt(&receipt))
    }

    fn description(&self) -> String {
        format!(
            "Burning {} base units of {} from the owner balance",
            self.action.amount, self.action.token
        )
    }
}

fn parse_burn_event(
    receipt: &alloy_rpc_types_eth::TransactionReceipt,
) -> eyre::Result<IManagedToken::Burn> {
    for log in receipt.logs() {
        if let Ok(event) = IManagedToken::Burn::decode_log(&log.inner) {
            return Ok(event.data);
        }
    }

    eyre::bail!("Burn event not found in receipt")
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_utils::{mock_signer, MockProvider};
    use alloy_primitives::address;

    #[test]
    fn test_burn_action_description() {
        let action = BurnAction::new(
            MockProvider,
            mock_signer(),
            Burn {
                token: address!("09aea4b2242abC8bb4BB78D537A67a245A7bEC64"),
                caller: address!("5CFFA347b0aE99cc01E5c01714cA5658e54a23D1"),
                amount: U256::from(250u64),
                tx_hash: None,
            },
        );

        assert!(action.description().contains("Burning 250 base units"));
    }
}
