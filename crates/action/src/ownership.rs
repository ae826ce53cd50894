//! Ownership transfer and renouncement actions for a deployed token.
//!
//! Renouncement is terminal: once the owner is the zero address no
//! owner-gated function is reachable again, so the action refuses to run
//! unless the caller is the current owner at execution time.

use crate::{revert::map_token_error, Action, SignerFn};
use alloy_primitives::Address;
use alloy_provider::Provider;
use alloy_sol_types::SolEvent;
use binding::token::IManagedToken;
use tracing::{info, warn};

/// Input data for handing ownership to another address.
#[derive(Clone, Debug)]
pub struct TransferOwnership {
    /// Deployed token contract address
    pub token: Address,
    /// Current owner address signing the call
    pub caller: Address,
    /// Address receiving ownership
    pub new_owner: Address,
}

pub struct TransferOwnershipAction<P> {
    provider: P,
    signer: SignerFn,
    action: TransferOwnership,
}

impl<P: Provider + Clone> TransferOwnershipAction<P> {
    pub fn new(provider: P, signer: SignerFn, action: TransferOwnership) -> Self {
        Self {
            provider,
            signer,
            action,
        }
    }
}

impl<P> Action for TransferOwnershipAction<P>
where
    P: Provider + Clone,
{
    async fn is_ready(&self) -> eyre::Result<bool> {
        if self.action.new_owner == Address::ZERO {
            return Ok(false);
        }

        let contract = IManagedToken::new(self.action.token, &self.provider);
        let owner = contract.owner().call().await?;
        Ok(owner == self.action.caller)
    }

    async fn is_completed(&self) -> eyre::Result<bool> {
        let contract = IManagedToken::new(self.action.token, &self.provider);
        let owner = contract.owner().call().await?;
        Ok(owner == self.action.new_owner)
    }

    async fn execute(&mut self) -> eyre::Result<crate::Result> {
        if self.is_completed().await? {
            eyre::bail!("Ownership already held by {}", self.action.new_owner)
        }

        let contract = IManagedToken::new(self.action.token, &self.provider);
        let call = contract
            .transferOwnership(self.action.new_owner)
            .from(self.action.caller);

        // Simulate first so a revert surfaces with a decodable reason
        call.call().await.map_err(map_token_error)?;

        let receipt = crate::send_transaction(
            &self.provider,
            &self.signer,
            call.into_transaction_request(),
        )
        .await?;

        let event = parse_ownership_event(&receipt)?;
        info!(
            tx_hash = %receipt.transaction_hash,
            token = %self.action.token,
            previous_owner = %event.previousOwner,
            new_owner = %event.newOwner,
            "Ownership transferred."
        );

        Ok(crate::Result::from_receipt(&receipt))
    }

    fn description(&self) -> String {
        format!(
            "Transferring ownership of {} to {}",
            self.action.token, self.action.new_owner
        )
    }
}

/// Input data for renouncing ownership.
#[derive(Clone, Debug)]
pub struct RenounceOwnership {
    /// Deployed token contract address
    pub token: Address,
    /// Current owner address signing the call
    pub caller: Address,
}

pub struct RenounceOwnershipAction<P> {
    provider: P,
    signer: SignerFn,
    action: RenounceOwnership,
}

impl<P: Provider + Clone> RenounceOwnershipAction<P> {
    pub fn new(provider: P, signer: SignerFn, action: RenounceOwnership) -> Self {
        Self {
            provider,
            signer,
            action,
        }
    }
}

impl<P> Action for RenounceOwnershipAction<P>
where
    P: Provider + Clone,
{
    async fn is_ready(&self) -> eyre::Result<bool> {
        let contract = IManagedToken::new(self.action.token, &self.provider);
        let owner = contract.owner().call().await?;
        Ok(owner == self.action.caller)
    }

    async fn is_completed(&self) -> eyre::Result<bool> {
        let contract = IManagedToken::new(self.action.token, &self.provider);
        let owner = contract.owner().call().await?;
        Ok(owner == Address::ZERO)
    }

    async fn execute(&mut self) -> eyre::Result<crate::Result> {
        if self.is_completed().await? {
            eyre::bail!("Ownership already renounced")
        }

        warn!(
            token = %self.action.token,
            "Renouncing ownership; owner functions become permanently unreachable"
        );

        let contract = IManagedToken::new(self.action.token, &self.provider);
        let call = contract.renounceOwnership().from(self.action.caller);

        call.call().await.map_err(map_token_error)?;

        let receipt = crate::send_transaction(
            &self.provider,
            &self.signer,
            call.into_transaction_request(),
        )
        .await?;

        let event = parse_ownership_event(&receipt)?;
        info!(
            tx_hash = %receipt.transaction_hash,
            token = %self.action.token,
            previous_owner = %event.previousOwner,
            "Ownership renounced."
        );

        Ok(crate::Result::from_receipt(&receipt))
    }

    fn description(&self) -> String {
        format!("Renouncing ownership of {}", self.action.token)
    }
}

fn parse_ownership_event(
    receipt: &alloy_rpc_types_eth::TransactionReceipt,
) -> eyre::Result<IManagedToken::OwnershipTransferred> {
    for log in receipt.logs() {
        if let Ok(event) = IManagedToken::OwnershipTransferred::decode_log(&log.inner) {
            return Ok(event.data);
        }
    }

    eyre::bail!("OwnershipTransferred event not found in receipt")
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_utils::{mock_signer, MockProvider};
    use alloy_primitives::address;

    #[test]
    fn test_transfer_ownership_description() {
        let action = TransferOwnershipAction::new(
            MockProvider,
            mock_signer(),
            TransferOwnership {
                token: address!("09aea4b2242abC8bb4BB78D537A67a245A7bEC64"),
                caller: address!("5CFFA347b0aE99cc01E5c01714cA5658e54a23D1"),
                new_owner: address!("1111111111111111111111111111111111111111"),
            },
        );

        let desc = action.description();
        assert!(desc.contains("Transferring ownership"));
        assert!(desc.contains("0x1111111111111111111111111111111111111111"));
    }

    #[test]
    fn test_renounce_ownership_description() {
        let action = RenounceOwnershipAction::new(
            MockProvider,
            mock_signer(),
            RenounceOwnership {
                token: address!("09aea4b2242abC8bb4BB78D537A67a245A7bEC64"),
                caller: address!("5CFFA347b0aE99cc01E5c01714cA5658e54a23D1"),
            },
        );

        assert!(action.description().contains("Renouncing ownership"));
    }
}
