//! Pause and unpause actions for a deployed token.
//!
//! Pausing halts the transfer surface (transfer, approve, transferFrom,
//! allowance changes) while leaving the owner's administrative surface
//! callable.

use crate::{revert::map_token_error, Action, SignerFn};
use alloy_primitives::Address;
use alloy_provider::Provider;
use binding::token::IManagedToken;
use tracing::info;

/// Input data shared by the pause and unpause actions.
#[derive(Clone, Debug)]
pub struct PauseToggle {
    /// Deployed token contract address
    pub token: Address,
    /// Owner address signing the call
    pub caller: Address,
}

/// Action to halt transfers on a deployed token.
pub struct PauseAction<P> {
    provider: P,
    signer: SignerFn,
    action: PauseToggle,
}

impl<P: Provider + Clone> PauseAction<P> {
    pub fn new(provider: P, signer: SignerFn, action: PauseToggle) -> Self {
        Self {
            provider,
            signer,
            action,
        }
    }
}

impl<P> Action for PauseAction<P>
where
    P: Provider + Clone,
{
    async fn is_ready(&self) -> eyre::Result<bool> {
        let contract = IManagedToken::new(self.action.token, &self.provider);
        let owner = contract.owner().call().await?;
        if owner != self.action.caller {
            return Ok(false);
        }
        Ok(!contract.paused().call().await?)
    }

    async fn is_completed(&self) -> eyre::Result<bool> {
        let contract = IManagedToken::new(self.action.token, &self.provider);
        Ok(contract.paused().call().await?)
    }

    async fn execute(&mut self) -> eyre::Result<crate::Result> {
        if self.is_completed().await? {
            eyre::bail!("Token already paused")
        }

        let contract = IManagedToken::new(self.action.token, &self.provider);
        let call = contract.pause().from(self.action.caller);

        // Simulate first so a revert surfaces with a decodable reason
        call.call().await.map_err(map_token_error)?;

        let receipt = crate::send_transaction(
            &self.provider,
            &self.signer,
            call.into_transaction_request(),
        )
        .await?;

        info!(
            tx_hash = %receipt.transaction_hash,
            token = %self.action.token,
            "Token paused."
        );

        Ok(crate::Result::from_receipt(&receipt))
    }

    fn description(&self) -> String {
        format!("Pausing transfers on token {}", self.action.token)
    }
}

/// Action to resume transfers on a deployed token.
pub struct UnpauseAction<P> {
    provider: P,
    signer: SignerFn,
    action: PauseToggle,
}

impl<P: Provider + Clone> UnpauseAction<P> {
    pub fn new(provider: P, signer: SignerFn, action: PauseToggle) -> Self {
        Self {
            provider,
            signer,
            action,
        }
    }
}

impl<P> Action for UnpauseAction<P>
where
    P: Provider + Clone,
{
    async fn is_ready(&self) -> eyre::Result<bool> {
        let contract = IManagedToken::new(self.action.token, &self.provider);
        let owner = contract.owner().call().await?;
        if owner != self.action.caller {
            return Ok(false);
        }
        Ok(contract.paused().call().await?)
    }

    async fn is_completed(&self) -> eyre::Result<bool> {
        let contract = IManagedToken::new(self.action.token, &self.provider);
        Ok(!contract.paused().call().await?)
    }

    async fn execute(&mut self) -> eyre::Result<crate::Result> {
        if self.is_completed().await? {
            eyre::bail!("Token is not paused")
        }

        let contract = IManagedToken::new(self.action.token, &self.provider);
        let call = contract.unpause().from(self.action.caller);

        call.call().await.map_err(map_token_error)?;

        let receipt = crate::send_transaction(
            &self.provider,
            &self.signer,
            call.into_transaction_request(),
        )
        .await?;

        info!(
            tx_hash = %receipt.transaction_hash,
            token = %self.action.token,
            "Token unpaused."
        );

        Ok(crate::Result::from_receipt(&receipt))
    }

    fn description(&self) -> String {
        format!("Resuming transfers on token {}", self.action.token)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_utils::{mock_signer, MockProvider};
    use alloy_primitives::address;

    fn toggle() -> PauseToggle {
        PauseToggle {
            token: address!("09aea4b2242abC8bb4BB78D537A67a245A7bEC64"),
            caller: address!("5CFFA347b0aE99cc01E5c01714cA5658e54a23D1"),
        }
    }

    #[test]
    fn test_pause_action_description() {
        let action = PauseAction::new(MockProvider, mock_signer(), toggle());
        assert!(action.description().contains("Pausing transfers"));
    }

    #[test]
    fn test_unpause_action_description() {
        let action = UnpauseAction::new(MockProvider, mock_signer(), toggle());
        assert!(action.description().contains("Resuming transfers"));
    }
}
