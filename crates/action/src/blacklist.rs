//! Blacklist and unblacklist actions for a deployed token.

use crate::{revert::map_token_error, Action, SignerFn};
use alloy_primitives::Address;
use alloy_provider::Provider;
use binding::token::IManagedToken;
use tracing::info;

/// Input data shared by the blacklist and unblacklist actions.
#[derive(Clone, Debug)]
pub struct BlacklistUpdate {
    /// Deployed token contract address
    pub token: Address,
    /// Owner address signing the call
    pub caller: Address,
    /// Account whose blacklist entry changes
    pub account: Address,
}

/// Action to bar an account from transfer participation.
pub struct BlacklistAction<P> {
    provider: P,
    signer: SignerFn,
    action: BlacklistUpdate,
}

impl<P: Provider + Clone> BlacklistAction<P> {
    pub fn new(provider: P, signer: SignerFn, action: BlacklistUpdate) -> Self {
        Self {
            provider,
            signer,
            action,
        }
    }
}

impl<P> Action for BlacklistAction<P>
where
    P: Provider + Clone,
{
    async fn is_ready(&self) -> eyre::Result<bool> {
        let contract = IManagedToken::new(self.action.token, &self.provider);
        let owner = contract.owner().call().await?;
        if owner != self.action.caller {
            return Ok(false);
        }

        // The owner can never be blacklisted
        if self.action.account == owner {
            return Ok(false);
        }

        Ok(!contract.isBlacklisted(self.action.account).call().await?)
    }

    async fn is_completed(&self) -> eyre::Result<bool> {
        let contract = IManagedToken::new(self.action.token, &self.provider);
        Ok(contract.isBlacklisted(self.action.account).call().await?)
    }

    async fn execute(&mut self) -> eyre::Result<crate::Result> {
        if self.is_completed().await? {
            eyre::bail!("Account already blacklisted")
        }

        let contract = IManagedToken::new(self.action.token, &self.provider);
        let call = contract
            .blacklist(self.action.account)
            .from(self.action.caller);

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
            account = %self.action.account,
            "Account blacklisted."
        );

        Ok(crate::Result::from_receipt(&receipt))
    }

    fn description(&self) -> String {
        format!(
            "Blacklisting {} on token {}",
            self.action.account, self.action.token
        )
    }
}

/// Action to re-admit a blacklisted account.
pub struct UnblacklistAction<P> {
    provider: P,
    signer: SignerFn,
    action: BlacklistUpdate,
}

impl<P: Provider + Clone> UnblacklistAction<P> {
    pub fn new(provider: P, signer: SignerFn, action: BlacklistUpdate) -> Self {
        Self {
            provider,
            signer,
            action,
        }
    }
}

impl<P> Action for UnblacklistAction<P>
where
    P: Provider + Clone,
{
    async fn is_ready(&self) -> eyre::Result<bool> {
        let contract = IManagedToken::new(self.action.token, &self.provider);
        let owner = contract.owner().call().await?;
        if owner != self.action.caller {
            return Ok(false);
        }
        Ok(contract.isBlacklisted(self.action.account).call().await?)
    }

    async fn is_completed(&self) -> eyre::Result<bool> {
        let contract = IManagedToken::new(self.action.token, &self.provider);
        Ok(!contract.isBlacklisted(self.action.account).call().await?)
    }

    async fn execute(&mut self) -> eyre::Result<crate::Result> {
        if self.is_completed().await? {
            eyre::bail!("Account is not blacklisted")
        }

        let contract = IManagedToken::new(self.action.token, &self.provider);
        let call = contract
            .unblacklist(self.action.account)
            .from(self.action.caller);

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
            account = %self.action.account,
            "Account unblacklisted."
        );

        Ok(crate::Result::from_receipt(&receipt))
    }

    fn description(&self) -> String {
        format!(
            "Unblacklisting {} on token {}",
            self.action.account, self.action.token
        )
    }
}
