//! Management calls against previously deployed tokens.
//!
//! Each operation runs as an action: preconditions are checked with reads,
//! the call is simulated so reverts surface with decodable reasons, and
//! only then is a transaction signed and broadcast. Nothing is retried
//! automatically — a failed call is surfaced for manual resubmission.

use action::{
    blacklist::{BlacklistAction, BlacklistUpdate, UnblacklistAction},
    burn::{Burn, BurnAction},
    mint::{Mint, MintAction},
    ownership::{
        RenounceOwnership, RenounceOwnershipAction, TransferOwnership, TransferOwnershipAction,
    },
    pause::{PauseAction, PauseToggle, UnpauseAction},
    Action, SignerFn,
};
use alloy_primitives::{Address, U256};
use alloy_provider::Provider;
use binding::token::IManagedToken;
use tracing::info;

/// Owner-callable management operations on a deployed token.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ManagementOp {
    Pause,
    Unpause,
    Blacklist { account: Address },
    Unblacklist { account: Address },
    Mint { to: Address, amount: U256 },
    Burn { amount: U256 },
    TransferOwnership { new_owner: Address },
    RenounceOwnership,
}

impl ManagementOp {
    /// Contract function name this operation invokes.
    pub const fn function_name(&self) -> &'static str {
        match self {
            Self::Pause => "pause",
            Self::Unpause => "unpause",
            Self::Blacklist { .. } => "blacklist",
            Self::Unblacklist { .. } => "unblacklist",
            Self::Mint { .. } => "mint",
            Self::Burn { .. } => "burn",
            Self::TransferOwnership { .. } => "transferOwnership",
            Self::RenounceOwnership => "renounceOwnership",
        }
    }
}

/// Execute one management operation against a deployed token.
///
/// Returns `None` when nothing was executed (already in the target state,
/// or dry-run).
pub async fn run_management_op<P>(
    provider: P,
    signer: SignerFn,
    token: Address,
    caller: Address,
    op: ManagementOp,
    dry_run: bool,
) -> eyre::Result<Option<action::Result>>
where
    P: Provider + Clone,
{
    match op {
        ManagementOp::Pause => {
            let action = PauseAction::new(provider, signer, PauseToggle { token, caller });
            drive(action, dry_run).await
        }
        ManagementOp::Unpause => {
            let action = UnpauseAction::new(provider, signer, PauseToggle { token, caller });
            drive(action, dry_run).await
        }
        ManagementOp::Blacklist { account } => {
            let action = BlacklistAction::new(
                provider,
                signer,
                BlacklistUpdate {
                    token,
                    caller,
                    account,
                },
            );
            drive(action, dry_run).await
        }
        ManagementOp::Unblacklist { account } => {
            let action = UnblacklistAction::new(
                provider,
                signer,
                BlacklistUpdate {
                    token,
                    caller,
                    account,
                },
            );
            drive(action, dry_run).await
        }
        ManagementOp::Mint { to, amount } => {
            let action = MintAction::new(
                provider,
                signer,
                Mint {
                    token,
                    caller,
                    to,
                    amount,
                    tx_hash: None,
                },
            );
            drive(action, dry_run).await
        }
        ManagementOp::Burn { amount } => {
            let action = BurnAction::new(
                provider,
                signer,
                Burn {
                    token,
                    caller,
                    amount,
                    tx_hash: None,
                },
            );
            drive(action, dry_run).await
        }
        ManagementOp::TransferOwnership { new_owner } => {
            let action = TransferOwnershipAction::new(
                provider,
                signer,
                TransferOwnership {
                    token,
                    caller,
                    new_owner,
                },
            );
            drive(action, dry_run).await
        }
        ManagementOp::RenounceOwnership => {
            let action =
                RenounceOwnershipAction::new(provider, signer, RenounceOwnership { token, caller });
            drive(action, dry_run).await
        }
    }
}

/// Common action driver: skip completed work, refuse unmet preconditions,
/// honor dry-run.
async fn drive<A: Action>(mut action: A, dry_run: bool) -> eyre::Result<Option<action::Result>> {
    info!("{}", action.description());

    if action.is_completed().await? {
        info!("Already in the target state; nothing to do");
        return Ok(None);
    }

    if !action.is_ready().await? {
        eyre::bail!("preconditions not met: {}", action.description())
    }

    if dry_run {
        info!("Dry-run: skipping execution");
        return Ok(None);
    }

    let result = action.execute().await?;
    Ok(Some(result))
}

/// On-chain status of a deployed token, as shown to the operator.
#[derive(Debug, Clone)]
pub struct TokenStatus {
    pub name: String,
    pub symbol: String,
    pub decimals: u8,
    pub total_supply: U256,
    pub owner: Address,
    pub paused: bool,
    pub caller_is_owner: bool,
}

/// Read the full status of a deployed token.
pub async fn token_status<P>(provider: &P, token: Address, caller: Address) -> eyre::Result<TokenStatus>
where
    P: Provider + Clone,
{
    let contract = IManagedToken::new(token, provider);

    let name = contract.name().call().await?;
    let symbol = contract.symbol().call().await?;
    let decimals = contract.decimals().call().await?;
    let total_supply = contract.totalSupply().call().await?;
    let owner = contract.owner().call().await?;
    let paused = contract.paused().call().await?;

    Ok(TokenStatus {
        name,
        symbol,
        decimals,
        total_supply,
        owner,
        paused,
        caller_is_owner: owner == caller,
    })
}

/// Parse a human decimal amount into base units for `decimals`.
pub fn parse_token_amount(value: &str, decimals: u8) -> eyre::Result<U256> {
    let (whole, frac) = match value.split_once('.') {
        Some((whole, frac)) => (whole, frac),
        None => (value, ""),
    };

    if whole.is_empty() && frac.is_empty() {
        eyre::bail!("empty amount")
    }
    if !whole.chars().all(|c| c.is_ascii_digit()) || !frac.chars().all(|c| c.is_ascii_digit()) {
        eyre::bail!("invalid amount: {value}")
    }
    if frac.len() > decimals as usize {
        eyre::bail!("amount has more than {decimals} decimal places")
    }

    let scale = U256::from(10u64).pow(U256::from(decimals));
    let mut base = U256::from_str_radix(if whole.is_empty() { "0" } else { whole }, 10)?
        .checked_mul(scale)
        .ok_or_else(|| eyre::eyre!("amount out of range"))?;

    if !frac.is_empty() {
        let mut padded = frac.to_string();
        while padded.len() < decimals as usize {
            padded.push('0');
        }
        base = base
            .checked_add(U256::from_str_radix(&padded, 10)?)
            .ok_or_else(|| eyre::eyre!("amount out of range"))?;
    }

    Ok(base)
}

/// Format base units as a human decimal string for `decimals`.
pub fn format_token_amount(amount: U256, decimals: u8) -> String {
    if decimals == 0 {
        return amount.to_string();
    }

    let scale = U256::from(10u64).pow(U256::from(decimals));
    let whole = amount / scale;
    let frac = amount % scale;
    if frac.is_zero() {
        return whole.to_string();
    }

    let frac = format!("{:0>width$}", frac.to_string(), width = decimals as usize);
    format!("{}.{}", whole, frac.trim_end_matches('0'))
}
