use alloy_primitives::{Address, U256};
use thiserror::Error;

/// Notification emitted by a successful state transition.
///
/// These mirror the events of the generated contract one-for-one. A
/// transition returns exactly the events the deployed contract would emit
/// for the same call, in the same order, and nothing on failure.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TokenEvent {
    Transfer {
        from: Address,
        to: Address,
        value: U256,
    },
    Approval {
        owner: Address,
        spender: Address,
        value: U256,
    },
    Paused {
        account: Address,
    },
    Unpaused {
        account: Address,
    },
    OwnershipTransferred {
        previous_owner: Address,
        new_owner: Address,
    },
    Blacklisted {
        account: Address,
    },
    Unblacklisted {
        account: Address,
    },
    Mint {
        to: Address,
        amount: U256,
    },
    Burn {
        from: Address,
        amount: U256,
    },
}

/// Failure taxonomy of the generated contract.
///
/// On-chain, failures surface as revert reasons of the form
/// `"<SYMBOL>: <message>"`; [`TokenError::from_revert_message`] maps those
/// back onto this taxonomy. The mapping is many-to-one where the contract
/// uses distinct require strings for the same condition (balance checks in
/// transfer and burn, the zero-address guards).
#[derive(Error, Debug, Clone, Copy, PartialEq, Eq)]
pub enum TokenError {
    #[error("caller is not the owner")]
    NotOwner,

    #[error("token transfers are paused")]
    Paused,

    #[error("token is not paused")]
    NotPaused,

    #[error("token is already paused")]
    AlreadyPaused,

    #[error("account is blacklisted")]
    Blacklisted,

    #[error("amount exceeds balance")]
    InsufficientBalance,

    #[error("amount exceeds allowance")]
    InsufficientAllowance,

    #[error("decreased allowance below zero")]
    AllowanceUnderflow,

    #[error("the zero address is not a valid participant")]
    ZeroAddress,

    #[error("owner cannot be blacklisted")]
    CannotBlacklistOwner,

    #[error("arithmetic overflow")]
    Overflow,
}

impl TokenError {
    /// Map a revert reason from the deployed contract back onto the
    /// taxonomy.
    ///
    /// Accepts the reason with or without its `"<SYMBOL>: "` prefix.
    /// Returns `None` for reasons the generated contract never produces.
    /// `Overflow` has no mapping: Solidity ^0.8 arithmetic failures revert
    /// with a panic code rather than an `Error(string)` reason.
    pub fn from_revert_message(reason: &str) -> Option<Self> {
        let message = reason.split_once(": ").map_or(reason, |(_, m)| m);
        Some(match message {
            "caller is not the owner" => Self::NotOwner,
            "paused" => Self::Paused,
            "not paused" => Self::NotPaused,
            "account is blacklisted" => Self::Blacklisted,
            "transfer amount exceeds balance" | "burn amount exceeds balance" => {
                Self::InsufficientBalance
            }
            "transfer amount exceeds allowance" => Self::InsufficientAllowance,
            "decreased allowance below zero" => Self::AllowanceUnderflow,
            "transfer from the zero address"
            | "transfer to the zero address"
            | "approve from the zero address"
            | "approve to the zero address"
            | "mint to the zero address"
            | "new owner is zero address" => Self::ZeroAddress,
            "cannot blacklist owner" => Self::CannotBlacklistOwner,
            _ => return None,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_revert_mapping_strips_symbol_prefix() {
        assert_eq!(
            TokenError::from_revert_message("TTK: caller is not the owner"),
            Some(TokenError::NotOwner)
        );
        assert_eq!(
            TokenError::from_revert_message("caller is not the owner"),
            Some(TokenError::NotOwner)
        );
    }

    #[test]
    fn test_revert_mapping_covers_contract_reasons() {
        let cases = [
            ("MTK: paused", TokenError::Paused),
            ("MTK: not paused", TokenError::NotPaused),
            ("MTK: account is blacklisted", TokenError::Blacklisted),
            (
                "MTK: transfer amount exceeds balance",
                TokenError::InsufficientBalance,
            ),
            (
                "MTK: burn amount exceeds balance",
                TokenError::InsufficientBalance,
            ),
            (
                "MTK: transfer amount exceeds allowance",
                TokenError::InsufficientAllowance,
            ),
            (
                "MTK: decreased allowance below zero",
                TokenError::AllowanceUnderflow,
            ),
            ("MTK: mint to the zero address", TokenError::ZeroAddress),
            ("MTK: new owner is zero address", TokenError::ZeroAddress),
            (
                "MTK: cannot blacklist owner",
                TokenError::CannotBlacklistOwner,
            ),
        ];

        for (reason, expected) in cases {
            assert_eq!(
                TokenError::from_revert_message(reason),
                Some(expected),
                "reason: {reason}"
            );
        }
    }

    #[test]
    fn test_revert_mapping_rejects_unknown_reasons() {
        assert_eq!(TokenError::from_revert_message("out of gas"), None);
        assert_eq!(TokenError::from_revert_message(""), None);
    }
}
