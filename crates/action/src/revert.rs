//! Revert-reason extraction for failed token calls.
//!
//! The generated contract reverts with `"<SYMBOL>: <message>"` reasons;
//! decoding them back into [`TokenError`] gives callers the same taxonomy
//! for on-chain failures as for local simulation.

use alloy_sol_types::{Revert, SolError};
use token::TokenError;

/// Extract the `Error(string)` reason from a failed contract call, if the
/// error carries revert data.
pub fn revert_reason(error: &alloy_contract::Error) -> Option<String> {
    let data = error.as_revert_data()?;
    Revert::abi_decode(&data).ok().map(|revert| revert.reason)
}

/// Map a failed contract call onto the token failure taxonomy where
/// possible; otherwise surface the raw revert reason or the original
/// error.
pub fn map_token_error(error: alloy_contract::Error) -> eyre::Report {
    if let Some(reason) = revert_reason(&error) {
        if let Some(token_error) = TokenError::from_revert_message(&reason) {
            return eyre::Report::new(token_error)
                .wrap_err(format!("call reverted: {reason}"));
        }
        return eyre::eyre!("call reverted: {reason}");
    }
    eyre::Report::new(error)
}
