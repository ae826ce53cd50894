//! In-memory model of the generated token contract.
//!
//! The deployed contract is the source of truth on-chain; this crate
//! reproduces its exact authorization, balance, pausing, and blacklist
//! semantics so transitions can be validated locally and revert reasons
//! read back from the chain can be mapped onto a typed failure taxonomy.

pub mod state;
pub mod types;

pub use state::{initial_supply, TokenState, INITIAL_SUPPLY_TOKENS};
pub use types::{TokenError, TokenEvent};
