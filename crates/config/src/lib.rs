//! Configuration types for the token launcher.
//!
//! This crate provides:
//! - Network profiles for the supported chains (BNB Chain mainnet, testnet)
//! - Explorer link helpers
//! - A builder for custom RPC/explorer overrides

pub mod network;

pub use network::{ChainConfig, NetworkConfig, NetworkConfigBuilder, NetworkType};
