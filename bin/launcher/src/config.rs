use alloy_primitives::Address;
use config::{NetworkConfig, NetworkType};
use serde::{Deserialize, Serialize};
use std::path::Path;

/// Top-level launcher configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Config {
    /// Target network (mainnet or testnet)
    pub network: NetworkType,

    /// RPC endpoint override; defaults to the network profile's public RPC
    #[serde(default)]
    pub rpc_url: Option<String>,

    /// Compilation service base URL
    pub compiler_url: String,

    /// Registry service base URL
    pub registry_url: String,

    /// Wallet (EOA) address deployments are attributed to
    pub wallet_address: Address,

    /// Dry-run mode: log actions without executing transactions
    #[serde(default)]
    pub dry_run: bool,
}

impl Config {
    pub fn from_file(path: impl AsRef<Path>) -> eyre::Result<Self> {
        let contents = std::fs::read_to_string(path)?;
        let config: Self = toml::from_str(&contents)?;

        Ok(config)
    }

    /// Network profile for the configured chain.
    pub fn network_config(&self) -> NetworkConfig {
        NetworkConfig::from_network_type(self.network)
    }

    /// RPC endpoint, honoring the override.
    pub fn rpc_url(&self) -> String {
        self.rpc_url
            .clone()
            .unwrap_or_else(|| self.network_config().chain.rpc_url)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_config_parses_minimal_toml() {
        let config: Config = toml::from_str(
            r#"
            network = "Testnet"
            compiler_url = "http://localhost:8080"
            registry_url = "http://localhost:8081"
            wallet_address = "0x5CFFA347b0aE99cc01E5c01714cA5658e54a23D1"
            "#,
        )
        .unwrap();

        assert_eq!(config.network, NetworkType::Testnet);
        assert!(!config.dry_run);
        assert_eq!(config.network_config().chain.chain_id, 97);
        // Falls back to the profile RPC when no override is set
        assert_eq!(config.rpc_url(), config.network_config().chain.rpc_url);
    }

    #[test]
    fn test_config_rpc_override_wins() {
        let config: Config = toml::from_str(
            r#"
            network = "Mainnet"
            rpc_url = "https://bsc.example.org/"
            compiler_url = "http://localhost:8080"
            registry_url = "http://localhost:8081"
            wallet_address = "0x5CFFA347b0aE99cc01E5c01714cA5658e54a23D1"
            dry_run = true
            "#,
        )
        .unwrap();

        assert_eq!(config.rpc_url(), "https://bsc.example.org/");
        assert!(config.dry_run);
    }
}
