//! Network profiles for token deployment and management.
//!
//! Provides chain-specific parameters for the supported networks
//! (BNB Chain mainnet and testnet).

use serde::{Deserialize, Serialize};

/// Network type (mainnet or testnet).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum NetworkType {
    Mainnet,
    Testnet,
}

/// Chain parameters for a single EVM network.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ChainConfig {
    /// Chain ID
    pub chain_id: u64,
    /// Human-readable network name
    pub name: String,
    /// Native currency symbol
    pub native_symbol: String,
    /// Default public RPC endpoint
    pub rpc_url: String,
    /// Block explorer base URL
    pub explorer_url: String,
    /// Block time in seconds (3 for BNB Chain)
    pub block_time_secs: u64,
}

impl ChainConfig {
    /// BNB Chain mainnet configuration.
    pub fn bsc_mainnet() -> Self {
        Self {
            chain_id: 56,
            name: "BNB Chain".to_string(),
            native_symbol: "BNB".to_string(),
            rpc_url: "https://bsc-dataseed.binance.org/".to_string(),
            // https://bscscan.com
            explorer_url: "https://bscscan.com".to_string(),
            block_time_secs: 3,
        }
    }

    /// BNB Chain testnet configuration.
    pub fn bsc_testnet() -> Self {
        Self {
            chain_id: 97,
            name: "BNB Chain Testnet".to_string(),
            native_symbol: "tBNB".to_string(),
            rpc_url: "https://data-seed-prebsc-1-s1.binance.org:8545/".to_string(),
            // https://testnet.bscscan.com
            explorer_url: "https://testnet.bscscan.com".to_string(),
            block_time_secs: 3,
        }
    }

    /// Explorer page for an address on this chain.
    pub fn explorer_address_url(&self, address: impl std::fmt::Display) -> String {
        format!("{}/address/{}", self.explorer_url, address)
    }

    /// Explorer page for a transaction on this chain.
    pub fn explorer_tx_url(&self, tx_hash: impl std::fmt::Display) -> String {
        format!("{}/tx/{}", self.explorer_url, tx_hash)
    }
}

/// Complete network configuration for deployments.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct NetworkConfig {
    /// Network type (mainnet or testnet)
    pub network_type: NetworkType,
    /// Target chain parameters
    pub chain: ChainConfig,
}

impl NetworkConfig {
    /// Create mainnet configuration.
    pub fn mainnet() -> Self {
        Self {
            network_type: NetworkType::Mainnet,
            chain: ChainConfig::bsc_mainnet(),
        }
    }

    /// Create testnet configuration.
    pub fn testnet() -> Self {
        Self {
            network_type: NetworkType::Testnet,
            chain: ChainConfig::bsc_testnet(),
        }
    }

    /// Create configuration from network type.
    pub fn from_network_type(network_type: NetworkType) -> Self {
        match network_type {
            NetworkType::Mainnet => Self::mainnet(),
            NetworkType::Testnet => Self::testnet(),
        }
    }
}

/// Builder for custom network configurations.
#[derive(Debug, Clone)]
pub struct NetworkConfigBuilder {
    network_type: NetworkType,
    chain: ChainConfig,
}

impl NetworkConfigBuilder {
    /// Start with mainnet defaults.
    pub fn mainnet() -> Self {
        Self {
            network_type: NetworkType::Mainnet,
            chain: ChainConfig::bsc_mainnet(),
        }
    }

    /// Start with testnet defaults.
    pub fn testnet() -> Self {
        Self {
            network_type: NetworkType::Testnet,
            chain: ChainConfig::bsc_testnet(),
        }
    }

    /// Override the RPC endpoint.
    pub fn rpc_url(mut self, url: impl Into<String>) -> Self {
        self.chain.rpc_url = url.into();
        self
    }

    /// Override the explorer base URL.
    pub fn explorer_url(mut self, url: impl Into<String>) -> Self {
        self.chain.explorer_url = url.into();
        self
    }

    /// Override the chain ID (private forks).
    pub fn chain_id(mut self, chain_id: u64) -> Self {
        self.chain.chain_id = chain_id;
        self
    }

    /// Build the network configuration.
    pub fn build(self) -> NetworkConfig {
        NetworkConfig {
            network_type: self.network_type,
            chain: self.chain,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_mainnet_config() {
        let config = NetworkConfig::mainnet();
        assert_eq!(config.chain.chain_id, 56);
        assert_eq!(config.chain.native_symbol, "BNB");
        assert_eq!(config.network_type, NetworkType::Mainnet);
    }

    #[test]
    fn test_testnet_config() {
        let config = NetworkConfig::testnet();
        assert_eq!(config.chain.chain_id, 97);
        assert_eq!(config.network_type, NetworkType::Testnet);
    }

    #[test]
    fn test_custom_config_builder() {
        let config = NetworkConfigBuilder::mainnet()
            .rpc_url("https://bsc.example.org/")
            .build();

        assert_eq!(config.chain.rpc_url, "https://bsc.example.org/");
        assert_eq!(config.chain.chain_id, 56);
        assert_eq!(config.network_type, NetworkType::Mainnet);
    }

    #[test]
    fn test_explorer_urls() {
        let chain = ChainConfig::bsc_mainnet();
        assert_eq!(
            chain.explorer_address_url("0x5c7BCd6E7De5423a257D81B442095A1a6ced35C5"),
            "https://bscscan.com/address/0x5c7BCd6E7De5423a257D81B442095A1a6ced35C5"
        );
        assert!(chain.explorer_tx_url("0xabc").starts_with("https://bscscan.com/tx/"));
    }
}
