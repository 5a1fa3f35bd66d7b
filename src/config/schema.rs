//! Configuration schema definitions.
//!
//! This module defines the complete configuration structure for the minting client.
//! All types derive Serde traits for deserialization from config files.

use serde::{Deserialize, Serialize};

use crate::catalog::ArtworkRecord;

/// Root configuration for the minting client.
#[derive(Debug, Clone, Deserialize, Serialize, Default)]
#[serde(default)]
pub struct MintConfig {
    /// Chain connection settings.
    pub blockchain: BlockchainConfig,

    /// Mint contract settings.
    pub contract: ContractConfig,

    /// Observability settings.
    pub observability: ObservabilityConfig,

    /// Artwork catalog. Empty means the built-in catalog is used.
    pub catalog: Vec<ArtworkRecord>,
}

/// Blockchain connection configuration.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct BlockchainConfig {
    /// JSON-RPC endpoint URL.
    pub rpc_url: String,

    /// Failover JSON-RPC endpoint URLs, used for read-only queries.
    pub failover_urls: Vec<String>,

    /// Chain ID (e.g., 1 for Ethereum mainnet, 31337 for local Anvil).
    pub chain_id: u64,

    /// RPC request timeout in seconds.
    pub rpc_timeout_secs: u64,

    /// Number of block confirmations required for finality.
    pub confirmation_blocks: u32,

    /// Receipt polling interval in milliseconds.
    pub poll_interval_ms: u64,
}

impl Default for BlockchainConfig {
    fn default() -> Self {
        Self {
            rpc_url: "http://localhost:8545".to_string(),
            failover_urls: Vec::new(),
            chain_id: 31337,
            rpc_timeout_secs: 10,
            confirmation_blocks: 1,
            poll_interval_ms: 2000,
        }
    }
}

/// Mint contract configuration.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct ContractConfig {
    /// Address of the NFT contract exposing `mintForArtist`.
    pub address: String,

    /// Prefix for metadata URIs of artworks without an explicit reference.
    pub metadata_base_uri: String,

    /// Send the artwork price as call value.
    pub attach_price: bool,

    /// Upper bound on the confirmation wait. `None` waits indefinitely.
    pub confirmation_timeout_secs: Option<u64>,
}

impl Default for ContractConfig {
    fn default() -> Self {
        Self {
            address: String::new(),
            metadata_base_uri: "ipfs://cryptoart/metadata/".to_string(),
            attach_price: false,
            confirmation_timeout_secs: None,
        }
    }
}

/// Observability configuration.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct ObservabilityConfig {
    /// Log level (trace, debug, info, warn, error).
    pub log_level: String,

    /// Enable the Prometheus metrics endpoint.
    pub metrics_enabled: bool,

    /// Metrics endpoint bind address.
    pub metrics_address: String,
}

impl Default for ObservabilityConfig {
    fn default() -> Self {
        Self {
            log_level: "info".to_string(),
            metrics_enabled: false,
            metrics_address: "127.0.0.1:9090".to_string(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_minimal_config_uses_defaults() {
        let config: MintConfig = toml::from_str(
            r#"
            [contract]
            address = "0x5FbDB2315678afecb367f032d93F642f64180aa3"
            "#,
        )
        .unwrap();

        assert_eq!(config.blockchain.rpc_url, "http://localhost:8545");
        assert_eq!(config.blockchain.confirmation_blocks, 1);
        assert_eq!(config.contract.metadata_base_uri, "ipfs://cryptoart/metadata/");
        assert!(config.contract.confirmation_timeout_secs.is_none());
        assert!(config.catalog.is_empty());
    }

    #[test]
    fn test_catalog_entries_parse() {
        let config: MintConfig = toml::from_str(
            r#"
            [[catalog]]
            id = 7
            name = "Quiet Orbit"
            artist = "Anon"
            price = "0.2 ETH"
            metadata_reference = "ipfs://bafy/7.json"
            "#,
        )
        .unwrap();

        assert_eq!(config.catalog.len(), 1);
        assert_eq!(config.catalog[0].id, 7);
        assert_eq!(
            config.catalog[0].metadata_reference.as_deref(),
            Some("ipfs://bafy/7.json")
        );
    }
}
