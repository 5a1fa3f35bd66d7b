//! Configuration validation.
//!
//! # Responsibilities
//! - Semantic validation (serde handles syntactic)
//! - Validate value ranges (timeouts > 0, URLs and addresses parse)
//! - Check catalog integrity (unique ids, named entries, parseable prices)
//!
//! # Design Decisions
//! - Returns all validation errors, not just first
//! - Validation is pure function: MintConfig → Result<(), Vec<ValidationError>>

use std::collections::HashSet;

use alloy::primitives::Address;
use thiserror::Error;

use crate::config::schema::MintConfig;

/// A single semantic problem in a configuration.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ValidationError {
    #[error("invalid URL in {field}: '{value}'")]
    InvalidUrl { field: &'static str, value: String },

    #[error("invalid contract address '{0}'")]
    InvalidAddress(String),

    #[error("{0} must be greater than zero")]
    ZeroValue(&'static str),

    #[error("duplicate artwork id {0} in catalog")]
    DuplicateArtwork(u64),

    #[error("artwork {0} has an empty name")]
    EmptyArtworkName(u64),

    #[error("artwork {id} has unparseable price '{price}'")]
    InvalidPrice { id: u64, price: String },
}

/// Validate a configuration, collecting every problem found.
pub fn validate_config(config: &MintConfig) -> Result<(), Vec<ValidationError>> {
    let mut errors = Vec::new();

    let chain = &config.blockchain;
    if url::Url::parse(&chain.rpc_url).is_err() {
        errors.push(ValidationError::InvalidUrl {
            field: "blockchain.rpc_url",
            value: chain.rpc_url.clone(),
        });
    }
    for failover in &chain.failover_urls {
        if url::Url::parse(failover).is_err() {
            errors.push(ValidationError::InvalidUrl {
                field: "blockchain.failover_urls",
                value: failover.clone(),
            });
        }
    }
    if chain.rpc_timeout_secs == 0 {
        errors.push(ValidationError::ZeroValue("blockchain.rpc_timeout_secs"));
    }
    if chain.poll_interval_ms == 0 {
        errors.push(ValidationError::ZeroValue("blockchain.poll_interval_ms"));
    }

    // An empty address is allowed; commands that mint check for it.
    let contract = &config.contract;
    if !contract.address.is_empty() && contract.address.parse::<Address>().is_err() {
        errors.push(ValidationError::InvalidAddress(contract.address.clone()));
    }
    if contract.confirmation_timeout_secs == Some(0) {
        errors.push(ValidationError::ZeroValue("contract.confirmation_timeout_secs"));
    }

    let mut seen = HashSet::new();
    for artwork in &config.catalog {
        if !seen.insert(artwork.id) {
            errors.push(ValidationError::DuplicateArtwork(artwork.id));
        }
        if artwork.name.trim().is_empty() {
            errors.push(ValidationError::EmptyArtworkName(artwork.id));
        }
        if artwork.price_wei().is_err() {
            errors.push(ValidationError::InvalidPrice {
                id: artwork.id,
                price: artwork.price.clone(),
            });
        }
    }

    if errors.is_empty() {
        Ok(())
    } else {
        Err(errors)
    }
}
