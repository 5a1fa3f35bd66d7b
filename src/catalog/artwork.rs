//! Artwork records offered for minting.

use alloy::primitives::utils::parse_ether;
use alloy::primitives::U256;
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Errors from interpreting a display price.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum PriceError {
    #[error("unsupported currency '{0}', expected ETH")]
    UnsupportedCurrency(String),

    #[error("invalid amount '{0}'")]
    InvalidAmount(String),
}

/// An immutable catalog entry.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ArtworkRecord {
    /// Artwork identifier, passed to the contract as the art piece id.
    pub id: u64,
    /// Edition name.
    pub name: String,
    /// Artist credit shown in listings.
    #[serde(default)]
    pub artist: String,
    /// Display price, e.g. "0.05 ETH".
    pub price: String,
    /// Explicit metadata URI, if the artwork has one.
    #[serde(default)]
    pub metadata_reference: Option<String>,
}

impl ArtworkRecord {
    pub fn new(id: u64, name: &str, artist: &str, price: &str) -> Self {
        Self {
            id,
            name: name.to_string(),
            artist: artist.to_string(),
            price: price.to_string(),
            metadata_reference: None,
        }
    }

    /// Parse the display price into wei.
    ///
    /// Accepts `"<amount>"` or `"<amount> ETH"`.
    pub fn price_wei(&self) -> Result<U256, PriceError> {
        let mut parts = self.price.split_whitespace();
        let amount = parts
            .next()
            .ok_or_else(|| PriceError::InvalidAmount(self.price.clone()))?;

        if let Some(currency) = parts.next() {
            if !currency.eq_ignore_ascii_case("ETH") || parts.next().is_some() {
                return Err(PriceError::UnsupportedCurrency(currency.to_string()));
            }
        }

        parse_ether(amount).map_err(|_| PriceError::InvalidAmount(amount.to_string()))
    }

    /// Metadata URI for this artwork: the explicit reference, or
    /// `<base_uri><id>.json`.
    pub fn metadata_uri(&self, base_uri: &str) -> String {
        match &self.metadata_reference {
            Some(reference) => reference.clone(),
            None => format!("{}{}.json", base_uri, self.id),
        }
    }
}
