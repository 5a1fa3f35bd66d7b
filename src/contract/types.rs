//! Mint contract call types and error definitions.

use alloy::primitives::{Address, TxHash, U256};
use serde::Serialize;
use thiserror::Error;

/// Arguments of one `mintForArtist` call.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct MintCall {
    pub recipient: Address,
    pub edition_name: String,
    pub art_piece_id: String,
    pub metadata_uri: String,
    /// Native value attached to the call; zero when the price is not charged.
    pub value: U256,
}

/// Handle to a submitted, not yet confirmed, transaction.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TxHandle {
    pub tx_hash: TxHash,
}

/// Proof that a mint reached finality.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct MintReceipt {
    pub tx_hash: TxHash,
    pub block_number: Option<u64>,
}

/// Errors at the contract boundary.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ContractError {
    /// The user declined to sign.
    #[error("{0}")]
    UserRejected(String),

    /// Submission or confirmation transport failure.
    #[error("{0}")]
    Network(String),

    /// The chain rejected or reverted the call.
    #[error("transaction reverted: {0}")]
    Reverted(String),

    /// No confirmation within the allowed wait.
    #[error("transaction not confirmed within {0} seconds")]
    Timeout(u64),

    #[error("{0}")]
    Other(String),
}

/// Result type for contract operations.
pub type ContractResult<T> = Result<T, ContractError>;
