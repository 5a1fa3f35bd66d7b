//! Blockchain read subsystem.
//!
//! # Data Flow
//! ```text
//! BlockchainConfig (RPC URLs, chain id, confirmation depth)
//!     → client.rs (RPC connection with timeouts and failover)
//!     → transaction.rs (receipt polling until confirmed)
//! ```
//!
//! Signing lives with the wallet provider; this module never holds keys.

pub mod client;
pub mod transaction;
pub mod types;

pub use client::BlockchainClient;
pub use transaction::ConfirmationWatcher;
pub use types::{BlockchainConfig, BlockchainError, ChainId, ConfirmationStatus};
