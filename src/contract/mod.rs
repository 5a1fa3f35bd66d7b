//! Mint contract subsystem.
//!
//! # Data Flow
//! ```text
//! MintCall (recipient, edition name, art piece id, metadata URI)
//!     → MintContract::mint_for_artist (sign + submit)
//!     → TxHandle
//!     → MintContract::wait (confirmation)
//!     → MintReceipt
//! ```

pub mod evm;
pub mod types;

pub use evm::AlloyMintContract;
pub use types::{ContractError, ContractResult, MintCall, MintReceipt, TxHandle};

use async_trait::async_trait;

/// Contract exposing the `mintForArtist` entry point.
#[async_trait]
pub trait MintContract: Send + Sync {
    /// Sign and submit a mint. Resolves once the network accepted the transaction.
    async fn mint_for_artist(&self, call: MintCall) -> ContractResult<TxHandle>;

    /// Wait for a submitted mint to be confirmed.
    async fn wait(&self, handle: &TxHandle) -> ContractResult<MintReceipt>;
}
