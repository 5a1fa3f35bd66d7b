//! Wallet provider boundary.

use alloy::primitives::Address;
use async_trait::async_trait;
use tokio::sync::broadcast;

use crate::wallet::types::ProviderError;

/// An account-holding wallet that can authorize this client.
#[async_trait]
pub trait WalletProvider: Send + Sync {
    /// Ask the user to authorize access. May prompt.
    async fn request_accounts(&self) -> Result<Vec<Address>, ProviderError>;

    /// Accounts already authorized. Never prompts.
    async fn accounts(&self) -> Result<Vec<Address>, ProviderError>;

    /// Account-change notifications. An empty list means the wallet disconnected.
    fn subscribe_accounts(&self) -> broadcast::Receiver<Vec<Address>>;
}
