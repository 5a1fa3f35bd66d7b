//! Key-backed wallet provider.
//!
//! # Security
//! - Private keys are loaded ONLY from environment variables
//! - Keys are never logged or serialized

use alloy::primitives::Address;
use alloy::signers::local::PrivateKeySigner;
use async_trait::async_trait;
use std::sync::atomic::{AtomicBool, Ordering};
use tokio::sync::broadcast;

use crate::wallet::provider::WalletProvider;
use crate::wallet::types::ProviderError;

/// Environment variable name for the private key.
pub const PRIVATE_KEY_ENV_VAR: &str = "CRYPTOART_PRIVATE_KEY";

/// A wallet provider holding a single local signing key.
///
/// Access starts unauthorized; the first `request_accounts` grants it and
/// `revoke` withdraws it, broadcasting an empty account list.
#[derive(Debug)]
pub struct LocalWalletProvider {
    signer: PrivateKeySigner,
    authorized: AtomicBool,
    accounts_tx: broadcast::Sender<Vec<Address>>,
}

impl LocalWalletProvider {
    /// Create a provider from a hex-encoded private key (with or without 0x prefix).
    pub fn from_private_key(private_key_hex: &str) -> Result<Self, ProviderError> {
        let key_hex = private_key_hex.strip_prefix("0x").unwrap_or(private_key_hex);

        let signer: PrivateKeySigner = key_hex.parse().map_err(|e| {
            ProviderError::Unavailable(format!("Invalid private key format: {}", e))
        })?;

        tracing::info!(address = %signer.address(), "Local wallet loaded");

        let (accounts_tx, _) = broadcast::channel(16);
        Ok(Self {
            signer,
            authorized: AtomicBool::new(false),
            accounts_tx,
        })
    }

    /// Detect a provider in the environment.
    ///
    /// Returns `Ok(None)` when `CRYPTOART_PRIVATE_KEY` is not set.
    pub fn from_env() -> Result<Option<Self>, ProviderError> {
        match std::env::var(PRIVATE_KEY_ENV_VAR) {
            Ok(key) => Self::from_private_key(&key).map(Some),
            Err(_) => Ok(None),
        }
    }

    pub fn address(&self) -> Address {
        self.signer.address()
    }

    /// Signer for transactions sent on behalf of this wallet.
    pub fn signer(&self) -> PrivateKeySigner {
        self.signer.clone()
    }

    /// Withdraw authorization, as a user would from the wallet itself.
    pub fn revoke(&self) {
        if self.authorized.swap(false, Ordering::SeqCst) {
            tracing::info!(address = %self.address(), "Wallet authorization revoked");
            let _ = self.accounts_tx.send(Vec::new());
        }
    }

    fn authorized_accounts(&self) -> Vec<Address> {
        if self.authorized.load(Ordering::SeqCst) {
            vec![self.address()]
        } else {
            Vec::new()
        }
    }
}

#[async_trait]
impl WalletProvider for LocalWalletProvider {
    async fn request_accounts(&self) -> Result<Vec<Address>, ProviderError> {
        self.authorized.store(true, Ordering::SeqCst);
        Ok(vec![self.address()])
    }

    async fn accounts(&self) -> Result<Vec<Address>, ProviderError> {
        Ok(self.authorized_accounts())
    }

    fn subscribe_accounts(&self) -> broadcast::Receiver<Vec<Address>> {
        self.accounts_tx.subscribe()
    }
}
