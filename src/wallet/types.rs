//! Wallet session state and error definitions.

use alloy::primitives::Address;
use serde::Serialize;
use thiserror::Error;

/// EIP-1193 error code for a request the user declined.
pub const USER_REJECTED_CODE: i64 = 4001;

/// Snapshot of the connection to the wallet provider.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct WalletSession {
    /// Active account, if connected.
    pub address: Option<Address>,
    /// Whether the session has an authorized account.
    pub connected: bool,
    /// Whether a connect request is waiting on the provider.
    pub connecting: bool,
}

impl WalletSession {
    /// Short display form of the active address, e.g. `0xf39F...2266`.
    pub fn short_address(&self) -> Option<String> {
        self.address.map(|a| {
            let full = a.to_checksum(None);
            format!("{}...{}", &full[..6], &full[full.len() - 4..])
        })
    }
}

/// Errors reported by a wallet provider.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ProviderError {
    #[error("{0}")]
    UserRejected(String),

    #[error("provider error {code}: {message}")]
    Rpc { code: i64, message: String },

    #[error("provider unavailable: {0}")]
    Unavailable(String),
}

impl ProviderError {
    /// Classify a provider error response by its EIP-1193 code.
    pub fn from_code(code: i64, message: impl Into<String>) -> Self {
        let message = message.into();
        if code == USER_REJECTED_CODE {
            ProviderError::UserRejected(message)
        } else {
            ProviderError::Rpc { code, message }
        }
    }
}

/// Errors from session manager operations.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum WalletError {
    #[error("no wallet provider detected")]
    NoProviderDetected,

    #[error("wallet connection rejected: {0}")]
    ConnectionRejected(String),

    #[error("a connection request is already pending")]
    ConnectInProgress,

    #[error("account listener already active for this session")]
    ListenerActive,
}

/// Result type for session operations.
pub type WalletResult<T> = Result<T, WalletError>;
