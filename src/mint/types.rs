//! Mint status, outcome and error definitions.

use serde::Serialize;
use thiserror::Error;

use crate::contract::{ContractError, MintReceipt};
use crate::wallet::WalletError;

/// Lifecycle status of one mint attempt.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum MintStatus {
    Idle,
    Submitting,
    Submitted,
    Confirmed,
    Failed,
}

impl MintStatus {
    /// Whether a transaction may be in flight.
    pub fn is_in_progress(self) -> bool {
        matches!(self, MintStatus::Submitting | MintStatus::Submitted)
    }

    /// Allowed edges of the attempt state machine.
    pub fn can_transition_to(self, next: MintStatus) -> bool {
        use MintStatus::*;
        matches!(
            (self, next),
            (Idle, Submitting)
                | (Submitting, Submitted)
                | (Submitting, Failed)
                | (Submitted, Confirmed)
                | (Submitted, Failed)
        )
    }

    pub fn as_str(self) -> &'static str {
        match self {
            MintStatus::Idle => "idle",
            MintStatus::Submitting => "submitting",
            MintStatus::Submitted => "submitted",
            MintStatus::Confirmed => "confirmed",
            MintStatus::Failed => "failed",
        }
    }
}

/// Why a mint attempt failed.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum MintError {
    #[error("no wallet provider detected")]
    NoProviderDetected,

    #[error("wallet connection rejected: {0}")]
    ConnectionRejected(String),

    #[error("transaction rejected: {0}")]
    ContractCallRejected(String),

    #[error("network error: {0}")]
    NetworkError(String),

    #[error("{0}")]
    UnknownFailure(String),
}

impl From<ContractError> for MintError {
    fn from(err: ContractError) -> Self {
        match err {
            ContractError::UserRejected(msg) => MintError::ContractCallRejected(msg),
            ContractError::Network(msg) => MintError::NetworkError(msg),
            ContractError::Timeout(_) => MintError::NetworkError(err.to_string()),
            ContractError::Reverted(_) | ContractError::Other(_) => {
                MintError::UnknownFailure(err.to_string())
            }
        }
    }
}

impl From<WalletError> for MintError {
    fn from(err: WalletError) -> Self {
        match err {
            WalletError::NoProviderDetected => MintError::NoProviderDetected,
            WalletError::ConnectionRejected(msg) => MintError::ConnectionRejected(msg),
            other => MintError::UnknownFailure(other.to_string()),
        }
    }
}

/// Result of one `mint` invocation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum MintOutcome {
    /// No session; a connect was requested and the mint was not attempted.
    NotConnected,
    /// Another attempt is in flight; nothing was submitted.
    AlreadyInProgress,
    Confirmed(MintReceipt),
    Failed(MintError),
}
