//! A single mint attempt and its status history.

use alloy::primitives::TxHash;
use serde::Serialize;
use thiserror::Error;
use uuid::Uuid;

use crate::catalog::ArtworkRecord;
use crate::mint::types::MintStatus;

/// Rejected status change.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
#[error("invalid mint transition {from:?} -> {to:?}")]
pub struct InvalidTransition {
    pub from: MintStatus,
    pub to: MintStatus,
}

/// One in-flight or finished mint.
#[derive(Debug, Clone, Serialize)]
pub struct MintAttempt {
    pub id: Uuid,
    pub artwork: ArtworkRecord,
    pub status: MintStatus,
    pub error_detail: Option<String>,
    pub tx_hash: Option<TxHash>,
    /// Every status this attempt has held, oldest first.
    pub history: Vec<MintStatus>,
}

impl MintAttempt {
    pub fn new(artwork: ArtworkRecord) -> Self {
        Self {
            id: Uuid::new_v4(),
            artwork,
            status: MintStatus::Idle,
            error_detail: None,
            tx_hash: None,
            history: vec![MintStatus::Idle],
        }
    }

    /// Move to `next` if the state machine allows it.
    pub fn advance(&mut self, next: MintStatus) -> Result<(), InvalidTransition> {
        if !self.status.can_transition_to(next) {
            return Err(InvalidTransition {
                from: self.status,
                to: next,
            });
        }
        self.status = next;
        self.history.push(next);
        Ok(())
    }

    /// Record the submitted transaction.
    pub fn submitted(&mut self, tx_hash: TxHash) -> Result<(), InvalidTransition> {
        self.advance(MintStatus::Submitted)?;
        self.tx_hash = Some(tx_hash);
        Ok(())
    }

    /// Terminate with a failure detail.
    pub fn fail(&mut self, detail: impl Into<String>) -> Result<(), InvalidTransition> {
        self.advance(MintStatus::Failed)?;
        self.error_detail = Some(detail.into());
        Ok(())
    }

    pub fn is_in_progress(&self) -> bool {
        self.status.is_in_progress()
    }
}
