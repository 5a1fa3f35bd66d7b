//! Mint transaction controller.
//!
//! # Responsibilities
//! - Gate mints on a connected wallet session
//! - Allow at most one in-flight attempt
//! - Drive `Idle → Submitting → Submitted → Confirmed | Failed`
//! - Notify the user at submission, confirmation and failure
//!
//! # Design Decisions
//! - No automatic retry; every retry is a new `mint` call
//! - Dropping an in-flight `mint` future fails the attempt as cancelled
//! - The confirmation wait is unbounded unless a timeout is configured

use alloy::primitives::{Address, U256};
use std::sync::{Arc, Mutex, MutexGuard};
use std::time::Duration;
use uuid::Uuid;

use crate::catalog::ArtworkRecord;
use crate::config::ContractConfig;
use crate::contract::{ContractError, MintCall, MintContract, MintReceipt};
use crate::mint::attempt::MintAttempt;
use crate::mint::types::{MintError, MintOutcome, MintStatus};
use crate::notifications::{self, Notification, Notifier};
use crate::observability::metrics;
use crate::wallet::WalletSessionManager;

/// Detail recorded when an in-flight mint is dropped.
pub const CANCELLED_DETAIL: &str = "mint cancelled";

/// Tunables for the controller.
#[derive(Debug, Clone)]
pub struct MintSettings {
    /// Prefix for derived metadata URIs.
    pub metadata_base_uri: String,
    /// Attach the artwork price as call value.
    pub attach_price: bool,
    /// Upper bound on the confirmation wait.
    pub confirmation_timeout: Option<Duration>,
}

impl Default for MintSettings {
    fn default() -> Self {
        Self::from(&ContractConfig::default())
    }
}

impl From<&ContractConfig> for MintSettings {
    fn from(config: &ContractConfig) -> Self {
        Self {
            metadata_base_uri: config.metadata_base_uri.clone(),
            attach_price: config.attach_price,
            confirmation_timeout: config.confirmation_timeout_secs.map(Duration::from_secs),
        }
    }
}

/// Drives mints of catalog artworks through the connected wallet.
pub struct MintController {
    session: Arc<WalletSessionManager>,
    contract: Option<Arc<dyn MintContract>>,
    notifier: Arc<dyn Notifier>,
    settings: MintSettings,
    current: Mutex<Option<MintAttempt>>,
}

impl MintController {
    /// Create a controller. `contract` is `None` when no wallet can sign.
    pub fn new(
        session: Arc<WalletSessionManager>,
        contract: Option<Arc<dyn MintContract>>,
        notifier: Arc<dyn Notifier>,
        settings: MintSettings,
    ) -> Self {
        Self {
            session,
            contract,
            notifier,
            settings,
            current: Mutex::new(None),
        }
    }

    /// Mint `artwork` to the connected account.
    ///
    /// `on_success` runs once, after confirmation.
    pub async fn mint<F>(&self, artwork: &ArtworkRecord, on_success: F) -> MintOutcome
    where
        F: FnOnce(&ArtworkRecord, &MintReceipt) + Send,
    {
        let session = self.session.session();
        let recipient = match (session.connected, session.address) {
            (true, Some(address)) => address,
            _ => {
                metrics::record_mint("not_connected");
                self.emit(Notification::error(
                    "Wallet not connected",
                    "Please connect your wallet first",
                ));
                if let Err(e) = self.session.connect().await {
                    tracing::debug!(error = %e, "Connect requested by mint did not succeed");
                }
                return MintOutcome::NotConnected;
            }
        };

        let Some(id) = self.begin(artwork) else {
            tracing::debug!(artwork_id = artwork.id, "Mint already in progress, ignoring");
            return MintOutcome::AlreadyInProgress;
        };
        let mut guard = AttemptGuard {
            controller: self,
            id,
            armed: true,
        };

        match self.submit_and_confirm(id, artwork, recipient).await {
            Ok(receipt) => {
                self.update(id, |a| a.advance(MintStatus::Confirmed));
                guard.armed = false;
                tracing::info!(
                    attempt_id = %id,
                    artwork_id = artwork.id,
                    tx_hash = %receipt.tx_hash,
                    "Mint confirmed"
                );
                metrics::record_mint("confirmed");
                self.emit(Notification::info(
                    "NFT Minted Successfully!",
                    format!("You've successfully minted \"{}\"", artwork.name),
                ));
                on_success(artwork, &receipt);
                MintOutcome::Confirmed(receipt)
            }
            Err(err) => {
                self.fail(id, &err.to_string());
                guard.armed = false;
                MintOutcome::Failed(err)
            }
        }
    }

    /// Whether an attempt is `Submitting` or `Submitted`.
    pub fn in_progress(&self) -> bool {
        self.lock()
            .as_ref()
            .is_some_and(MintAttempt::is_in_progress)
    }

    /// Status of the latest attempt, `Idle` if there is none.
    pub fn status(&self) -> MintStatus {
        self.lock()
            .as_ref()
            .map_or(MintStatus::Idle, |a| a.status)
    }

    /// Snapshot of the latest attempt.
    pub fn current_attempt(&self) -> Option<MintAttempt> {
        self.lock().clone()
    }

    /// Claim the attempt slot, or `None` if another attempt is in flight.
    fn begin(&self, artwork: &ArtworkRecord) -> Option<Uuid> {
        let mut current = self.lock();
        if current.as_ref().is_some_and(MintAttempt::is_in_progress) {
            return None;
        }
        let mut attempt = MintAttempt::new(artwork.clone());
        attempt.advance(MintStatus::Submitting).ok()?;
        let id = attempt.id;
        *current = Some(attempt);
        Some(id)
    }

    async fn submit_and_confirm(
        &self,
        id: Uuid,
        artwork: &ArtworkRecord,
        recipient: Address,
    ) -> Result<MintReceipt, MintError> {
        let contract = self.contract.as_ref().ok_or(MintError::NoProviderDetected)?;

        let value = if self.settings.attach_price {
            artwork
                .price_wei()
                .map_err(|e| MintError::UnknownFailure(format!("invalid price: {}", e)))?
        } else {
            U256::ZERO
        };

        let call = MintCall {
            recipient,
            edition_name: artwork.name.clone(),
            art_piece_id: artwork.id.to_string(),
            metadata_uri: artwork.metadata_uri(&self.settings.metadata_base_uri),
            value,
        };
        tracing::info!(
            attempt_id = %id,
            artwork_id = artwork.id,
            recipient = %recipient,
            metadata_uri = %call.metadata_uri,
            "Submitting mint"
        );

        let handle = contract.mint_for_artist(call).await?;
        self.update(id, |a| a.submitted(handle.tx_hash));
        self.emit(Notification::info(
            "Transaction submitted",
            format!(
                "Minting \"{}\", waiting for confirmation of {}",
                artwork.name, handle.tx_hash
            ),
        ));

        let receipt = match self.settings.confirmation_timeout {
            None => contract.wait(&handle).await?,
            Some(limit) => tokio::time::timeout(limit, contract.wait(&handle))
                .await
                .unwrap_or(Err(ContractError::Timeout(limit.as_secs())))?,
        };
        Ok(receipt)
    }

    fn fail(&self, id: Uuid, detail: &str) {
        self.update(id, |a| a.fail(detail));
        tracing::warn!(attempt_id = %id, error = %detail, "Minting error");
        metrics::record_mint("failed");
        self.emit(Notification::error(
            "Minting failed",
            format!("There was an error while minting your NFT: {}", detail),
        ));
    }

    /// Apply a transition to the attempt `id`, if it is still the current one.
    fn update<E: std::fmt::Display>(
        &self,
        id: Uuid,
        f: impl FnOnce(&mut MintAttempt) -> Result<(), E>,
    ) {
        let mut current = self.lock();
        match current.as_mut() {
            Some(attempt) if attempt.id == id => {
                if let Err(e) = f(attempt) {
                    tracing::error!(attempt_id = %id, error = %e, "Rejected mint transition");
                }
            }
            _ => tracing::error!(attempt_id = %id, "Mint attempt no longer current"),
        }
    }

    fn emit(&self, notification: Notification) {
        notifications::emit(self.notifier.as_ref(), notification);
    }

    fn lock(&self) -> MutexGuard<'_, Option<MintAttempt>> {
        self.current.lock().unwrap_or_else(|e| e.into_inner())
    }
}

impl std::fmt::Debug for MintController {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("MintController")
            .field("has_contract", &self.contract.is_some())
            .field("status", &self.status())
            .finish()
    }
}

/// Fails the attempt if the mint future is dropped before it finished.
struct AttemptGuard<'a> {
    controller: &'a MintController,
    id: Uuid,
    armed: bool,
}

impl Drop for AttemptGuard<'_> {
    fn drop(&mut self) {
        if self.armed {
            self.controller.fail(self.id, CANCELLED_DETAIL);
        }
    }
}
