//! Wallet session manager.
//!
//! # Responsibilities
//! - Own the single `WalletSession` and its mutation entry points
//! - Connect/disconnect on user action
//! - Follow provider account changes through a scoped listener
//! - Emit one notification per state transition
//!
//! # State Transitions
//! ```text
//! disconnected ──connect()──▶ connecting ──granted──▶ connected
//!                                  └──rejected──▶ disconnected
//! connected ──disconnect() / empty accounts──▶ disconnected
//! connected ──accounts [a, ..]──▶ connected (address = a)
//! ```

use alloy::primitives::Address;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::{Arc, RwLock, RwLockReadGuard, RwLockWriteGuard};
use tokio::sync::broadcast::{self, error::RecvError};
use tokio::task::JoinHandle;

use crate::notifications::{self, Notification, Notifier};
use crate::observability::metrics;
use crate::wallet::provider::WalletProvider;
use crate::wallet::types::{WalletError, WalletResult, WalletSession};

/// Tracks the connection to a wallet provider.
///
/// Shared as `Arc<WalletSessionManager>` with every consumer of the session.
pub struct WalletSessionManager {
    provider: Option<Arc<dyn WalletProvider>>,
    notifier: Arc<dyn Notifier>,
    state: RwLock<WalletSession>,
    probed: AtomicBool,
    listening: AtomicBool,
}

impl WalletSessionManager {
    /// Create a manager. `provider` is `None` when no wallet was detected.
    pub fn new(provider: Option<Arc<dyn WalletProvider>>, notifier: Arc<dyn Notifier>) -> Self {
        Self {
            provider,
            notifier,
            state: RwLock::new(WalletSession::default()),
            probed: AtomicBool::new(false),
            listening: AtomicBool::new(false),
        }
    }

    /// Probe for existing authorization and start following account changes.
    ///
    /// Only one listener may be active per manager; dropping the returned
    /// guard stops it.
    pub async fn start(self: &Arc<Self>) -> WalletResult<AccountsListener> {
        if self.listening.swap(true, Ordering::SeqCst) {
            return Err(WalletError::ListenerActive);
        }

        // Owns the flag from here on, so a cancelled probe releases it.
        let mut listener = AccountsListener {
            manager: Arc::clone(self),
            task: None,
        };

        // Subscribe before probing so a change during the probe is not lost.
        let receiver = self.provider.as_ref().map(|p| p.subscribe_accounts());
        self.initialize().await;

        listener.task = receiver.map(|rx| tokio::spawn(listen(Arc::clone(self), rx)));
        tracing::debug!(active = listener.task.is_some(), "Account listener started");

        Ok(listener)
    }

    /// Read-only check for accounts authorized in an earlier visit.
    ///
    /// Runs once; later calls return immediately. A probe cancelled midway
    /// does not count.
    pub async fn initialize(&self) {
        if self.probed.swap(true, Ordering::SeqCst) {
            return;
        }
        let Some(provider) = &self.provider else {
            tracing::debug!("No wallet provider, skipping authorization probe");
            return;
        };

        let mut pending = PendingProbe {
            probed: &self.probed,
            done: false,
        };
        let result = provider.accounts().await;
        pending.done = true;

        match result {
            Ok(accounts) => {
                if let Some(&address) = accounts.first() {
                    let mut state = self.write_state();
                    state.address = Some(address);
                    state.connected = true;
                    tracing::info!(address = %address, "Restored existing wallet authorization");
                }
            }
            Err(e) => tracing::warn!(error = %e, "Error checking wallet connection"),
        }
    }

    /// Request account access from the provider.
    ///
    /// Idempotent while connected: returns the current address without
    /// prompting again.
    pub async fn connect(&self) -> WalletResult<Address> {
        let Some(provider) = self.provider.clone() else {
            metrics::record_connect("no_provider");
            self.emit(Notification::error(
                "No wallet detected",
                "Please install MetaMask or another Web3 wallet",
            ));
            return Err(WalletError::NoProviderDetected);
        };

        {
            let mut state = self.write_state();
            if let (true, Some(address)) = (state.connected, state.address) {
                tracing::debug!(address = %address, "Already connected");
                return Ok(address);
            }
            if state.connecting {
                return Err(WalletError::ConnectInProgress);
            }
            state.connecting = true;
        }
        let _connecting = ConnectingFlag(&self.state);

        let reason = match provider.request_accounts().await {
            Ok(accounts) => match accounts.first() {
                Some(&address) => {
                    {
                        let mut state = self.write_state();
                        state.address = Some(address);
                        state.connected = true;
                    }
                    tracing::info!(address = %address, "Wallet connected");
                    metrics::record_connect("success");
                    self.emit(Notification::info(
                        "Wallet connected",
                        "Your wallet has been successfully connected",
                    ));
                    return Ok(address);
                }
                None => "provider returned no accounts".to_string(),
            },
            Err(e) => e.to_string(),
        };

        tracing::warn!(reason = %reason, "Error connecting wallet");
        metrics::record_connect("rejected");
        self.emit(Notification::error(
            "Connection failed",
            "Failed to connect to your wallet",
        ));
        Err(WalletError::ConnectionRejected(reason))
    }

    /// Forget the active account. Provider-side permission is untouched.
    pub fn disconnect(&self) {
        self.reset("user");
    }

    /// Apply an account-change notification from the provider.
    pub fn handle_accounts_changed(&self, accounts: &[Address]) {
        match accounts.first() {
            None => {
                self.reset("provider");
            }
            Some(&address) => {
                let mut state = self.write_state();
                if state.address != Some(address) || !state.connected {
                    tracing::info!(address = %address, "Active wallet account changed");
                }
                state.address = Some(address);
                state.connected = true;
            }
        }
    }

    /// Current session state.
    pub fn session(&self) -> WalletSession {
        self.read_state().clone()
    }

    pub fn is_connected(&self) -> bool {
        self.read_state().connected
    }

    pub fn is_connecting(&self) -> bool {
        self.read_state().connecting
    }

    pub fn address(&self) -> Option<Address> {
        self.read_state().address
    }

    pub fn has_provider(&self) -> bool {
        self.provider.is_some()
    }

    /// Clear the session; notifies only if something was actually cleared.
    fn reset(&self, source: &'static str) -> bool {
        let was_connected = {
            let mut state = self.write_state();
            let was = state.connected || state.address.is_some();
            state.address = None;
            state.connected = false;
            was
        };

        if was_connected {
            tracing::info!(source = source, "Wallet disconnected");
            metrics::record_disconnect(source);
            self.emit(Notification::info(
                "Wallet disconnected",
                "Your wallet has been disconnected",
            ));
        }
        was_connected
    }

    /// Re-read authorized accounts after missing change events.
    async fn resync(&self) {
        if let Some(provider) = &self.provider {
            match provider.accounts().await {
                Ok(accounts) => self.handle_accounts_changed(&accounts),
                Err(e) => tracing::warn!(error = %e, "Failed to resync wallet accounts"),
            }
        }
    }

    fn emit(&self, notification: Notification) {
        notifications::emit(self.notifier.as_ref(), notification);
    }

    fn read_state(&self) -> RwLockReadGuard<'_, WalletSession> {
        self.state.read().unwrap_or_else(|e| e.into_inner())
    }

    fn write_state(&self) -> RwLockWriteGuard<'_, WalletSession> {
        self.state.write().unwrap_or_else(|e| e.into_inner())
    }
}

impl std::fmt::Debug for WalletSessionManager {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("WalletSessionManager")
            .field("has_provider", &self.provider.is_some())
            .field("session", &*self.read_state())
            .finish()
    }
}

/// Clears `connecting` when a connect finishes or its future is dropped.
struct ConnectingFlag<'a>(&'a RwLock<WalletSession>);

impl Drop for ConnectingFlag<'_> {
    fn drop(&mut self) {
        self.0.write().unwrap_or_else(|e| e.into_inner()).connecting = false;
    }
}

/// Clears `probed` if the authorization probe is dropped before it answers.
struct PendingProbe<'a> {
    probed: &'a AtomicBool,
    done: bool,
}

impl Drop for PendingProbe<'_> {
    fn drop(&mut self) {
        if !self.done {
            self.probed.store(false, Ordering::SeqCst);
        }
    }
}

/// Guard for the account-change listener. Dropping it unsubscribes.
#[derive(Debug)]
pub struct AccountsListener {
    manager: Arc<WalletSessionManager>,
    task: Option<JoinHandle<()>>,
}

impl AccountsListener {
    /// Whether the listener is still receiving provider events.
    pub fn is_running(&self) -> bool {
        self.task.as_ref().is_some_and(|t| !t.is_finished())
    }
}

impl Drop for AccountsListener {
    fn drop(&mut self) {
        if let Some(task) = self.task.take() {
            task.abort();
        }
        self.manager.listening.store(false, Ordering::SeqCst);
        tracing::debug!("Account listener stopped");
    }
}

async fn listen(manager: Arc<WalletSessionManager>, mut rx: broadcast::Receiver<Vec<Address>>) {
    loop {
        match rx.recv().await {
            Ok(accounts) => manager.handle_accounts_changed(&accounts),
            Err(RecvError::Lagged(skipped)) => {
                tracing::warn!(skipped = skipped, "Missed account change events, resyncing");
                manager.resync().await;
            }
            Err(RecvError::Closed) => {
                tracing::debug!("Provider closed account change stream");
                break;
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::notifications::ChannelNotifier;

    fn manager_without_provider() -> (
        WalletSessionManager,
        tokio::sync::mpsc::UnboundedReceiver<Notification>,
    ) {
        let (notifier, rx) = ChannelNotifier::new();
        (WalletSessionManager::new(None, Arc::new(notifier)), rx)
    }

    #[tokio::test]
    async fn test_connect_without_provider() {
        let (manager, mut rx) = manager_without_provider();

        assert_eq!(manager.connect().await, Err(WalletError::NoProviderDetected));
        assert_eq!(manager.session(), WalletSession::default());
        assert_eq!(rx.try_recv().unwrap().title, "No wallet detected");
    }

    #[test]
    fn test_disconnect_when_already_disconnected_is_silent() {
        let (manager, mut rx) = manager_without_provider();

        manager.disconnect();
        manager.handle_accounts_changed(&[]);

        assert!(rx.try_recv().is_err());
        assert_eq!(manager.session(), WalletSession::default());
    }

    #[test]
    fn test_account_switch_then_external_disconnect() {
        let (manager, mut rx) = manager_without_provider();
        let a = Address::repeat_byte(0xaa);

        manager.handle_accounts_changed(&[a]);
        assert_eq!(manager.address(), Some(a));
        assert!(manager.is_connected());
        assert!(rx.try_recv().is_err());

        manager.handle_accounts_changed(&[]);
        assert_eq!(manager.session(), WalletSession::default());
        assert_eq!(rx.try_recv().unwrap().title, "Wallet disconnected");
    }

    #[tokio::test]
    async fn test_second_listener_rejected_until_first_dropped() {
        let (manager, _rx) = manager_without_provider();
        let manager = Arc::new(manager);

        let first = manager.start().await.unwrap();
        assert!(!first.is_running());
        assert_eq!(manager.start().await.unwrap_err(), WalletError::ListenerActive);

        drop(first);
        assert!(manager.start().await.is_ok());
    }
}
