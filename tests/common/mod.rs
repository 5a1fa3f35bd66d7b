//! Shared test doubles for the wallet and mint integration tests.
#![allow(dead_code)]

use alloy::primitives::{Address, TxHash};
use async_trait::async_trait;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};
use std::time::Duration;
use tokio::sync::{broadcast, mpsc, Notify};

use cryptoart_mint::catalog::ArtworkRecord;
use cryptoart_mint::contract::{
    ContractError, ContractResult, MintCall, MintContract, MintReceipt, TxHandle,
};
use cryptoart_mint::notifications::{ChannelNotifier, Notification};
use cryptoart_mint::wallet::{ProviderError, WalletProvider};

pub const TX_HASH_BYTE: u8 = 0xab;

pub fn account(byte: u8) -> Address {
    Address::repeat_byte(byte)
}

pub fn cosmic_dreamer() -> ArtworkRecord {
    ArtworkRecord::new(1, "Cosmic Dreamer", "Digital Visionary", "0.05 ETH")
}

pub fn notifier() -> (Arc<ChannelNotifier>, mpsc::UnboundedReceiver<Notification>) {
    let (notifier, rx) = ChannelNotifier::new();
    (Arc::new(notifier), rx)
}

/// Everything delivered so far, without waiting.
pub fn drain(rx: &mut mpsc::UnboundedReceiver<Notification>) -> Vec<Notification> {
    let mut out = Vec::new();
    while let Ok(n) = rx.try_recv() {
        out.push(n);
    }
    out
}

pub fn titles(notifications: &[Notification]) -> Vec<&str> {
    notifications.iter().map(|n| n.title.as_str()).collect()
}

/// Yield until `condition` holds, failing after one second.
pub async fn wait_until(mut condition: impl FnMut() -> bool) {
    tokio::time::timeout(Duration::from_secs(1), async {
        while !condition() {
            tokio::time::sleep(Duration::from_millis(1)).await;
        }
    })
    .await
    .expect("condition not reached within 1s");
}

/// Scripted wallet provider.
pub struct MockWalletProvider {
    grant: Mutex<Result<Vec<Address>, ProviderError>>,
    authorized: Mutex<Vec<Address>>,
    request_calls: AtomicUsize,
    gate: Option<Arc<Notify>>,
    probe_gate: Option<Arc<Notify>>,
    accounts_tx: broadcast::Sender<Vec<Address>>,
}

impl MockWalletProvider {
    /// Grants `accounts` on every `request_accounts`.
    pub fn granting(accounts: Vec<Address>) -> Self {
        Self::with_grant(Ok(accounts))
    }

    /// Declines every `request_accounts` with EIP-1193 code 4001.
    pub fn rejecting(message: &str) -> Self {
        Self::with_grant(Err(ProviderError::from_code(4001, message)))
    }

    fn with_grant(grant: Result<Vec<Address>, ProviderError>) -> Self {
        let (accounts_tx, _) = broadcast::channel(16);
        Self {
            grant: Mutex::new(grant),
            authorized: Mutex::new(Vec::new()),
            request_calls: AtomicUsize::new(0),
            gate: None,
            probe_gate: None,
            accounts_tx,
        }
    }

    /// Accounts authorized before the session started.
    pub fn with_authorized(self, accounts: Vec<Address>) -> Self {
        *self.authorized.lock().unwrap() = accounts;
        self
    }

    /// Hold every `request_accounts` until the gate is notified.
    pub fn held(mut self, gate: Arc<Notify>) -> Self {
        self.gate = Some(gate);
        self
    }

    /// Hold every `accounts` read until the gate is notified.
    pub fn held_probe(mut self, gate: Arc<Notify>) -> Self {
        self.probe_gate = Some(gate);
        self
    }

    pub fn request_calls(&self) -> usize {
        self.request_calls.load(Ordering::SeqCst)
    }

    /// Broadcast an account change as the wallet would.
    pub fn emit(&self, accounts: Vec<Address>) {
        *self.authorized.lock().unwrap() = accounts.clone();
        let _ = self.accounts_tx.send(accounts);
    }
}

#[async_trait]
impl WalletProvider for MockWalletProvider {
    async fn request_accounts(&self) -> Result<Vec<Address>, ProviderError> {
        self.request_calls.fetch_add(1, Ordering::SeqCst);
        if let Some(gate) = &self.gate {
            gate.notified().await;
        }
        let result = self.grant.lock().unwrap().clone();
        if let Ok(accounts) = &result {
            *self.authorized.lock().unwrap() = accounts.clone();
        }
        result
    }

    async fn accounts(&self) -> Result<Vec<Address>, ProviderError> {
        if let Some(gate) = &self.probe_gate {
            gate.notified().await;
        }
        Ok(self.authorized.lock().unwrap().clone())
    }

    fn subscribe_accounts(&self) -> broadcast::Receiver<Vec<Address>> {
        self.accounts_tx.subscribe()
    }
}

/// Scripted mint contract.
pub struct MockMintContract {
    submit: Mutex<ContractResult<TxHandle>>,
    wait: Mutex<ContractResult<MintReceipt>>,
    calls: Mutex<Vec<MintCall>>,
    gate: Option<Arc<Notify>>,
}

impl MockMintContract {
    /// Accepts every mint and confirms it in block 7.
    pub fn confirming() -> Self {
        let tx_hash = TxHash::repeat_byte(TX_HASH_BYTE);
        Self {
            submit: Mutex::new(Ok(TxHandle { tx_hash })),
            wait: Mutex::new(Ok(MintReceipt {
                tx_hash,
                block_number: Some(7),
            })),
            calls: Mutex::new(Vec::new()),
            gate: None,
        }
    }

    /// Fails submission with `err`.
    pub fn failing_submit(err: ContractError) -> Self {
        let contract = Self::confirming();
        contract.set_submit(Err(err));
        contract
    }

    /// Submits, then fails the confirmation with `err`.
    pub fn failing_wait(err: ContractError) -> Self {
        let contract = Self::confirming();
        *contract.wait.lock().unwrap() = Err(err);
        contract
    }

    /// Hold every confirmation until the gate is notified.
    pub fn held(mut self, gate: Arc<Notify>) -> Self {
        self.gate = Some(gate);
        self
    }

    pub fn set_submit(&self, result: ContractResult<TxHandle>) {
        *self.submit.lock().unwrap() = result;
    }

    pub fn calls(&self) -> Vec<MintCall> {
        self.calls.lock().unwrap().clone()
    }
}

#[async_trait]
impl MintContract for MockMintContract {
    async fn mint_for_artist(&self, call: MintCall) -> ContractResult<TxHandle> {
        self.calls.lock().unwrap().push(call);
        self.submit.lock().unwrap().clone()
    }

    async fn wait(&self, _handle: &TxHandle) -> ContractResult<MintReceipt> {
        if let Some(gate) = &self.gate {
            gate.notified().await;
        }
        self.wait.lock().unwrap().clone()
    }
}
