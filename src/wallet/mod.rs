//! Wallet session subsystem.
//!
//! # Data Flow
//! ```text
//! WalletProvider (injected; key-backed in the CLI, mocks in tests)
//!     → session.rs (WalletSessionManager: connect, disconnect, account changes)
//!     → WalletSession snapshots read by the mint controller and the UI
//!     → Notifier (one notification per transition)
//! ```

pub mod local;
pub mod provider;
pub mod session;
pub mod types;

pub use local::LocalWalletProvider;
pub use provider::WalletProvider;
pub use session::{AccountsListener, WalletSessionManager};
pub use types::{ProviderError, WalletError, WalletResult, WalletSession};
