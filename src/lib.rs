//! Wallet-connect and NFT mint client for the CryptoArt gallery.

pub mod blockchain;
pub mod catalog;
pub mod config;
pub mod contract;
pub mod mint;
pub mod notifications;
pub mod observability;
pub mod wallet;

pub use catalog::{ArtworkRecord, Catalog};
pub use config::MintConfig;
pub use mint::{MintController, MintOutcome, MintStatus};
pub use wallet::{WalletSession, WalletSessionManager};
