//! Mint transaction subsystem.
//!
//! # Data Flow
//! ```text
//! selected ArtworkRecord
//!     → controller.rs (session check, single-flight guard)
//!     → MintContract::mint_for_artist → Submitted
//!     → MintContract::wait            → Confirmed | Failed
//!     → Notifier + caller's success callback
//! ```

pub mod attempt;
pub mod controller;
pub mod types;

pub use attempt::{InvalidTransition, MintAttempt};
pub use controller::{MintController, MintSettings, CANCELLED_DETAIL};
pub use types::{MintError, MintOutcome, MintStatus};
