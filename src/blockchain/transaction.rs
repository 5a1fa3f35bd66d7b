//! Confirmation monitoring for submitted transactions.
//!
//! # Responsibilities
//! - Poll for the receipt of a submitted transaction
//! - Detect reverted transactions
//! - Wait until the configured block depth is reached
//!
//! The wait itself is unbounded; callers that need a deadline wrap it.

use alloy::primitives::TxHash;
use std::time::Duration;
use tokio::time::{interval, MissedTickBehavior};

use crate::blockchain::client::BlockchainClient;
use crate::blockchain::types::{BlockchainResult, ConfirmationStatus};

/// Polls receipts until a transaction reaches the required depth.
#[derive(Debug, Clone)]
pub struct ConfirmationWatcher {
    client: BlockchainClient,
    poll_interval: Duration,
}

impl ConfirmationWatcher {
    pub fn new(client: BlockchainClient) -> Self {
        let poll_interval = Duration::from_millis(client.config().poll_interval_ms);
        Self {
            client,
            poll_interval,
        }
    }

    /// Wait for a transaction to be confirmed or reverted.
    pub async fn wait_for_confirmation(
        &self,
        tx_hash: TxHash,
    ) -> BlockchainResult<ConfirmationStatus> {
        let required_confirmations = self.client.confirmation_blocks();
        let mut ticker = interval(self.poll_interval);
        ticker.set_missed_tick_behavior(MissedTickBehavior::Delay);

        loop {
            ticker.tick().await;

            let receipt = match self.client.get_transaction_receipt(tx_hash).await? {
                Some(r) => r,
                None => {
                    tracing::debug!(tx_hash = %tx_hash, "Transaction pending");
                    continue;
                }
            };

            if !receipt.status() {
                return Ok(ConfirmationStatus::Reverted);
            }

            let current_block = self.client.get_block_number().await?;
            let tx_block = receipt.block_number.unwrap_or(current_block);
            let confirmations = confirmation_depth(current_block, tx_block);

            if confirmations >= required_confirmations {
                return Ok(ConfirmationStatus::Confirmed {
                    block_number: tx_block,
                });
            }

            tracing::debug!(
                tx_hash = %tx_hash,
                confirmations = confirmations,
                required = required_confirmations,
                "Waiting for confirmations"
            );
        }
    }
}

/// Blocks on top of `tx_block`; the inclusion block counts as the first.
fn confirmation_depth(current_block: u64, tx_block: u64) -> u32 {
    u32::try_from(current_block.saturating_sub(tx_block))
        .unwrap_or(u32::MAX)
        .saturating_add(1)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::blockchain::types::BlockchainConfig;

    #[test]
    fn test_confirmation_count() {
        assert_eq!(confirmation_depth(100, 100), 1);
        assert_eq!(confirmation_depth(102, 100), 3);
        // Receipt from a block the node has not reported yet.
        assert_eq!(confirmation_depth(99, 100), 1);
        assert_eq!(confirmation_depth(u64::MAX, 0), u32::MAX);
    }

    #[tokio::test]
    async fn test_unreachable_rpc_surfaces_error() {
        let config = BlockchainConfig {
            rpc_url: "http://127.0.0.1:1".to_string(),
            rpc_timeout_secs: 1,
            poll_interval_ms: 10,
            ..BlockchainConfig::default()
        };
        let watcher = ConfirmationWatcher::new(BlockchainClient::new(config).unwrap());

        let result = tokio::time::timeout(
            Duration::from_secs(10),
            watcher.wait_for_confirmation(TxHash::ZERO),
        )
        .await
        .expect("RPC failure should end the wait");
        assert!(result.is_err());
    }
}
