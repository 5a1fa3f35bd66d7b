//! EVM mint contract client.
//!
//! # Responsibilities
//! - Bind the `mintForArtist` entry point
//! - Sign and submit mint transactions with the wallet's key
//! - Translate RPC failures into contract errors
//! - Confirm through the blockchain module's receipt polling

use alloy::network::EthereumWallet;
use alloy::primitives::{Address, TxHash};
use alloy::providers::{DynProvider, Provider, ProviderBuilder};
use alloy::signers::local::PrivateKeySigner;
use alloy::sol;
use async_trait::async_trait;

use crate::blockchain::{BlockchainClient, ConfirmationStatus, ConfirmationWatcher};
use crate::config::ContractConfig;
use crate::contract::types::{ContractError, ContractResult, MintCall, MintReceipt, TxHandle};
use crate::contract::MintContract;
use crate::wallet::types::USER_REJECTED_CODE;

/// JSON-RPC error code for `execution reverted`.
const EXECUTION_REVERTED_CODE: i64 = 3;

sol! {
    /// Minting surface of the CryptoArt NFT contract.
    #[sol(rpc)]
    interface ICryptoArtNft {
        function mintForArtist(
            address recipient,
            string editionName,
            string artPieceId,
            string metadataURI
        ) external payable returns (uint256 tokenId);
    }
}

/// Mint contract reached over JSON-RPC, signing with a local key.
pub struct AlloyMintContract {
    address: Address,
    provider: DynProvider,
    watcher: ConfirmationWatcher,
}

impl AlloyMintContract {
    /// Build a signing client for the configured contract.
    pub fn new(
        config: &ContractConfig,
        signer: PrivateKeySigner,
        client: BlockchainClient,
    ) -> ContractResult<Self> {
        if config.address.is_empty() {
            return Err(ContractError::Other(
                "contract address is not configured".to_string(),
            ));
        }
        let address: Address = config.address.parse().map_err(|e| {
            ContractError::Other(format!("Invalid contract address '{}': {}", config.address, e))
        })?;
        let rpc_url: url::Url = client.config().rpc_url.parse().map_err(|e| {
            ContractError::Other(format!("Invalid RPC URL '{}': {}", client.config().rpc_url, e))
        })?;

        let provider = ProviderBuilder::new()
            .wallet(EthereumWallet::from(signer))
            .connect_http(rpc_url)
            .erased();

        tracing::info!(contract = %address, "Mint contract client initialized");

        Ok(Self {
            address,
            provider,
            watcher: ConfirmationWatcher::new(client),
        })
    }

    pub fn address(&self) -> Address {
        self.address
    }
}

#[async_trait]
impl MintContract for AlloyMintContract {
    async fn mint_for_artist(&self, call: MintCall) -> ContractResult<TxHandle> {
        let contract = ICryptoArtNft::new(self.address, self.provider.clone());

        let pending = contract
            .mintForArtist(
                call.recipient,
                call.edition_name,
                call.art_piece_id,
                call.metadata_uri,
            )
            .value(call.value)
            .send()
            .await
            .map_err(classify_error)?;

        let tx_hash = *pending.tx_hash();
        tracing::info!(tx_hash = %tx_hash, contract = %self.address, "Mint transaction submitted");
        Ok(TxHandle { tx_hash })
    }

    async fn wait(&self, handle: &TxHandle) -> ContractResult<MintReceipt> {
        match self.watcher.wait_for_confirmation(handle.tx_hash).await {
            Ok(ConfirmationStatus::Confirmed { block_number }) => Ok(MintReceipt {
                tx_hash: handle.tx_hash,
                block_number: Some(block_number),
            }),
            Ok(ConfirmationStatus::Reverted) => Err(reverted(handle.tx_hash)),
            Err(e) => Err(ContractError::Network(e.to_string())),
        }
    }
}

impl std::fmt::Debug for AlloyMintContract {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("AlloyMintContract")
            .field("address", &self.address)
            .finish()
    }
}

fn classify_error(err: alloy::contract::Error) -> ContractError {
    if let alloy::contract::Error::TransportError(rpc) = &err {
        if let Some(payload) = rpc.as_error_resp() {
            return classify_response(payload.code, &payload.message);
        }
        return ContractError::Network(rpc.to_string());
    }
    ContractError::Other(err.to_string())
}

fn reverted(tx_hash: TxHash) -> ContractError {
    ContractError::Reverted(tx_hash.to_string())
}

/// Map a JSON-RPC error response to a contract error.
fn classify_response(code: i64, message: &str) -> ContractError {
    if code == USER_REJECTED_CODE {
        ContractError::UserRejected(message.to_string())
    } else if code == EXECUTION_REVERTED_CODE || message.contains("revert") {
        ContractError::Reverted(message.to_string())
    } else {
        ContractError::Other(message.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::blockchain::BlockchainConfig;

    const TEST_PRIVATE_KEY: &str =
        "ac0974bec39a17e36ba4a6b4d238ff944bacb478cbed5efcae784d7bf4f2ff80";

    fn client() -> BlockchainClient {
        BlockchainClient::new(BlockchainConfig::default()).unwrap()
    }

    fn signer() -> PrivateKeySigner {
        TEST_PRIVATE_KEY.parse().unwrap()
    }

    #[test]
    fn test_classify_response() {
        assert_eq!(
            classify_response(4001, "user denied transaction"),
            ContractError::UserRejected("user denied transaction".to_string())
        );
        assert!(matches!(
            classify_response(3, "execution reverted: sold out"),
            ContractError::Reverted(_)
        ));
        assert!(matches!(
            classify_response(-32000, "insufficient funds for gas * price + value"),
            ContractError::Other(_)
        ));
    }

    #[test]
    fn test_revert_message_names_transaction_once() {
        let msg = reverted(TxHash::repeat_byte(0x11)).to_string();
        assert_eq!(msg, format!("transaction reverted: {}", TxHash::repeat_byte(0x11)));
        assert_eq!(msg.matches("revert").count(), 1);
    }

    #[tokio::test]
    async fn test_requires_contract_address() {
        let err = AlloyMintContract::new(&ContractConfig::default(), signer(), client()).unwrap_err();
        assert!(err.to_string().contains("not configured"));

        let config = ContractConfig {
            address: "0x5FbDB2315678afecb367f032d93F642f64180aa3".to_string(),
            ..ContractConfig::default()
        };
        let contract = AlloyMintContract::new(&config, signer(), client()).unwrap();
        assert_eq!(
            contract.address(),
            "0x5FbDB2315678afecb367f032d93F642f64180aa3"
                .parse::<Address>()
                .unwrap()
        );
    }
}
