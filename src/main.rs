//! CryptoArt mint client.
//!
//! # Architecture Overview
//!
//! ```text
//!   CRYPTOART_PRIVATE_KEY ──▶ LocalWalletProvider ──▶ WalletSessionManager ──┐
//!                                    │                                       │
//!                                    ▼                                       ▼
//!   config.toml ──▶ BlockchainClient ──▶ AlloyMintContract ──▶ MintController ──▶ ConsoleNotifier
//!                                                                   ▲
//!                                          Catalog ──(selection)────┘
//! ```

use clap::{Parser, Subcommand};
use std::error::Error;
use std::path::PathBuf;
use std::sync::Arc;
use tokio::io::{AsyncBufReadExt, BufReader};

use cryptoart_mint::blockchain::BlockchainClient;
use cryptoart_mint::catalog::{ArtworkRecord, Catalog};
use cryptoart_mint::config::{load_config, MintConfig};
use cryptoart_mint::contract::{AlloyMintContract, MintContract, MintReceipt};
use cryptoart_mint::mint::{MintController, MintOutcome, MintSettings};
use cryptoart_mint::notifications::{ConsoleNotifier, Notifier};
use cryptoart_mint::observability::{logging, metrics};
use cryptoart_mint::wallet::{LocalWalletProvider, WalletProvider, WalletSessionManager};

#[derive(Parser)]
#[command(name = "cryptoart-mint")]
#[command(about = "Connect a wallet and mint CryptoArt NFTs", long_about = None)]
struct Cli {
    /// Path to a TOML config file; built-in defaults are used when omitted.
    #[arg(short, long, global = true)]
    config: Option<PathBuf>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// List artworks available for minting
    Catalog {
        #[arg(long)]
        json: bool,
    },
    /// Show wallet session and RPC health
    Status,
    /// Connect the wallet and mint one artwork
    Mint {
        /// Artwork id from the catalog
        #[arg(short, long)]
        artwork: u64,
    },
    /// Interactive session
    Shell,
}

struct App {
    catalog: Catalog,
    client: BlockchainClient,
    wallet: Option<Arc<LocalWalletProvider>>,
    session: Arc<WalletSessionManager>,
    controller: MintController,
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn Error>> {
    let cli = Cli::parse();

    let config = match &cli.config {
        Some(path) => load_config(path)?,
        None => MintConfig::default(),
    };

    logging::init_logging(&config.observability);
    tracing::info!(
        rpc_url = %config.blockchain.rpc_url,
        chain_id = config.blockchain.chain_id,
        contract = %config.contract.address,
        "Configuration loaded"
    );

    if config.observability.metrics_enabled {
        if let Ok(addr) = config.observability.metrics_address.parse() {
            metrics::init_metrics(addr);
        } else {
            tracing::error!(
                metrics_address = %config.observability.metrics_address,
                "Failed to parse metrics address"
            );
        }
    }

    let app = build_app(&config)?;

    match cli.command {
        Commands::Catalog { json } => {
            if json {
                let artworks: Vec<&ArtworkRecord> = app.catalog.iter().collect();
                println!("{}", serde_json::to_string_pretty(&artworks)?);
            } else {
                print_catalog(&app.catalog);
            }
        }
        Commands::Status => {
            app.session.initialize().await;
            print_status(&app).await?;
        }
        Commands::Mint { artwork } => {
            let record = app
                .catalog
                .find(artwork)
                .ok_or_else(|| format!("no artwork with id {}", artwork))?;
            app.client.verify_chain_id().await?;
            let _listener = app.session.start().await?;
            app.session.connect().await?;
            match app.controller.mint(record, print_receipt).await {
                MintOutcome::Confirmed(_) => {}
                MintOutcome::Failed(e) => return Err(e.into()),
                MintOutcome::NotConnected => return Err("wallet not connected".into()),
                MintOutcome::AlreadyInProgress => return Err("mint already in progress".into()),
            }
        }
        Commands::Shell => run_shell(&app).await?,
    }

    Ok(())
}

fn build_app(config: &MintConfig) -> Result<App, Box<dyn Error>> {
    let catalog = Catalog::from_config(&config.catalog);
    let client = BlockchainClient::new(config.blockchain.clone())?;
    let wallet = LocalWalletProvider::from_env()?.map(Arc::new);
    if wallet.is_none() {
        tracing::warn!("No wallet detected, set CRYPTOART_PRIVATE_KEY to sign mints");
    }

    let contract: Option<Arc<dyn MintContract>> = match &wallet {
        Some(w) if !config.contract.address.is_empty() => Some(Arc::new(AlloyMintContract::new(
            &config.contract,
            w.signer(),
            client.clone(),
        )?)),
        Some(_) => {
            tracing::warn!("Contract address not configured, mints will fail");
            None
        }
        None => None,
    };

    let notifier: Arc<dyn Notifier> = Arc::new(ConsoleNotifier);
    let provider = wallet.clone().map(|w| w as Arc<dyn WalletProvider>);
    let session = Arc::new(WalletSessionManager::new(provider, Arc::clone(&notifier)));
    let controller = MintController::new(
        Arc::clone(&session),
        contract,
        notifier,
        MintSettings::from(&config.contract),
    );

    Ok(App {
        catalog,
        client,
        wallet,
        session,
        controller,
    })
}

async fn run_shell(app: &App) -> Result<(), Box<dyn Error>> {
    if let Err(e) = app.client.verify_chain_id().await {
        tracing::warn!(error = %e, "Chain check failed, mints may target the wrong network");
    }
    let _listener = app.session.start().await?;
    let mut selected: Option<&ArtworkRecord> = None;

    print_catalog(&app.catalog);
    println!("Commands: catalog, select <n>, connect, disconnect, revoke, mint, status, quit");

    let mut lines = BufReader::new(tokio::io::stdin()).lines();
    loop {
        let line = tokio::select! {
            line = lines.next_line() => line?,
            _ = tokio::signal::ctrl_c() => None,
        };
        let Some(line) = line else { break };

        let mut words = line.split_whitespace();
        match (words.next(), words.next()) {
            (None, _) => continue,
            (Some("catalog"), _) => print_catalog(&app.catalog),
            (Some("select"), Some(n)) => {
                let artwork = n
                    .parse::<usize>()
                    .ok()
                    .and_then(|n| n.checked_sub(1))
                    .and_then(|i| app.catalog.get(i));
                match artwork {
                    Some(a) => {
                        println!("Selected \"{}\" by {} ({})", a.name, a.artist, a.price);
                        selected = Some(a);
                    }
                    None => println!("No artwork #{}", n),
                }
            }
            (Some("connect"), _) => match app.session.connect().await {
                Ok(_) => {
                    if let Some(short) = app.session.session().short_address() {
                        println!("Connected wallet: {}", short);
                    }
                }
                Err(e) => tracing::debug!(error = %e, "Connect did not succeed"),
            },
            (Some("disconnect"), _) => app.session.disconnect(),
            (Some("revoke"), _) => match &app.wallet {
                Some(wallet) => wallet.revoke(),
                None => println!("No wallet to revoke"),
            },
            (Some("mint"), _) => match selected {
                Some(artwork) => {
                    tokio::select! {
                        _ = app.controller.mint(artwork, print_receipt) => {}
                        _ = tokio::signal::ctrl_c() => {}
                    }
                }
                None => println!("Select an artwork first"),
            },
            (Some("status"), _) => print_status(app).await?,
            (Some("quit" | "exit"), _) => break,
            (Some(other), _) => println!("Unknown command '{}'", other),
        }
    }

    tracing::info!("Shell closed");
    Ok(())
}

fn print_catalog(catalog: &Catalog) {
    for (i, artwork) in catalog.iter().enumerate() {
        println!(
            "{:>2}. {:<20} {:<20} {}",
            i + 1,
            artwork.name,
            artwork.artist,
            artwork.price
        );
    }
}

async fn print_status(app: &App) -> Result<(), Box<dyn Error>> {
    let session = app.session.session();
    let chain_error = app.client.verify_chain_id().await.err();
    let status = serde_json::json!({
        "wallet_detected": app.session.has_provider(),
        "connected_wallet": session.short_address(),
        "session": session,
        "mint_status": app.controller.status(),
        "rpc_url": app.client.config().rpc_url,
        "rpc_healthy": app.client.is_healthy().await,
        "chain_id": app.client.config().chain_id,
        "chain_id_ok": chain_error.is_none(),
        "chain_error": chain_error.map(|e| e.to_string()),
    });
    println!("{}", serde_json::to_string_pretty(&status)?);
    Ok(())
}

fn print_receipt(artwork: &ArtworkRecord, receipt: &MintReceipt) {
    match receipt.block_number {
        Some(block) => println!("Minted \"{}\" in {} (block {})", artwork.name, receipt.tx_hash, block),
        None => println!("Minted \"{}\" in {}", artwork.name, receipt.tx_hash),
    }
}
