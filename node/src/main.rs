//! # Backup Token Node
//!
//! Entry point for the `backup-token-node` binary. Parses CLI arguments,
//! initializes logging, deploys a token instance, and serves the REST API.
//!
//! The binary supports two subcommands:
//!
//! - `run`     — deploy a token instance and serve its API
//! - `version` — print build version information

mod api;
mod cli;
mod logging;

use anyhow::{Context, Result};
use clap::Parser;
use parking_lot::RwLock;
use rand::RngCore;
use std::sync::Arc;
use tokio::signal;

use backup_token::address::Address;
use backup_token::{BackupToken, Wallet};

use cli::{Commands, TokenNodeCli};
use logging::LogFormat;

#[tokio::main]
async fn main() -> Result<()> {
    let cli = TokenNodeCli::parse();

    match cli.command {
        Commands::Run(args) => run_node(args).await,
        Commands::Version => {
            print_version();
            Ok(())
        }
    }
}

/// Deploys the token instance and serves its REST API until shutdown.
async fn run_node(args: cli::RunArgs) -> Result<()> {
    logging::init_logging(
        "backup_token_node=info,backup_token=info,tower_http=debug",
        LogFormat::from_str_lossy(&args.log_format),
    );

    tracing::info!(
        rpc_port = args.rpc_port,
        chain_id = args.chain_id,
        initial_supply = args.initial_supply,
        "starting backup-token-node"
    );

    // --- Owner account ---
    // Either the flag, or a fresh wallet. Only the address is logged;
    // the generated key stays in memory.
    let owner = match &args.owner {
        Some(hex_addr) => Address::from_hex(hex_addr)
            .with_context(|| format!("invalid --owner address: {}", hex_addr))?,
        None => {
            let wallet = Wallet::generate();
            tracing::info!(owner = %wallet.address(), "generated fresh owner wallet");
            wallet.address()
        }
    };

    // --- Token instance address ---
    let token_address = match &args.token_address {
        Some(hex_addr) => Address::from_hex(hex_addr)
            .with_context(|| format!("invalid --token-address: {}", hex_addr))?,
        None => random_address(),
    };

    // --- Deploy ---
    let token = BackupToken::new(args.chain_id, token_address, args.initial_supply, owner)
        .context("failed to deploy token instance")?;
    tracing::info!(
        token = %token_address,
        owner = %owner,
        "token instance deployed"
    );

    let app_state = api::AppState {
        version: env!("CARGO_PKG_VERSION").to_string(),
        token: Arc::new(RwLock::new(token)),
    };

    // --- API server ---
    let router = api::create_router(app_state);
    let addr = format!("0.0.0.0:{}", args.rpc_port);
    let listener = tokio::net::TcpListener::bind(&addr)
        .await
        .with_context(|| format!("failed to bind RPC listener on {}", addr))?;
    tracing::info!("API server listening on {}", addr);

    tokio::select! {
        res = axum::serve(listener, router) => {
            if let Err(e) = res {
                tracing::error!("API server error: {}", e);
            }
        }
        _ = shutdown_signal() => {
            tracing::info!("shutdown signal received, draining connections");
        }
    }

    tracing::info!("backup-token-node stopped");
    Ok(())
}

/// A uniformly random instance address for ad-hoc devnet deployments.
fn random_address() -> Address {
    let mut bytes = [0u8; 20];
    rand::rngs::OsRng.fill_bytes(&mut bytes);
    Address::new(bytes)
}

/// Prints version information to stdout.
fn print_version() {
    println!("backup-token-node {}", env!("CARGO_PKG_VERSION"));
    println!("rustc             {}", rustc_version());
}

/// Returns the Rust compiler version used to build this binary.
fn rustc_version() -> &'static str {
    option_env!("RUSTC_VERSION").unwrap_or("unknown")
}

/// Waits for SIGINT (Ctrl+C) or SIGTERM, whichever comes first.
///
/// On non-Unix platforms, only Ctrl+C is supported.
async fn shutdown_signal() {
    let ctrl_c = async {
        signal::ctrl_c()
            .await
            .expect("failed to install Ctrl+C handler");
    };

    #[cfg(unix)]
    let terminate = async {
        signal::unix::signal(signal::unix::SignalKind::terminate())
            .expect("failed to install SIGTERM handler")
            .recv()
            .await;
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {}
        _ = terminate => {}
    }
}
