//! # CLI Interface
//!
//! Defines the command-line argument structure for `backup-token-node`
//! using `clap` derive. Supports two subcommands: `run` and `version`.

use clap::{Parser, Subcommand};

/// BackupERC20 token node.
///
/// Hosts a single in-memory token instance with backup registration and
/// signature-proved recovery, and serves its REST API.
#[derive(Parser, Debug)]
#[command(
    name = "backup-token-node",
    about = "Recoverable token node",
    version,
    propagate_version = true
)]
pub struct TokenNodeCli {
    /// Subcommand to execute.
    #[command(subcommand)]
    pub command: Commands,
}

/// Top-level subcommands for the node binary.
#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Start the token node.
    Run(RunArgs),
    /// Print version information and exit.
    Version,
}

/// Arguments for the `run` subcommand.
#[derive(Parser, Debug)]
pub struct RunArgs {
    /// Port for the REST API.
    #[arg(long, env = "BACKUP_TOKEN_RPC_PORT", default_value_t = 8545)]
    pub rpc_port: u16,

    /// Chain identifier baked into the signing domain. Claims signed for
    /// one chain id are invalid on any other.
    #[arg(long, env = "BACKUP_TOKEN_CHAIN_ID", default_value_t = backup_token::config::CHAIN_ID_DEVNET)]
    pub chain_id: u64,

    /// Initial supply minted to the owner at startup.
    #[arg(long, env = "BACKUP_TOKEN_INITIAL_SUPPLY", default_value_t = backup_token::config::DEFAULT_INITIAL_SUPPLY)]
    pub initial_supply: u64,

    /// Hex-encoded owner address receiving the initial supply.
    ///
    /// When omitted, the node generates a fresh wallet and logs its
    /// address (never its key).
    #[arg(long, env = "BACKUP_TOKEN_OWNER")]
    pub owner: Option<String>,

    /// Hex-encoded token instance address, the `verifyingContract` of
    /// the signing domain. Randomly generated when omitted.
    #[arg(long, env = "BACKUP_TOKEN_ADDRESS")]
    pub token_address: Option<String>,

    /// Log output format: "pretty" or "json".
    #[arg(long, env = "BACKUP_TOKEN_LOG_FORMAT", default_value = "pretty")]
    pub log_format: String,
}
