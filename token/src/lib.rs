//! # Backup Token — Core Library
//!
//! A fungible token ledger with a built-in backup-and-recovery layer.
//! An account owner designates a single backup address ahead of time;
//! later, anyone holding a valid signature from the owner's key can move
//! the account's entire balance to that backup and permanently redirect
//! all future deposits the same way.
//!
//! The recovery proof is an EIP-712-style typed message (`Backup(address
//! wallet)`) bound to the token instance and its chain id, verified by
//! secp256k1 public-key recovery. Signatures produced by standard
//! Ethereum wallets against the same domain verify here unchanged.
//!
//! ## Architecture
//!
//! The crate is split along the seams of the recovery flow:
//!
//! - **address** — 20-byte account identifiers, hex in and hex out.
//! - **crypto** — Keccak-256, recoverable ECDSA, and keypairs. Don't roll your own.
//! - **eip712** — typed-data digest construction for the recovery claim.
//! - **ledger** — balances, allowances, and checked arithmetic. If it
//!   touches money it returns `Result`.
//! - **recovery** — the registry, the blacklist gate, the authenticator,
//!   and the executor that ties them together.
//! - **token** — the [`BackupToken`] facade: the surface everyone else calls.
//!
//! ## Design Philosophy
//!
//! 1. Every state transition validates before it mutates — a failed call
//!    leaves nothing half-written.
//! 2. Illegal states are unrepresentable: registrations are `Option`s,
//!    redirects store their target, and there is no bare boolean to drift
//!    out of sync.
//! 3. Total supply is conserved by everything except `mint`, and there
//!    are tests that say so.

pub mod address;
pub mod config;
pub mod crypto;
pub mod eip712;
pub mod events;
pub mod ledger;
pub mod recovery;
pub mod token;

pub use address::Address;
pub use crypto::ecdsa::RecoverableSignature;
pub use crypto::keys::Wallet;
pub use recovery::executor::RecoveryReceipt;
pub use token::{BackupToken, TokenError};
