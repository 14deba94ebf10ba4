//! # Recovery Executor
//!
//! The orchestration step: look up the backup, authenticate the claim,
//! migrate the full balance, flag the account. All reads and checks come
//! before any write, so a failure at any step leaves ledger and gate
//! untouched.
//!
//! Re-running a recovery is legal and boring: the signature has no nonce
//! so it still verifies, the balance is already zero so the migration
//! moves nothing, and the flag is already set. Callers racing to submit
//! the same claim simply take turns performing no-ops after the first
//! one lands.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::address::Address;
use crate::crypto::ecdsa::RecoverableSignature;
use crate::ledger::{Ledger, LedgerError};
use crate::recovery::authenticator::{AuthError, RecoveryAuthenticator};
use crate::recovery::gate::BlacklistGate;
use crate::recovery::registry::BackupRegistry;

/// Errors that can abort a recovery.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum RecoveryError {
    /// The recoveree never registered a backup. Nothing to recover to.
    #[error("no backup registered for {0}")]
    NoBackupRegistered(Address),

    /// The presented signature does not prove control of the recoveree.
    #[error("invalid signature")]
    InvalidSignature,

    /// The balance migration itself failed.
    #[error(transparent)]
    Ledger(#[from] LedgerError),
}

impl From<AuthError> for RecoveryError {
    fn from(_: AuthError) -> Self {
        RecoveryError::InvalidSignature
    }
}

/// Record of a completed recovery, returned to the caller and journaled
/// as the `Recovered` event.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RecoveryReceipt {
    /// Whoever submitted the claim — any account may.
    pub who: Address,
    /// The account that was recovered.
    pub recoveree: Address,
    /// Where the funds went.
    pub backup: Address,
    /// How much moved. Zero for repeat recoveries and empty accounts.
    pub amount: u64,
    /// When the migration committed.
    pub executed_at: DateTime<Utc>,
}

/// Stateless orchestrator for the recovery flow. All state lives in the
/// components it is handed.
pub struct RecoveryExecutor;

impl RecoveryExecutor {
    /// Executes a recovery claim as one atomic unit.
    ///
    /// 1. Resolve the backup from the registry ([`RecoveryError::NoBackupRegistered`]).
    /// 2. Authenticate the claim ([`RecoveryError::InvalidSignature`]).
    /// 3. Move the recoveree's entire balance to the backup (a zero
    ///    balance moves zero — not an error).
    /// 4. Flag the recoveree in the gate (idempotent).
    pub fn execute(
        registry: &BackupRegistry,
        authenticator: &RecoveryAuthenticator,
        gate: &mut BlacklistGate,
        ledger: &mut Ledger,
        recoveree: Address,
        signature: &RecoverableSignature,
        caller: Address,
    ) -> Result<RecoveryReceipt, RecoveryError> {
        let backup = registry
            .lookup(&recoveree)
            .ok_or(RecoveryError::NoBackupRegistered(recoveree))?;

        authenticator.verify(recoveree, signature)?;

        let amount = ledger.balance_of(&recoveree);
        ledger.move_balance(recoveree, backup, amount)?;
        gate.mark_recovered(recoveree, backup);

        tracing::info!(
            recoveree = %recoveree,
            backup = %backup,
            caller = %caller,
            amount,
            "recovery executed"
        );

        Ok(RecoveryReceipt {
            who: caller,
            recoveree,
            backup,
            amount,
            executed_at: Utc::now(),
        })
    }
}
