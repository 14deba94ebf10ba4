//! # The Token Facade
//!
//! [`BackupToken`] is one deployed instance: the ledger, the backup
//! registry, the blacklist gate, and the authenticator wired together
//! behind the operations callers actually invoke. Every entry point
//! takes the caller explicitly — the host (node, test harness) is
//! responsible for knowing who is calling; the token is responsible for
//! everything after that.
//!
//! ## The redirect invariant
//!
//! Every operation with an explicit recipient funnels through one
//! internal settlement step that resolves the recipient via the gate
//! before the ledger credit. Neither `transfer` nor `transfer_from`
//! carries its own copy of that logic, which is what keeps the invariant
//! un-forgettable when the next transfer-shaped operation gets added.

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::address::Address;
use crate::crypto::ecdsa::RecoverableSignature;
use crate::eip712::{recovery_digest, Eip712Domain};
use crate::events::TokenEvent;
use crate::ledger::{Ledger, LedgerError};
use crate::recovery::authenticator::RecoveryAuthenticator;
use crate::recovery::executor::{RecoveryError, RecoveryExecutor, RecoveryReceipt};
use crate::recovery::gate::BlacklistGate;
use crate::recovery::registry::{BackupRegistry, RegistryError};

/// Any failure a token operation can surface. Module errors pass
/// through unwrapped so callers match on the real taxonomy.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum TokenError {
    #[error(transparent)]
    Ledger(#[from] LedgerError),

    #[error(transparent)]
    Registry(#[from] RegistryError),

    #[error(transparent)]
    Recovery(#[from] RecoveryError),
}

/// One token instance.
#[derive(Debug)]
pub struct BackupToken {
    /// This instance's own address — the `verifyingContract` every
    /// recovery claim is bound to.
    address: Address,
    ledger: Ledger,
    registry: BackupRegistry,
    gate: BlacklistGate,
    authenticator: RecoveryAuthenticator,
    events: Vec<TokenEvent>,
}

impl BackupToken {
    /// Deploys a token: mints `initial_supply` to `owner` and journals
    /// the mint as a transfer from the zero address.
    pub fn new(
        chain_id: u64,
        address: Address,
        initial_supply: u64,
        owner: Address,
    ) -> Result<Self, TokenError> {
        let mut ledger = Ledger::new();
        ledger.mint(owner, initial_supply)?;

        let domain = Eip712Domain::backup_token(chain_id, address);
        let mut events = Vec::new();
        events.push(TokenEvent::Transfer {
            from: Address::ZERO,
            to: owner,
            amount: initial_supply,
        });

        tracing::info!(
            token = %address,
            owner = %owner,
            initial_supply,
            chain_id,
            "token deployed"
        );

        Ok(Self {
            address,
            ledger,
            registry: BackupRegistry::new(),
            gate: BlacklistGate::new(),
            authenticator: RecoveryAuthenticator::new(domain),
            events,
        })
    }

    // -- reads --------------------------------------------------------------

    /// This instance's own address.
    pub fn address(&self) -> Address {
        self.address
    }

    /// The signing domain recovery claims must target.
    pub fn domain(&self) -> &Eip712Domain {
        self.authenticator.domain()
    }

    /// The digest a wallet must sign to recover `wallet`'s account on
    /// this instance. Exposed so clients and tests don't re-implement
    /// the typed-data encoding.
    pub fn recovery_digest(&self, wallet: Address) -> [u8; 32] {
        recovery_digest(self.authenticator.domain(), wallet)
    }

    /// Current balance of `account`.
    pub fn balance_of(&self, account: &Address) -> u64 {
        self.ledger.balance_of(account)
    }

    /// Total supply.
    pub fn total_supply(&self) -> u64 {
        self.ledger.total_supply()
    }

    /// Remaining approval for `(owner, spender)`.
    pub fn allowance(&self, owner: &Address, spender: &Address) -> u64 {
        self.ledger.allowance(owner, spender)
    }

    /// Registered backup for `account`, if any.
    pub fn backups(&self, account: &Address) -> Option<Address> {
        self.registry.lookup(account)
    }

    /// Whether `account` has completed recovery and is permanently
    /// redirected.
    pub fn blacklisted(&self, account: &Address) -> bool {
        self.gate.is_blacklisted(account)
    }

    /// The journaled events, oldest first.
    pub fn events(&self) -> &[TokenEvent] {
        &self.events
    }

    // -- mutations ----------------------------------------------------------

    /// Moves `amount` from the caller to `to` (or to `to`'s backup if
    /// `to` has been recovered). Returns the effective recipient.
    pub fn transfer(
        &mut self,
        caller: Address,
        to: Address,
        amount: u64,
    ) -> Result<Address, TokenError> {
        self.settle(caller, to, amount)
    }

    /// Moves `amount` from `from` to `to` on the strength of the
    /// caller's approval. The allowance is accounted against the
    /// `(from, caller)` pair exactly as instructed — only the credit
    /// destination is substituted. Returns the effective recipient.
    pub fn transfer_from(
        &mut self,
        caller: Address,
        from: Address,
        to: Address,
        amount: u64,
    ) -> Result<Address, TokenError> {
        // Validate the allowance up front; decrement only after the
        // settlement has committed, so a failed move leaves the approval
        // intact.
        let allowed = self.ledger.allowance(&from, &caller);
        if allowed < amount {
            return Err(LedgerError::InsufficientAllowance {
                owner: from,
                spender: caller,
                available: allowed,
                requested: amount,
            }
            .into());
        }

        let credited = self.settle(from, to, amount)?;
        // Cannot fail: the allowance was checked above and settlement
        // does not touch approvals.
        self.ledger.spend_allowance(from, caller, amount)?;
        Ok(credited)
    }

    /// Sets the caller's approval for `spender`.
    pub fn approve(&mut self, caller: Address, spender: Address, amount: u64) {
        self.ledger.set_allowance(caller, spender, amount);
        self.events.push(TokenEvent::Approval {
            owner: caller,
            spender,
            amount,
        });
    }

    /// Designates the caller's backup. One shot, zero address rejected.
    pub fn register_backup(&mut self, caller: Address, backup: Address) -> Result<(), TokenError> {
        self.registry.register(caller, backup)?;
        tracing::info!(recoveree = %caller, backup = %backup, "backup registered");
        self.events.push(TokenEvent::RegisteredBackup {
            recoveree: caller,
            backup,
        });
        Ok(())
    }

    /// Executes a recovery claim: migrates the recoveree's full balance
    /// to its registered backup and permanently redirects the account.
    /// Any caller may submit a valid claim.
    pub fn recover(
        &mut self,
        signature: &RecoverableSignature,
        recoveree: Address,
        caller: Address,
    ) -> Result<RecoveryReceipt, TokenError> {
        let receipt = RecoveryExecutor::execute(
            &self.registry,
            &self.authenticator,
            &mut self.gate,
            &mut self.ledger,
            recoveree,
            signature,
            caller,
        )?;

        self.events.push(TokenEvent::Recovered {
            who: receipt.who,
            recoveree: receipt.recoveree,
            backup: receipt.backup,
            amount: receipt.amount,
        });
        Ok(receipt)
    }

    /// The single settlement step shared by every transfer path:
    /// resolve the effective recipient, then move funds all-or-nothing.
    fn settle(
        &mut self,
        from: Address,
        to: Address,
        amount: u64,
    ) -> Result<Address, TokenError> {
        let credited = self.gate.effective_recipient(to);
        self.ledger.move_balance(from, credited, amount)?;

        tracing::debug!(
            from = %from,
            nominal = %to,
            credited = %credited,
            amount,
            "transfer settled"
        );
        self.events.push(TokenEvent::Transfer {
            from,
            to: credited,
            amount,
        });
        Ok(credited)
    }
}

/// Summary snapshot of an instance, used by the node's status endpoint.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TokenSnapshot {
    /// The instance address.
    pub address: Address,
    /// Chain id from the signing domain.
    pub chain_id: u64,
    /// Current total supply.
    pub total_supply: u64,
    /// Number of journaled events.
    pub event_count: usize,
}

impl BackupToken {
    /// Builds a point-in-time summary of this instance.
    pub fn snapshot(&self) -> TokenSnapshot {
        TokenSnapshot {
            address: self.address,
            chain_id: self.authenticator.domain().chain_id,
            total_supply: self.ledger.total_supply(),
            event_count: self.events.len(),
        }
    }
}
