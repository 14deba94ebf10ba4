//! # Balance & Allowance Ledger
//!
//! The single owner of all monetary state: balances, allowances, and
//! total supply. Every mutation validates first and writes second, so a
//! failed call leaves the ledger exactly as it found it — that is the
//! whole atomicity story for an in-memory store with serialized callers.
//!
//! The ledger knows nothing about backups or blacklists. Redirect
//! resolution happens one layer up, in [`crate::token::BackupToken`],
//! before funds ever reach a credit here.

use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use thiserror::Error;

use crate::address::Address;

// ---------------------------------------------------------------------------
// Errors
// ---------------------------------------------------------------------------

/// Errors that can occur during ledger operations.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum LedgerError {
    /// Attempted to debit more than the available balance.
    #[error("insufficient balance: account {account} has {available}, requested {requested}")]
    InsufficientBalance {
        /// The account being debited.
        account: Address,
        /// Its current balance.
        available: u64,
        /// The amount requested.
        requested: u64,
    },

    /// A spender tried to move more than its approval covers.
    #[error(
        "insufficient allowance: {spender} may spend {available} of {owner}'s funds, requested {requested}"
    )]
    InsufficientAllowance {
        /// The account whose funds are being spent.
        owner: Address,
        /// The spender holding the approval.
        spender: Address,
        /// The remaining approved amount.
        available: u64,
        /// The amount requested.
        requested: u64,
    },

    /// A credit would push a balance past `u64::MAX`.
    ///
    /// If you're hitting this, someone is trying to credit more than
    /// 18.4 quintillion units. That's either a bug or an attack.
    #[error("balance overflow: account {account} at {current}, credit {credit}")]
    BalanceOverflow {
        /// The account being credited.
        account: Address,
        /// Its balance before the failed credit.
        current: u64,
        /// The amount that caused the overflow.
        credit: u64,
    },

    /// A mint would push total supply past `u64::MAX`.
    #[error("supply overflow: total supply {current}, mint {minted}")]
    SupplyOverflow {
        /// Total supply before the failed mint.
        current: u64,
        /// The amount that caused the overflow.
        minted: u64,
    },
}

// ---------------------------------------------------------------------------
// Ledger
// ---------------------------------------------------------------------------

/// The complete monetary state of one token instance.
///
/// Accounts with zero balance simply have no entry; `balance_of` treats
/// absent and zero identically, matching how every on-chain ledger reads.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Ledger {
    /// Per-account balances in the smallest unit.
    balances: HashMap<Address, u64>,
    /// Approvals: `owner -> spender -> remaining amount`.
    allowances: HashMap<Address, HashMap<Address, u64>>,
    /// Sum of all balances. Maintained by `mint` and conserved by
    /// everything else.
    total_supply: u64,
}

impl Ledger {
    /// Creates an empty ledger with zero supply.
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns an account's balance. Unknown accounts hold zero.
    pub fn balance_of(&self, account: &Address) -> u64 {
        self.balances.get(account).copied().unwrap_or(0)
    }

    /// Returns the current total supply.
    pub fn total_supply(&self) -> u64 {
        self.total_supply
    }

    /// Returns the remaining approval for `(owner, spender)`.
    pub fn allowance(&self, owner: &Address, spender: &Address) -> u64 {
        self.allowances
            .get(owner)
            .and_then(|per_spender| per_spender.get(spender))
            .copied()
            .unwrap_or(0)
    }

    /// Creates new units and credits them to `to`.
    ///
    /// The only operation that changes total supply.
    pub fn mint(&mut self, to: Address, amount: u64) -> Result<(), LedgerError> {
        let new_supply =
            self.total_supply
                .checked_add(amount)
                .ok_or(LedgerError::SupplyOverflow {
                    current: self.total_supply,
                    minted: amount,
                })?;
        // Balance overflow is implied impossible once supply fits, but we
        // check anyway so the invariant doesn't depend on call order.
        let current = self.balance_of(&to);
        let new_balance = current
            .checked_add(amount)
            .ok_or(LedgerError::BalanceOverflow {
                account: to,
                current,
                credit: amount,
            })?;

        self.total_supply = new_supply;
        self.balances.insert(to, new_balance);
        Ok(())
    }

    /// Overwrites the `(owner, spender)` approval, ERC-20 `approve`
    /// semantics: not additive, no balance check at approval time.
    pub fn set_allowance(&mut self, owner: Address, spender: Address, amount: u64) {
        self.allowances
            .entry(owner)
            .or_default()
            .insert(spender, amount);
    }

    /// Moves `amount` from `from` to `to` as one all-or-nothing step.
    ///
    /// Both the debit and the credit are validated before either side is
    /// written. A zero-amount move (and a self-move) is legal and leaves
    /// every balance untouched.
    pub fn move_balance(
        &mut self,
        from: Address,
        to: Address,
        amount: u64,
    ) -> Result<(), LedgerError> {
        let available = self.balance_of(&from);
        if available < amount {
            return Err(LedgerError::InsufficientBalance {
                account: from,
                available,
                requested: amount,
            });
        }

        if from == to {
            return Ok(());
        }

        let target = self.balance_of(&to);
        let new_target = target
            .checked_add(amount)
            .ok_or(LedgerError::BalanceOverflow {
                account: to,
                current: target,
                credit: amount,
            })?;

        self.balances.insert(from, available - amount);
        self.balances.insert(to, new_target);
        Ok(())
    }

    /// Consumes `amount` of the `(owner, spender)` approval.
    pub fn spend_allowance(
        &mut self,
        owner: Address,
        spender: Address,
        amount: u64,
    ) -> Result<(), LedgerError> {
        let available = self.allowance(&owner, &spender);
        if available < amount {
            return Err(LedgerError::InsufficientAllowance {
                owner,
                spender,
                available,
                requested: amount,
            });
        }
        self.set_allowance(owner, spender, available - amount);
        Ok(())
    }

    /// Sum of all balances. Exposed for conservation checks in tests and
    /// the node's status endpoint; must always equal `total_supply`.
    pub fn circulating(&self) -> u64 {
        self.balances.values().sum()
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;

    fn addr(tag: u8) -> Address {
        Address::new([tag; 20])
    }

    #[test]
    fn mint_credits_and_grows_supply() {
        let mut ledger = Ledger::new();
        ledger.mint(addr(1), 10_000).unwrap();
        assert_eq!(ledger.balance_of(&addr(1)), 10_000);
        assert_eq!(ledger.total_supply(), 10_000);
    }

    #[test]
    fn mint_supply_overflow_rejected() {
        let mut ledger = Ledger::new();
        ledger.mint(addr(1), u64::MAX).unwrap();
        let result = ledger.mint(addr(2), 1);
        assert!(matches!(result, Err(LedgerError::SupplyOverflow { .. })));
        // Nothing changed.
        assert_eq!(ledger.total_supply(), u64::MAX);
        assert_eq!(ledger.balance_of(&addr(2)), 0);
    }

    #[test]
    fn move_balance_transfers_funds() {
        let mut ledger = Ledger::new();
        ledger.mint(addr(1), 1_000).unwrap();
        ledger.move_balance(addr(1), addr(2), 400).unwrap();
        assert_eq!(ledger.balance_of(&addr(1)), 600);
        assert_eq!(ledger.balance_of(&addr(2)), 400);
        assert_eq!(ledger.total_supply(), 1_000);
    }

    #[test]
    fn move_balance_insufficient_rejected() {
        let mut ledger = Ledger::new();
        ledger.mint(addr(1), 100).unwrap();
        let result = ledger.move_balance(addr(1), addr(2), 200);
        assert_eq!(
            result,
            Err(LedgerError::InsufficientBalance {
                account: addr(1),
                available: 100,
                requested: 200,
            })
        );
        assert_eq!(ledger.balance_of(&addr(1)), 100);
    }

    #[test]
    fn move_zero_from_unknown_account_is_ok() {
        // Recovering an empty account moves zero; that must not error.
        let mut ledger = Ledger::new();
        ledger.move_balance(addr(9), addr(2), 0).unwrap();
        assert_eq!(ledger.balance_of(&addr(2)), 0);
    }

    #[test]
    fn self_move_is_a_noop() {
        let mut ledger = Ledger::new();
        ledger.mint(addr(1), 500).unwrap();
        ledger.move_balance(addr(1), addr(1), 500).unwrap();
        assert_eq!(ledger.balance_of(&addr(1)), 500);
    }

    #[test]
    fn full_supply_fits_in_one_account() {
        // As long as mint guards total supply, no move can overflow a
        // recipient — the extreme case is the whole supply landing on
        // one account, which is fine.
        let mut ledger = Ledger::new();
        ledger.mint(addr(1), u64::MAX).unwrap();
        ledger.move_balance(addr(1), addr(2), u64::MAX).unwrap();
        assert_eq!(ledger.balance_of(&addr(2)), u64::MAX);
    }

    #[test]
    fn allowance_defaults_to_zero() {
        let ledger = Ledger::new();
        assert_eq!(ledger.allowance(&addr(1), &addr(2)), 0);
    }

    #[test]
    fn set_allowance_overwrites() {
        let mut ledger = Ledger::new();
        ledger.set_allowance(addr(1), addr(2), 500);
        ledger.set_allowance(addr(1), addr(2), 50);
        assert_eq!(ledger.allowance(&addr(1), &addr(2)), 50);
    }

    #[test]
    fn spend_allowance_decrements() {
        let mut ledger = Ledger::new();
        ledger.set_allowance(addr(1), addr(2), 500);
        ledger.spend_allowance(addr(1), addr(2), 200).unwrap();
        assert_eq!(ledger.allowance(&addr(1), &addr(2)), 300);
    }

    #[test]
    fn spend_allowance_insufficient_rejected() {
        let mut ledger = Ledger::new();
        ledger.set_allowance(addr(1), addr(2), 100);
        let result = ledger.spend_allowance(addr(1), addr(2), 150);
        assert!(matches!(
            result,
            Err(LedgerError::InsufficientAllowance {
                available: 100,
                requested: 150,
                ..
            })
        ));
        assert_eq!(ledger.allowance(&addr(1), &addr(2)), 100);
    }

    #[test]
    fn allowances_are_per_pair() {
        let mut ledger = Ledger::new();
        ledger.set_allowance(addr(1), addr(2), 100);
        assert_eq!(ledger.allowance(&addr(1), &addr(3)), 0);
        assert_eq!(ledger.allowance(&addr(2), &addr(1)), 0);
    }

    #[test]
    fn supply_conserved_across_moves() {
        let mut ledger = Ledger::new();
        ledger.mint(addr(1), 10_000).unwrap();
        ledger.move_balance(addr(1), addr(2), 3_000).unwrap();
        ledger.move_balance(addr(2), addr(3), 1_500).unwrap();
        ledger.move_balance(addr(3), addr(1), 1).unwrap();
        assert_eq!(ledger.circulating(), ledger.total_supply());
    }

    #[test]
    fn serialization_roundtrip() {
        let mut ledger = Ledger::new();
        ledger.mint(addr(1), 42).unwrap();
        ledger.set_allowance(addr(1), addr(2), 7);

        let json = serde_json::to_string(&ledger).expect("serialize");
        let back: Ledger = serde_json::from_str(&json).expect("deserialize");
        assert_eq!(back.balance_of(&addr(1)), 42);
        assert_eq!(back.allowance(&addr(1), &addr(2)), 7);
        assert_eq!(back.total_supply(), 42);
    }
}
