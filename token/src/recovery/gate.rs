//! # Blacklist Gate
//!
//! The redirect table consulted by every credit. An entry
//! `recoveree -> backup` means the recoveree has completed recovery and
//! all funds addressed to it land on the backup instead.
//!
//! Storing the pair (rather than a bare "recovered" boolean next to a
//! separate backup map) makes the broken state "recovered but nowhere to
//! send the money" unrepresentable. Resolution is single-hop by
//! construction: one map lookup, never chased transitively — if the
//! backup is itself later recovered, deposits aimed at the *original*
//! account still stop at that backup.

use serde::{Deserialize, Serialize};
use std::collections::HashMap;

use crate::address::Address;

/// Tracks which accounts have completed recovery and where their funds
/// are redirected.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct BlacklistGate {
    redirects: HashMap<Address, Address>,
}

impl BlacklistGate {
    /// Creates an empty gate — nobody recovered, nothing redirected.
    pub fn new() -> Self {
        Self::default()
    }

    /// Resolves where a credit aimed at `to` actually lands.
    /// Side-effect free; this is consulted, never a mutator.
    pub fn effective_recipient(&self, to: Address) -> Address {
        self.redirects.get(&to).copied().unwrap_or(to)
    }

    /// `true` once `account` has completed recovery. Never reverts to
    /// `false`.
    pub fn is_blacklisted(&self, account: &Address) -> bool {
        self.redirects.contains_key(account)
    }

    /// Records a completed recovery. Idempotent: re-marking an already
    /// recovered account keeps the original redirect (the registry is
    /// immutable, so the target cannot legitimately differ anyway).
    pub fn mark_recovered(&mut self, recoveree: Address, backup: Address) {
        self.redirects.entry(recoveree).or_insert(backup);
    }
}
