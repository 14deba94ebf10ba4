//! # Backup Registry
//!
//! The `recoveree -> backup` assignment map. Write-once per key: the
//! first registration wins and there is no way to change or remove it.
//! That immutability is load-bearing — the recovery signature carries no
//! backup address, so the registration *is* the binding between an
//! account and where its funds may go.

use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use thiserror::Error;

use crate::address::Address;

/// Errors from backup registration.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum RegistryError {
    /// The recoveree already has a backup. There is no second chance.
    #[error("backup already registered for {0}")]
    AlreadyRegistered(Address),

    /// The zero address cannot be a backup — funds sent there are gone.
    #[error("backup address must not be the zero address")]
    InvalidAddress,
}

/// The one-time mapping from an account to its designated backup.
///
/// Absence of an entry *is* the "unregistered" state; there is no
/// sentinel value to mistake for a real backup.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct BackupRegistry {
    assignments: HashMap<Address, Address>,
}

impl BackupRegistry {
    /// Creates an empty registry.
    pub fn new() -> Self {
        Self::default()
    }

    /// Registers `backup` for `recoveree`. One shot: fails if any
    /// assignment exists, regardless of what the new value is.
    pub fn register(&mut self, recoveree: Address, backup: Address) -> Result<(), RegistryError> {
        if backup.is_zero() {
            return Err(RegistryError::InvalidAddress);
        }
        if self.assignments.contains_key(&recoveree) {
            return Err(RegistryError::AlreadyRegistered(recoveree));
        }
        self.assignments.insert(recoveree, backup);
        Ok(())
    }

    /// Returns the registered backup, if any. Pure read.
    pub fn lookup(&self, recoveree: &Address) -> Option<Address> {
        self.assignments.get(recoveree).copied()
    }

    /// Number of registered assignments.
    pub fn len(&self) -> usize {
        self.assignments.len()
    }

    /// `true` when nothing has been registered yet.
    pub fn is_empty(&self) -> bool {
        self.assignments.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn addr(tag: u8) -> Address {
        Address::new([tag; 20])
    }

    #[test]
    fn register_and_lookup() {
        let mut registry = BackupRegistry::new();
        registry.register(addr(1), addr(2)).unwrap();
        assert_eq!(registry.lookup(&addr(1)), Some(addr(2)));
        assert_eq!(registry.lookup(&addr(2)), None);
    }

    #[test]
    fn second_registration_rejected_even_with_same_value() {
        let mut registry = BackupRegistry::new();
        registry.register(addr(1), addr(2)).unwrap();
        assert_eq!(
            registry.register(addr(1), addr(2)),
            Err(RegistryError::AlreadyRegistered(addr(1)))
        );
        assert_eq!(
            registry.register(addr(1), addr(3)),
            Err(RegistryError::AlreadyRegistered(addr(1)))
        );
        // Original assignment intact.
        assert_eq!(registry.lookup(&addr(1)), Some(addr(2)));
    }

    #[test]
    fn zero_backup_rejected() {
        let mut registry = BackupRegistry::new();
        assert_eq!(
            registry.register(addr(1), Address::ZERO),
            Err(RegistryError::InvalidAddress)
        );
        assert!(registry.is_empty());
    }

    #[test]
    fn self_backup_is_allowed() {
        // Nothing in the rules forbids naming yourself; recovery then
        // degenerates to a self-move and a redirect to yourself.
        let mut registry = BackupRegistry::new();
        registry.register(addr(1), addr(1)).unwrap();
        assert_eq!(registry.lookup(&addr(1)), Some(addr(1)));
    }

    #[test]
    fn independent_recoverees() {
        let mut registry = BackupRegistry::new();
        registry.register(addr(1), addr(9)).unwrap();
        registry.register(addr(2), addr(9)).unwrap();
        assert_eq!(registry.len(), 2);
    }
}
