//! # Recovery Authenticator
//!
//! Answers one question: was this signature produced by the key that
//! controls the claimed account? It builds the typed-data digest for the
//! claim, recovers the signer's address, and compares. No key registry,
//! no certificate machinery — on this ledger, the address *is* the
//! identity.

use std::fmt;
use thiserror::Error;

use crate::address::Address;
use crate::crypto::ecdsa::{RecoverableSignature, Secp256k1Recovery, SignerRecovery};
use crate::eip712::{recovery_digest, Eip712Domain};

/// Authentication failure.
///
/// One variant, deliberately: wrong signer, mangled `v`, out-of-range
/// scalar — the caller learns "invalid signature" and nothing else.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum AuthError {
    #[error("invalid signature")]
    InvalidSignature,
}

/// Verifies recovery claims for one token instance's signing domain.
pub struct RecoveryAuthenticator {
    domain: Eip712Domain,
    recovery: Box<dyn SignerRecovery>,
}

impl RecoveryAuthenticator {
    /// Builds an authenticator with the production secp256k1 recovery
    /// backend.
    pub fn new(domain: Eip712Domain) -> Self {
        Self::with_recovery(domain, Box::new(Secp256k1Recovery))
    }

    /// Builds an authenticator over an arbitrary recovery backend.
    /// Tests use this to inject deterministic fixtures.
    pub fn with_recovery(domain: Eip712Domain, recovery: Box<dyn SignerRecovery>) -> Self {
        Self { domain, recovery }
    }

    /// The signing domain this authenticator accepts claims for.
    pub fn domain(&self) -> &Eip712Domain {
        &self.domain
    }

    /// Verifies that `signature` is a valid recovery claim for
    /// `claimed_recoveree`: the typed-data digest for the claim must
    /// recover to exactly that address.
    pub fn verify(
        &self,
        claimed_recoveree: Address,
        signature: &RecoverableSignature,
    ) -> Result<(), AuthError> {
        let digest = recovery_digest(&self.domain, claimed_recoveree);
        let signer = self
            .recovery
            .recover_signer(&digest, signature)
            .map_err(|_| AuthError::InvalidSignature)?;

        if signer != claimed_recoveree {
            return Err(AuthError::InvalidSignature);
        }
        Ok(())
    }
}

impl fmt::Debug for RecoveryAuthenticator {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("RecoveryAuthenticator")
            .field("domain", &self.domain)
            .finish_non_exhaustive()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::CHAIN_ID_DEVNET;
    use crate::crypto::ecdsa::EcdsaError;
    use crate::crypto::keys::Wallet;

    fn authenticator() -> RecoveryAuthenticator {
        let domain = Eip712Domain::backup_token(CHAIN_ID_DEVNET, Address::new([0x42; 20]));
        RecoveryAuthenticator::new(domain)
    }

    fn claim(auth: &RecoveryAuthenticator, wallet: &Wallet) -> RecoverableSignature {
        let digest = recovery_digest(auth.domain(), wallet.address());
        wallet.sign_prehash(&digest).unwrap()
    }

    #[test]
    fn own_claim_verifies() {
        let auth = authenticator();
        let wallet = Wallet::generate();
        let sig = claim(&auth, &wallet);
        assert!(auth.verify(wallet.address(), &sig).is_ok());
    }

    #[test]
    fn claim_for_someone_else_rejected() {
        // Attacker signs their own claim but names the victim.
        let auth = authenticator();
        let attacker = Wallet::generate();
        let victim = Wallet::generate();
        let sig = claim(&auth, &attacker);
        assert_eq!(
            auth.verify(victim.address(), &sig),
            Err(AuthError::InvalidSignature)
        );
    }

    #[test]
    fn claim_from_another_domain_rejected() {
        // Same wallet, same message type, different token instance.
        let auth_a = authenticator();
        let auth_b = RecoveryAuthenticator::new(Eip712Domain::backup_token(
            CHAIN_ID_DEVNET,
            Address::new([0x43; 20]),
        ));
        let wallet = Wallet::generate();
        let sig = claim(&auth_b, &wallet);
        assert_eq!(
            auth_a.verify(wallet.address(), &sig),
            Err(AuthError::InvalidSignature)
        );
    }

    #[test]
    fn tampered_component_rejected() {
        let auth = authenticator();
        let wallet = Wallet::generate();
        let mut sig = claim(&auth, &wallet);
        sig.r[0] ^= 0x01;
        assert_eq!(
            auth.verify(wallet.address(), &sig),
            Err(AuthError::InvalidSignature)
        );
    }

    #[test]
    fn malformed_v_rejected_not_crashed() {
        let auth = authenticator();
        let wallet = Wallet::generate();
        let mut sig = claim(&auth, &wallet);
        sig.v = 77;
        assert_eq!(
            auth.verify(wallet.address(), &sig),
            Err(AuthError::InvalidSignature)
        );
    }

    #[test]
    fn fixture_backend_is_honored() {
        // A recovery backend that always answers with a fixed address.
        struct Fixed(Address);
        impl SignerRecovery for Fixed {
            fn recover_signer(
                &self,
                _digest: &[u8; 32],
                _signature: &RecoverableSignature,
            ) -> Result<Address, EcdsaError> {
                Ok(self.0)
            }
        }

        let fixed = Address::new([0x07; 20]);
        let domain = Eip712Domain::backup_token(CHAIN_ID_DEVNET, Address::new([0x42; 20]));
        let auth = RecoveryAuthenticator::with_recovery(domain, Box::new(Fixed(fixed)));
        let junk = RecoverableSignature::new(27, [1u8; 32], [1u8; 32]);

        assert!(auth.verify(fixed, &junk).is_ok());
        assert_eq!(
            auth.verify(Address::new([0x08; 20]), &junk),
            Err(AuthError::InvalidSignature)
        );
    }
}
