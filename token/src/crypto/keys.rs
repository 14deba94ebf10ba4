//! # Key Management
//!
//! secp256k1 keypair generation and digest signing.
//!
//! The core ledger never holds a private key — verification works purely
//! by recovery. [`Wallet`] exists for everyone *around* the ledger:
//! integration tests that need real signatures, benches, and the node's
//! genesis path.
//!
//! ## Security considerations
//!
//! - Key generation uses the OS CSPRNG. If that is broken, so is
//!   everything else on the machine.
//! - `Wallet` has no serde implementations. Exporting a private key is a
//!   deliberate act via `to_secret_bytes()`, not a side effect of
//!   serializing a struct.
//! - Key bytes are never logged. If you add logging to this module,
//!   you will be asked to leave.

use k256::ecdsa::SigningKey;
use rand::rngs::OsRng;
use thiserror::Error;

use crate::address::Address;
use crate::crypto::ecdsa::{address_from_public_key, RecoverableSignature};

/// Errors that can occur during key operations.
#[derive(Debug, Error)]
pub enum KeyError {
    /// The provided bytes are not a valid secp256k1 secret scalar.
    #[error("invalid secret key bytes: wrong length or not a valid scalar")]
    InvalidSecretKey,

    /// The backend refused to sign — in practice unreachable for a
    /// well-formed 32-byte digest, but we refuse to panic over it.
    #[error("signing failed")]
    SigningFailed,
}

/// A secp256k1 keypair that signs 32-byte digests and knows its own
/// ledger address.
pub struct Wallet {
    signing_key: SigningKey,
}

impl Wallet {
    /// Generate a fresh wallet using the OS cryptographic RNG.
    pub fn generate() -> Self {
        Self {
            signing_key: SigningKey::random(&mut OsRng),
        }
    }

    /// Constructs a wallet from a 32-byte secret scalar.
    ///
    /// Fails if the bytes are zero or not below the curve order.
    pub fn from_secret_bytes(bytes: &[u8]) -> Result<Self, KeyError> {
        let signing_key =
            SigningKey::from_slice(bytes).map_err(|_| KeyError::InvalidSecretKey)?;
        Ok(Self { signing_key })
    }

    /// The ledger address controlled by this wallet.
    pub fn address(&self) -> Address {
        address_from_public_key(self.signing_key.verifying_key())
    }

    /// Signs a 32-byte digest, producing an Ethereum-style `(v, r, s)`
    /// signature with `v` in the 27/28 convention.
    ///
    /// Signing is RFC 6979 deterministic and always yields canonical
    /// low-`s` form, so the output round-trips through the strict
    /// verifier in `crypto::ecdsa`.
    pub fn sign_prehash(&self, digest: &[u8; 32]) -> Result<RecoverableSignature, KeyError> {
        let (signature, recovery_id) = self
            .signing_key
            .sign_prehash_recoverable(digest)
            .map_err(|_| KeyError::SigningFailed)?;

        let (r_bytes, s_bytes) = signature.split_bytes();
        let mut r = [0u8; 32];
        let mut s = [0u8; 32];
        r.copy_from_slice(&r_bytes);
        s.copy_from_slice(&s_bytes);

        Ok(RecoverableSignature::new(
            recovery_id.to_byte() + crate::config::V_OFFSET,
            r,
            s,
        ))
    }

    /// Exports the raw secret scalar. Handle with appropriate paranoia.
    pub fn to_secret_bytes(&self) -> [u8; 32] {
        let mut out = [0u8; 32];
        out.copy_from_slice(&self.signing_key.to_bytes());
        out
    }
}
