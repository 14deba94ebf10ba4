//! # Recoverable ECDSA
//!
//! secp256k1 signatures in the Ethereum `(v, r, s)` shape, plus the
//! public-key recovery that turns a `(digest, signature)` pair back into
//! the signer's address.
//!
//! Recovery is deliberately hidden behind the [`SignerRecovery`] trait.
//! The production implementation is [`Secp256k1Recovery`] over `k256`;
//! tests swap in deterministic fixtures so they can exercise the
//! authentication flow without doing curve math.
//!
//! ## Strictness
//!
//! Malformed input is a verification failure, never a panic:
//!
//! - `v` must be 27/28 (or raw 0/1). Anything else is rejected.
//! - `r` and `s` must be non-zero scalars inside the curve order.
//! - High-`s` signatures are rejected (EIP-2 canonical form). Every
//!   signer since 2016 produces low-`s`, and accepting both halves is
//!   an open invitation to signature malleability.

use k256::ecdsa::{RecoveryId, Signature, VerifyingKey};
use serde::{de, Deserialize, Deserializer, Serialize, Serializer};
use std::fmt;
use thiserror::Error;

use crate::address::Address;
use crate::config::{ENCODED_SIGNATURE_LENGTH, V_OFFSET};
use crate::crypto::hash::keccak256;

/// Errors during signature recovery.
///
/// Intentionally a single variant — we don't tell callers *why* a
/// signature failed to recover. A detailed error oracle helps exactly
/// one audience, and it isn't our users.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum EcdsaError {
    #[error("invalid signature")]
    InvalidSignature,
}

/// A secp256k1 signature with its recovery id, Ethereum style.
///
/// `v` carries the recovery id (27/28 as emitted by wallets, 0/1 also
/// accepted); `r` and `s` are the raw 32-byte scalars. Wire encoding is
/// the usual 65 bytes: `r || s || v`.
#[derive(Clone, Copy, PartialEq, Eq)]
pub struct RecoverableSignature {
    /// Recovery id, usually offset by 27.
    pub v: u8,
    /// The `r` scalar, big-endian.
    pub r: [u8; 32],
    /// The `s` scalar, big-endian.
    pub s: [u8; 32],
}

impl RecoverableSignature {
    /// Assembles a signature from its components. No validation happens
    /// here — garbage in simply fails to recover later.
    pub fn new(v: u8, r: [u8; 32], s: [u8; 32]) -> Self {
        Self { v, r, s }
    }

    /// Encodes as the 65-byte wire form `r || s || v`.
    pub fn to_bytes(&self) -> [u8; ENCODED_SIGNATURE_LENGTH] {
        let mut out = [0u8; ENCODED_SIGNATURE_LENGTH];
        out[..32].copy_from_slice(&self.r);
        out[32..64].copy_from_slice(&self.s);
        out[64] = self.v;
        out
    }

    /// Decodes the 65-byte wire form.
    pub fn from_bytes(bytes: &[u8]) -> Result<Self, EcdsaError> {
        if bytes.len() != ENCODED_SIGNATURE_LENGTH {
            return Err(EcdsaError::InvalidSignature);
        }
        let mut r = [0u8; 32];
        let mut s = [0u8; 32];
        r.copy_from_slice(&bytes[..32]);
        s.copy_from_slice(&bytes[32..64]);
        Ok(Self { v: bytes[64], r, s })
    }

    /// Parses the hex form of the 65-byte encoding, `0x` prefix optional.
    pub fn from_hex(s: &str) -> Result<Self, EcdsaError> {
        let stripped = s.strip_prefix("0x").unwrap_or(s);
        let bytes = hex::decode(stripped).map_err(|_| EcdsaError::InvalidSignature)?;
        Self::from_bytes(&bytes)
    }

    /// Normalizes `v` into a curve recovery id.
    ///
    /// Accepts wallet-style 27/28 and raw 0/1. Everything else — including
    /// the extended ids 2/3 for overflowing `r`, which never occur for
    /// honestly generated signatures — maps to `None`.
    pub fn recovery_id(&self) -> Option<RecoveryId> {
        let raw = match self.v {
            0 | 1 => self.v,
            v if v == V_OFFSET || v == V_OFFSET + 1 => v - V_OFFSET,
            _ => return None,
        };
        RecoveryId::from_byte(raw)
    }
}

impl fmt::Display for RecoverableSignature {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "0x{}", hex::encode(self.to_bytes()))
    }
}

impl fmt::Debug for RecoverableSignature {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "RecoverableSignature({})", self)
    }
}

impl Serialize for RecoverableSignature {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(&self.to_string())
    }
}

impl<'de> Deserialize<'de> for RecoverableSignature {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let s = String::deserialize(deserializer)?;
        RecoverableSignature::from_hex(&s).map_err(de::Error::custom)
    }
}

/// Capability interface for elliptic-curve public-key recovery.
///
/// `recover_signer(digest, signature) -> address`, nothing more. The
/// recovery executor authenticates against whatever implementation it is
/// handed, which is what lets tests use fixed-outcome fixtures.
pub trait SignerRecovery: Send + Sync {
    /// Recovers the address that signed `digest`, or fails with
    /// [`EcdsaError::InvalidSignature`] for any malformed component.
    fn recover_signer(
        &self,
        digest: &[u8; 32],
        signature: &RecoverableSignature,
    ) -> Result<Address, EcdsaError>;
}

/// The production recovery implementation over `k256`.
#[derive(Debug, Clone, Copy, Default)]
pub struct Secp256k1Recovery;

impl SignerRecovery for Secp256k1Recovery {
    fn recover_signer(
        &self,
        digest: &[u8; 32],
        signature: &RecoverableSignature,
    ) -> Result<Address, EcdsaError> {
        let recovery_id = signature
            .recovery_id()
            .ok_or(EcdsaError::InvalidSignature)?;

        // from_scalars rejects zero and out-of-range values.
        let sig = Signature::from_scalars(signature.r, signature.s)
            .map_err(|_| EcdsaError::InvalidSignature)?;

        // EIP-2: only the low-s half of the curve is canonical.
        // normalize_s returns Some exactly when s was high.
        if sig.normalize_s().is_some() {
            return Err(EcdsaError::InvalidSignature);
        }

        let key = VerifyingKey::recover_from_prehash(digest, &sig, recovery_id)
            .map_err(|_| EcdsaError::InvalidSignature)?;

        Ok(address_from_public_key(&key))
    }
}

/// Derives the Ethereum-style address for a secp256k1 public key:
/// the low 20 bytes of `keccak256` over the uncompressed point, with the
/// leading `0x04` tag stripped.
pub fn address_from_public_key(key: &VerifyingKey) -> Address {
    let point = key.to_encoded_point(false);
    let digest = keccak256(&point.as_bytes()[1..]);
    let mut out = [0u8; 20];
    out.copy_from_slice(&digest[12..]);
    Address::new(out)
}
