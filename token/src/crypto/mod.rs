//! # Cryptographic Primitives
//!
//! Keccak-256 hashing, recoverable secp256k1 ECDSA, and keypair
//! management. Everything here is a thin, auditable wrapper over the
//! RustCrypto crates (`sha3`, `k256`) — one place to look when someone
//! asks "where exactly do we verify signatures?".
//!
//! The curve choice is dictated by interoperability: recovery claims are
//! signed by ordinary Ethereum wallets, which means secp256k1 with
//! public-key recovery and Keccak-256 digests. Verification never learns
//! the signer's public key ahead of time — it *recovers* it from the
//! signature and compares addresses.

pub mod ecdsa;
pub mod hash;
pub mod keys;

pub use ecdsa::{RecoverableSignature, Secp256k1Recovery, SignerRecovery};
pub use hash::{keccak256, keccak256_multi};
pub use keys::Wallet;
