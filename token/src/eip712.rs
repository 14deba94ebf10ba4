//! # Typed-Data Digest Construction
//!
//! Builds the EIP-712 digest that a recovery claim is signed over. The
//! shape matches what `eth_signTypedData_v4` produces for:
//!
//! ```text
//! domain  = { name: "BackupERC20", chainId, verifyingContract }
//! message = Backup { wallet }
//! digest  = keccak256(0x19 0x01 || domainSeparator || structHash)
//! ```
//!
//! so signatures from stock Ethereum wallets verify here without any
//! client-side shims.
//!
//! ## Replay scope
//!
//! The domain separator pins the signature to one chain id and one token
//! instance — a claim signed for a devnet deployment is dead on arrival
//! anywhere else. Within that scope the claim is *indefinitely*
//! replayable: the message carries no nonce and no backup address. That
//! is safe only because registration is one-shot and recovery is
//! idempotent; a future feature that allows backup reassignment would
//! have to add a nonce to [`config::BACKUP_MESSAGE_TYPE`] first.

use serde::{Deserialize, Serialize};

use crate::address::Address;
use crate::config::{self, BACKUP_MESSAGE_TYPE, EIP712_DOMAIN_TYPE};
use crate::crypto::hash::{keccak256, keccak256_multi};

/// The signing domain for one token instance.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Eip712Domain {
    /// Domain name shown by wallets at signing time.
    pub name: String,
    /// Chain this instance lives on.
    pub chain_id: u64,
    /// The token instance's own address.
    pub verifying_contract: Address,
}

impl Eip712Domain {
    /// Builds the token's domain with the fixed [`config::DOMAIN_NAME`].
    pub fn backup_token(chain_id: u64, verifying_contract: Address) -> Self {
        Self {
            name: config::DOMAIN_NAME.to_string(),
            chain_id,
            verifying_contract,
        }
    }

    /// Computes the domain separator:
    /// `keccak256(typeHash || keccak256(name) || uint256(chainId) || address)`.
    pub fn separator(&self) -> [u8; 32] {
        keccak256_multi(&[
            &keccak256(EIP712_DOMAIN_TYPE.as_bytes()),
            &keccak256(self.name.as_bytes()),
            &encode_uint(self.chain_id),
            &encode_address(self.verifying_contract),
        ])
    }
}

/// Computes the struct hash of `Backup { wallet }`.
pub fn backup_struct_hash(wallet: Address) -> [u8; 32] {
    keccak256_multi(&[
        &keccak256(BACKUP_MESSAGE_TYPE.as_bytes()),
        &encode_address(wallet),
    ])
}

/// Computes the final signing digest for a recovery claim naming `wallet`.
pub fn recovery_digest(domain: &Eip712Domain, wallet: Address) -> [u8; 32] {
    keccak256_multi(&[
        &[0x19, 0x01],
        &domain.separator(),
        &backup_struct_hash(wallet),
    ])
}

// ABI word encoding: every value occupies a 32-byte slot.

fn encode_uint(value: u64) -> [u8; 32] {
    let mut out = [0u8; 32];
    out[24..].copy_from_slice(&value.to_be_bytes());
    out
}

fn encode_address(address: Address) -> [u8; 32] {
    let mut out = [0u8; 32];
    out[12..].copy_from_slice(address.as_bytes());
    out
}
