//! # Keccak-256 Hashing
//!
//! The one hash function in this codebase. Keccak-256 (the pre-NIST
//! padding variant, not SHA3-256) is non-negotiable here: address
//! derivation and the EIP-712 digest construction both have to match
//! what Ethereum tooling computes, bit for bit.

use sha3::{Digest, Keccak256};

/// Compute the Keccak-256 hash of the input data.
///
/// Returns the 32-byte digest as a fixed-size array. Used for address
/// derivation, type hashes, and the final signing digest.
///
/// # Example
///
/// ```
/// use backup_token::crypto::keccak256;
///
/// let digest = keccak256(b"Backup(address wallet)");
/// assert_eq!(digest.len(), 32);
/// ```
pub fn keccak256(data: &[u8]) -> [u8; 32] {
    let mut hasher = Keccak256::new();
    hasher.update(data);
    let mut out = [0u8; 32];
    out.copy_from_slice(&hasher.finalize());
    out
}

/// Hash multiple byte slices together without concatenation overhead.
///
/// Feeds the parts sequentially into one hasher instead of allocating a
/// buffer to join them. Same digest as hashing the concatenation. The
/// EIP-712 encoders lean on this heavily — every struct hash is a
/// sequence of 32-byte words.
pub fn keccak256_multi(parts: &[&[u8]]) -> [u8; 32] {
    let mut hasher = Keccak256::new();
    for part in parts {
        hasher.update(part);
    }
    let mut out = [0u8; 32];
    out.copy_from_slice(&hasher.finalize());
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn keccak256_empty_input_known_vector() {
        // Keccak-256 of the empty string. If this ever fails, the sha3
        // crate switched padding on us and nothing else will verify either.
        let digest = keccak256(b"");
        let expected =
            hex::decode("c5d2460186f7233c927e7db2dcc703c0e500b653ca82273b7bfad8045d85a470")
                .unwrap();
        assert_eq!(digest.as_slice(), expected.as_slice());
    }

    #[test]
    fn keccak256_abc_known_vector() {
        let digest = keccak256(b"abc");
        let expected =
            hex::decode("4e03657aea45a94fc7d47ba826c8d667c0d1e6e33a64a036ec44f58fa12d6c45")
                .unwrap();
        assert_eq!(digest.as_slice(), expected.as_slice());
    }

    #[test]
    fn keccak256_deterministic() {
        assert_eq!(keccak256(b"backup"), keccak256(b"backup"));
        assert_ne!(keccak256(b"backup"), keccak256(b"Backup"));
    }

    #[test]
    fn multi_matches_concatenation() {
        let joined = keccak256(b"hello world");
        let parts = keccak256_multi(&[b"hello", b" ", b"world"]);
        assert_eq!(joined, parts);
    }

    #[test]
    fn multi_with_empty_parts() {
        assert_eq!(keccak256_multi(&[]), keccak256(b""));
        assert_eq!(keccak256_multi(&[b"", b"x", b""]), keccak256(b"x"));
    }
}
