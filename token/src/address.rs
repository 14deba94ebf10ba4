//! # Account Addresses
//!
//! The 20-byte account identifier used everywhere in the ledger. Same
//! derivation as Ethereum: `keccak256(uncompressed_pubkey)[12..32]`, so
//! addresses produced by ordinary Ethereum tooling are valid here.
//!
//! The all-zero address is the "absent" sentinel at the API boundary
//! (you cannot register it as a backup). Internally we prefer `Option`
//! and tagged states over sentinel checks — `Address::ZERO` exists for
//! wire compatibility, not as a modeling tool.

use serde::{de, Deserialize, Deserializer, Serialize, Serializer};
use std::fmt;
use std::str::FromStr;
use thiserror::Error;

use crate::config::ADDRESS_LENGTH;

/// Errors from parsing an address out of its hex form.
#[derive(Debug, Error)]
pub enum AddressError {
    /// The hex string decodes to the wrong number of bytes.
    #[error("invalid address length: expected {ADDRESS_LENGTH} bytes, got {0}")]
    InvalidLength(usize),

    /// The string is not valid hexadecimal.
    #[error("invalid hex in address: {0}")]
    InvalidHex(#[from] hex::FromHexError),
}

/// A 20-byte account identifier.
///
/// `Copy` on purpose: addresses are keys, and keys get passed around a
/// lot. Displayed as `0x`-prefixed lowercase hex; parsing accepts any
/// case, with or without the prefix.
#[derive(Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct Address([u8; ADDRESS_LENGTH]);

impl Address {
    /// The absent sentinel. Never a legal backup target.
    pub const ZERO: Address = Address([0u8; ADDRESS_LENGTH]);

    /// Wraps raw bytes as an address.
    pub const fn new(bytes: [u8; ADDRESS_LENGTH]) -> Self {
        Self(bytes)
    }

    /// Returns the underlying bytes.
    pub fn as_bytes(&self) -> &[u8; ADDRESS_LENGTH] {
        &self.0
    }

    /// Returns `true` for the absent sentinel.
    pub fn is_zero(&self) -> bool {
        self.0 == [0u8; ADDRESS_LENGTH]
    }

    /// Parses an address from hex, with or without a `0x` prefix.
    pub fn from_hex(s: &str) -> Result<Self, AddressError> {
        let stripped = s.strip_prefix("0x").unwrap_or(s);
        let bytes = hex::decode(stripped)?;
        if bytes.len() != ADDRESS_LENGTH {
            return Err(AddressError::InvalidLength(bytes.len()));
        }
        let mut out = [0u8; ADDRESS_LENGTH];
        out.copy_from_slice(&bytes);
        Ok(Self(out))
    }
}

impl fmt::Display for Address {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "0x{}", hex::encode(self.0))
    }
}

impl fmt::Debug for Address {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Address({})", self)
    }
}

impl FromStr for Address {
    type Err = AddressError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::from_hex(s)
    }
}

// Serialized as the hex string rather than a byte array so that
// addresses are readable in JSON bodies and usable as JSON map keys.
impl Serialize for Address {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(&self.to_string())
    }
}

impl<'de> Deserialize<'de> for Address {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let s = String::deserialize(deserializer)?;
        Address::from_hex(&s).map_err(de::Error::custom)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn zero_address_is_zero() {
        assert!(Address::ZERO.is_zero());
        assert!(!Address::new([1u8; 20]).is_zero());
    }

    #[test]
    fn display_roundtrip() {
        let addr = Address::new([0xAB; 20]);
        let s = addr.to_string();
        assert!(s.starts_with("0x"));
        assert_eq!(Address::from_hex(&s).unwrap(), addr);
    }

    #[test]
    fn parse_accepts_mixed_case_and_no_prefix() {
        let lower = "0x00112233445566778899aabbccddeeff00112233";
        let upper = "00112233445566778899AABBCCDDEEFF00112233";
        assert_eq!(
            Address::from_hex(lower).unwrap(),
            Address::from_hex(upper).unwrap()
        );
    }

    #[test]
    fn parse_rejects_wrong_length() {
        assert!(matches!(
            Address::from_hex("0xdeadbeef"),
            Err(AddressError::InvalidLength(4))
        ));
    }

    #[test]
    fn parse_rejects_bad_hex() {
        let result = Address::from_hex("0xzz112233445566778899aabbccddeeff00112233");
        assert!(matches!(result, Err(AddressError::InvalidHex(_))));
    }

    #[test]
    fn serde_uses_hex_string() {
        let addr = Address::new([0x01; 20]);
        let json = serde_json::to_string(&addr).unwrap();
        assert_eq!(json, "\"0x0101010101010101010101010101010101010101\"");
        let back: Address = serde_json::from_str(&json).unwrap();
        assert_eq!(back, addr);
    }

    #[test]
    fn usable_as_json_map_key() {
        use std::collections::HashMap;
        let mut map = HashMap::new();
        map.insert(Address::new([0x22; 20]), 42u64);
        let json = serde_json::to_string(&map).unwrap();
        let back: HashMap<Address, u64> = serde_json::from_str(&json).unwrap();
        assert_eq!(back.get(&Address::new([0x22; 20])), Some(&42));
    }
}
