//! # Protocol Constants
//!
//! Every magic number and magic string in the token lives here. The
//! EIP-712 type strings in particular are consensus-critical: change a
//! single byte and every previously issued recovery signature stops
//! verifying. Choose wisely, then never touch them again.

// ---------------------------------------------------------------------------
// Typed-Data Domain
// ---------------------------------------------------------------------------

/// The `name` field of the signing domain. Wallets display this to the
/// user when they sign a recovery claim, and it is hashed into the domain
/// separator — it has to match what clients sign byte for byte.
pub const DOMAIN_NAME: &str = "BackupERC20";

/// The EIP-712 domain type. Only three fields: no `version`, no salt.
/// Binding to `chainId` and `verifyingContract` is what stops a recovery
/// signature from being replayed against another chain or another token
/// instance.
pub const EIP712_DOMAIN_TYPE: &str =
    "EIP712Domain(string name,uint256 chainId,address verifyingContract)";

/// The recovery claim type. Deliberately minimal: just the wallet being
/// recovered. No nonce and no backup address — see the `eip712` module
/// docs for why that is safe under the one-shot registration rules.
pub const BACKUP_MESSAGE_TYPE: &str = "Backup(address wallet)";

// ---------------------------------------------------------------------------
// Cryptographic Parameters
// ---------------------------------------------------------------------------

/// Account identifiers are Ethereum-style: the low 20 bytes of the
/// Keccak-256 hash of the uncompressed secp256k1 public key.
pub const ADDRESS_LENGTH: usize = 20;

/// Keccak-256 output length. Also the length of every signing digest.
pub const DIGEST_LENGTH: usize = 32;

/// A recoverable ECDSA signature on the wire: `r || s || v`.
pub const ENCODED_SIGNATURE_LENGTH: usize = 65;

/// Ethereum's legacy recovery-id offset. Wallets emit `v` as 27 or 28;
/// the raw recovery id is `v - 27`.
pub const V_OFFSET: u8 = 27;

// ---------------------------------------------------------------------------
// Chain Identifiers
// ---------------------------------------------------------------------------

/// Ethereum mainnet, for when a deployment wants real-wallet interop.
pub const CHAIN_ID_MAINNET: u64 = 1;

/// The conventional local-devnet chain id (Ganache, Hardhat, us).
pub const CHAIN_ID_DEVNET: u64 = 1337;

// ---------------------------------------------------------------------------
// Genesis Defaults
// ---------------------------------------------------------------------------

/// Default initial supply minted to the owner at construction when the
/// node is started without an explicit `--initial-supply`.
pub const DEFAULT_INITIAL_SUPPLY: u64 = 10_000;
