//! # The Recovery Subsystem
//!
//! Four pieces, each with one job:
//!
//! - [`registry`] — the one-shot `recoveree -> backup` assignment.
//! - [`authenticator`] — proves a recovery claim was signed by the key
//!   controlling the recoveree account.
//! - [`gate`] — the redirect table every credit consults after an
//!   account has been recovered.
//! - [`executor`] — stitches the above together with the ledger into a
//!   single atomic migration.
//!
//! The lifecycle is strictly monotonic: an account goes from
//! unregistered, to registered, to recovered, and never back. There is
//! no revocation and no re-registration — the simplicity of "exactly
//! once, forever" is what makes the nonce-free signature scheme safe.

pub mod authenticator;
pub mod executor;
pub mod gate;
pub mod registry;

pub use authenticator::RecoveryAuthenticator;
pub use executor::{RecoveryError, RecoveryExecutor, RecoveryReceipt};
pub use gate::BlacklistGate;
pub use registry::{BackupRegistry, RegistryError};
