//! # Token Events
//!
//! The notifications a token instance journals as it mutates. The
//! journal is the in-memory stand-in for an event log: the node serves
//! it over `/events`, and tests assert against it the way a chain test
//! would assert on emitted events.

use serde::{Deserialize, Serialize};

use crate::address::Address;

/// One journal entry. Serde-tagged for clean JSON on the wire.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum TokenEvent {
    /// Funds moved. `to` is the *effective* recipient — after redirect
    /// resolution, not the nominal address the caller named. Mints
    /// appear with `from` as the zero address.
    Transfer {
        from: Address,
        to: Address,
        amount: u64,
    },
    /// An approval was set.
    Approval {
        owner: Address,
        spender: Address,
        amount: u64,
    },
    /// An account designated its backup.
    RegisteredBackup { recoveree: Address, backup: Address },
    /// A recovery completed. `who` is the caller that submitted the
    /// signature, which need not be the recoveree or the backup.
    Recovered {
        who: Address,
        recoveree: Address,
        backup: Address,
        amount: u64,
    },
}
