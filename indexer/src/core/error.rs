use std::fmt::{self, Display, Formatter};

use crowdsale_common::{
    amount::Amount,
    event::{EventId, EventRecordKind},
};
use thiserror::Error;

use crate::core::reader::ReaderError;

/// What was being read or written when a storage operation failed.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DiskContext {
    Account,
    CrowdSale,
    VestingVault,
    Vesting,
    VestingWallet,
    Erc20,
    Transaction,
    EventRecord(EventRecordKind),
    Cursor,
}

impl Display for DiskContext {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        match self {
            Self::Account => write!(f, "account"),
            Self::CrowdSale => write!(f, "crowdsale contract"),
            Self::VestingVault => write!(f, "vesting vault contract"),
            Self::Vesting => write!(f, "vesting"),
            Self::VestingWallet => write!(f, "vesting wallet contract"),
            Self::Erc20 => write!(f, "erc20 contract"),
            Self::Transaction => write!(f, "transaction"),
            Self::EventRecord(kind) => write!(f, "{} event record", kind),
            Self::Cursor => write!(f, "event cursor"),
        }
    }
}

#[derive(Error, Debug)]
pub enum LedgerError {
    #[error("Error while decoding {}: {}", context, error)]
    Decode {
        context: DiskContext,
        error: bincode::Error,
    },

    #[error("Error while encoding {}: {}", context, error)]
    Encode {
        context: DiskContext,
        error: bincode::Error,
    },

    #[error(transparent)]
    Database(#[from] sled::Error),

    #[error("Event {0} is already recorded as {1}")]
    DuplicateEvent(EventId, EventRecordKind),

    #[error("Event {failed} failed and must be applied before {event}")]
    Halted { failed: EventId, event: EventId },

    #[error("Snapshot already started")]
    SnapshotAlreadyStarted,

    #[error("Snapshot not started")]
    SnapshotNotStarted,

    #[error("Underflow on {field} of {entity}: {current} - {delta}")]
    Underflow {
        field: &'static str,
        entity: String,
        current: Amount,
        delta: Amount,
    },

    #[error("Overflow on {field} of {entity}: {current} + {delta}")]
    Overflow {
        field: &'static str,
        entity: String,
        current: Amount,
        delta: Amount,
    },

    #[error(transparent)]
    Reader(#[from] ReaderError),

    #[error(transparent)]
    Any(#[from] anyhow::Error),
}

impl LedgerError {
    pub fn is_arithmetic(&self) -> bool {
        matches!(self, Self::Underflow { .. } | Self::Overflow { .. })
    }
}

// Checked update helpers used by the event handlers

pub fn checked_sub(
    field: &'static str,
    entity: &str,
    current: Amount,
    delta: Amount,
) -> Result<Amount, LedgerError> {
    current
        .checked_sub(delta)
        .ok_or_else(|| LedgerError::Underflow {
            field,
            entity: entity.to_owned(),
            current,
            delta,
        })
}

pub fn checked_add(
    field: &'static str,
    entity: &str,
    current: Amount,
    delta: Amount,
) -> Result<Amount, LedgerError> {
    current
        .checked_add(delta)
        .ok_or_else(|| LedgerError::Overflow {
            field,
            entity: entity.to_owned(),
            current,
            delta,
        })
}
