use serde::{Deserialize, Serialize};
use strum::{Display, EnumIter, EnumString};

use crate::{
    address::{Address, TxHash},
    amount::Amount,
    observed::Observed,
};

use super::{EventId, EventMeta};

/// Fields shared by every immutable event record.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct RecordHeader {
    pub id: EventId,
    pub emitter: Address,
    pub transaction: TxHash,
    pub timestamp: u64,
}

impl From<&EventMeta> for RecordHeader {
    fn from(meta: &EventMeta) -> Self {
        Self {
            id: meta.event_id(),
            emitter: meta.address,
            transaction: meta.transaction_hash,
            timestamp: meta.timestamp,
        }
    }
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct TokenPurchaseRecord {
    pub header: RecordHeader,
    pub contract: Address,
    pub purchaser: Address,
    pub beneficiary: Address,
    pub token_amount: Amount,
    pub wei_value: Amount,
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct VestingLockedInRecord {
    pub header: RecordHeader,
    pub contract: Address,
    pub beneficiary: Address,
    pub token_amount: Amount,
    pub release_time: Amount,
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct VestingReleasedRecord {
    pub header: RecordHeader,
    pub contract: Address,
    pub beneficiary: Address,
    pub token_amount: Amount,
    pub release_time: Amount,
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct EtherReleasedRecord {
    pub header: RecordHeader,
    pub contract: Address,
    pub amount: Amount,
    pub from: Address,
    pub to: Observed<Address>,
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Erc20ReleasedRecord {
    pub header: RecordHeader,
    pub contract: Address,
    pub token: Address,
    pub amount: Amount,
    pub from: Address,
    pub to: Observed<Address>,
}

/// Any stored event record.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum EventRecord {
    TokenPurchase(TokenPurchaseRecord),
    VestingLockedIn(VestingLockedInRecord),
    VestingReleased(VestingReleasedRecord),
    EtherReleased(EtherReleasedRecord),
    Erc20Released(Erc20ReleasedRecord),
}

/// Kind of an event record, each kind is stored apart.
#[derive(
    Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize, Display, EnumString, EnumIter,
)]
#[serde(rename_all = "snake_case")]
#[strum(serialize_all = "snake_case")]
#[cfg_attr(feature = "clap", derive(clap::ValueEnum))]
pub enum EventRecordKind {
    TokenPurchase,
    VestingLockedIn,
    VestingReleased,
    EtherReleased,
    Erc20Released,
}

impl EventRecord {
    pub fn header(&self) -> &RecordHeader {
        match self {
            EventRecord::TokenPurchase(r) => &r.header,
            EventRecord::VestingLockedIn(r) => &r.header,
            EventRecord::VestingReleased(r) => &r.header,
            EventRecord::EtherReleased(r) => &r.header,
            EventRecord::Erc20Released(r) => &r.header,
        }
    }

    pub fn id(&self) -> EventId {
        self.header().id
    }

    pub fn kind(&self) -> EventRecordKind {
        match self {
            EventRecord::TokenPurchase(_) => EventRecordKind::TokenPurchase,
            EventRecord::VestingLockedIn(_) => EventRecordKind::VestingLockedIn,
            EventRecord::VestingReleased(_) => EventRecordKind::VestingReleased,
            EventRecord::EtherReleased(_) => EventRecordKind::EtherReleased,
            EventRecord::Erc20Released(_) => EventRecordKind::Erc20Released,
        }
    }
}
