mod kind;
mod record;

pub use kind::*;
pub use record::*;

use serde::{Deserialize, Serialize};
use std::{
    fmt::{self, Display, Formatter},
    str::FromStr,
};

use crate::{
    address::{Address, TxHash},
    config::EVENT_ID_SEPARATOR,
};

/// Position of a log in the canonical chain, also the id of its event record.
///
/// Ordering follows delivery order: block number first, then log index.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct EventId {
    pub block_number: u64,
    pub log_index: u64,
}

impl EventId {
    pub fn new(block_number: u64, log_index: u64) -> Self {
        Self {
            block_number,
            log_index,
        }
    }

    // Big-endian so that byte order matches chain order in sorted trees
    pub fn to_key(&self) -> [u8; 16] {
        let mut key = [0u8; 16];
        key[..8].copy_from_slice(&self.block_number.to_be_bytes());
        key[8..].copy_from_slice(&self.log_index.to_be_bytes());
        key
    }

    pub fn from_key(key: &[u8]) -> Option<Self> {
        if key.len() != 16 {
            return None;
        }
        let mut block = [0u8; 8];
        let mut log = [0u8; 8];
        block.copy_from_slice(&key[..8]);
        log.copy_from_slice(&key[8..]);
        Some(Self::new(u64::from_be_bytes(block), u64::from_be_bytes(log)))
    }
}

impl Display for EventId {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{}{}{}",
            self.block_number, EVENT_ID_SEPARATOR, self.log_index
        )
    }
}

impl FromStr for EventId {
    type Err = &'static str;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let (block, log) = s
            .split_once(EVENT_ID_SEPARATOR)
            .ok_or("Invalid event id")?;
        let block_number = block.parse().map_err(|_| "Invalid block number")?;
        let log_index = log.parse().map_err(|_| "Invalid log index")?;
        Ok(Self::new(block_number, log_index))
    }
}

/// Where and when a contract emitted an event.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct EventMeta {
    // Emitting contract
    pub address: Address,
    pub transaction_hash: TxHash,
    pub block_number: u64,
    pub log_index: u64,
    // Block timestamp in seconds
    pub timestamp: u64,
}

impl EventMeta {
    pub fn event_id(&self) -> EventId {
        EventId::new(self.block_number, self.log_index)
    }
}

/// One confirmed log as delivered by the event source.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct ContractEvent {
    #[serde(flatten)]
    pub meta: EventMeta,
    #[serde(flatten)]
    pub kind: EventKind,
}

impl ContractEvent {
    pub fn new(meta: EventMeta, kind: EventKind) -> Self {
        Self { meta, kind }
    }

    pub fn id(&self) -> EventId {
        self.meta.event_id()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::amount::Amount;

    #[test]
    fn test_event_id_order_and_format() {
        let a = EventId::new(10, 3);
        let b = EventId::new(11, 0);
        assert!(a < b);
        assert!(a.to_key() < b.to_key());
        assert_eq!(a.to_string(), "10-3");
        assert_eq!("10-3".parse::<EventId>().unwrap(), a);
        assert_eq!(EventId::from_key(&a.to_key()), Some(a));
    }

    #[test]
    fn test_parse_json_line() {
        let line = r#"{
            "address": "0x00000000000000000000000000000000000000C5",
            "transaction_hash": "0x0101010101010101010101010101010101010101010101010101010101010101",
            "block_number": 7,
            "log_index": 2,
            "timestamp": 1700000000,
            "event": "TokensPurchased",
            "purchaser": "0x00000000000000000000000000000000000000aa",
            "beneficiary": "0x00000000000000000000000000000000000000bb",
            "amount": "100",
            "value": 10
        }"#;
        let event: ContractEvent = serde_json::from_str(line).unwrap();
        assert_eq!(event.id(), EventId::new(7, 2));
        match event.kind {
            EventKind::TokensPurchased { amount, value, .. } => {
                assert_eq!(amount, Amount::from(100));
                assert_eq!(value, Amount::from(10));
            }
            other => panic!("unexpected event {:?}", other),
        }
    }
}
