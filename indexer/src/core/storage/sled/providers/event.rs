use async_trait::async_trait;
use crowdsale_common::event::{
    Erc20ReleasedRecord, EtherReleasedRecord, EventId, EventRecord, EventRecordKind,
    TokenPurchaseRecord, VestingLockedInRecord, VestingReleasedRecord,
};
use log::{debug, trace};
use sled::Tree;

use crate::core::{
    error::{DiskContext, LedgerError},
    storage::{EventRecordProvider, SledStorage},
};

impl SledStorage {
    // Records are stored without their kind tag, the tree already tells it
    fn load_event_record(
        &self,
        kind: EventRecordKind,
        tree: &Tree,
        key: &[u8],
    ) -> Result<Option<EventRecord>, LedgerError> {
        let context = DiskContext::EventRecord(kind);
        Ok(match kind {
            EventRecordKind::TokenPurchase => self
                .load_optional_from_disk::<TokenPurchaseRecord>(tree, key, context)?
                .map(EventRecord::TokenPurchase),
            EventRecordKind::VestingLockedIn => self
                .load_optional_from_disk::<VestingLockedInRecord>(tree, key, context)?
                .map(EventRecord::VestingLockedIn),
            EventRecordKind::VestingReleased => self
                .load_optional_from_disk::<VestingReleasedRecord>(tree, key, context)?
                .map(EventRecord::VestingReleased),
            EventRecordKind::EtherReleased => self
                .load_optional_from_disk::<EtherReleasedRecord>(tree, key, context)?
                .map(EventRecord::EtherReleased),
            EventRecordKind::Erc20Released => self
                .load_optional_from_disk::<Erc20ReleasedRecord>(tree, key, context)?
                .map(EventRecord::Erc20Released),
        })
    }
}

#[async_trait]
impl EventRecordProvider for SledStorage {
    async fn has_event_record(
        &self,
        kind: EventRecordKind,
        id: &EventId,
    ) -> Result<bool, LedgerError> {
        if log::log_enabled!(log::Level::Trace) {
            trace!("has {} event record {}", kind, id);
        }
        self.contains_data(self.event_tree(kind), &id.to_key())
    }

    async fn get_event_record(
        &self,
        kind: EventRecordKind,
        id: &EventId,
    ) -> Result<Option<EventRecord>, LedgerError> {
        if log::log_enabled!(log::Level::Trace) {
            trace!("get {} event record {}", kind, id);
        }
        self.load_event_record(kind, self.event_tree(kind), &id.to_key())
    }

    async fn add_event_record(&mut self, record: &EventRecord) -> Result<bool, LedgerError> {
        let kind = record.kind();
        let id = record.id();
        let key = id.to_key();
        let tree = self.event_tree(kind).clone();
        if self.contains_data(&tree, &key)? {
            debug!("{} event record {} already stored, ignoring", kind, id);
            return Ok(false);
        }

        if log::log_enabled!(log::Level::Trace) {
            trace!("add {} event record {}", kind, id);
        }

        let context = DiskContext::EventRecord(kind);
        let snapshot = self.snapshot.as_mut();
        match record {
            EventRecord::TokenPurchase(r) => {
                Self::insert_into_disk(snapshot, &tree, &key, r, context)?
            }
            EventRecord::VestingLockedIn(r) => {
                Self::insert_into_disk(snapshot, &tree, &key, r, context)?
            }
            EventRecord::VestingReleased(r) => {
                Self::insert_into_disk(snapshot, &tree, &key, r, context)?
            }
            EventRecord::EtherReleased(r) => {
                Self::insert_into_disk(snapshot, &tree, &key, r, context)?
            }
            EventRecord::Erc20Released(r) => {
                Self::insert_into_disk(snapshot, &tree, &key, r, context)?
            }
        };

        Ok(true)
    }

    async fn list_event_records(
        &self,
        kind: EventRecordKind,
        skip: usize,
        limit: usize,
    ) -> Result<Vec<EventRecord>, LedgerError> {
        if log::log_enabled!(log::Level::Trace) {
            trace!("list {} event records skip {} limit {}", kind, skip, limit);
        }
        let context = DiskContext::EventRecord(kind);
        let tree = self.event_tree(kind);
        Ok(match kind {
            EventRecordKind::TokenPurchase => self
                .list_values::<TokenPurchaseRecord>(tree, None, skip, limit, context)?
                .into_iter()
                .map(EventRecord::TokenPurchase)
                .collect(),
            EventRecordKind::VestingLockedIn => self
                .list_values::<VestingLockedInRecord>(tree, None, skip, limit, context)?
                .into_iter()
                .map(EventRecord::VestingLockedIn)
                .collect(),
            EventRecordKind::VestingReleased => self
                .list_values::<VestingReleasedRecord>(tree, None, skip, limit, context)?
                .into_iter()
                .map(EventRecord::VestingReleased)
                .collect(),
            EventRecordKind::EtherReleased => self
                .list_values::<EtherReleasedRecord>(tree, None, skip, limit, context)?
                .into_iter()
                .map(EventRecord::EtherReleased)
                .collect(),
            EventRecordKind::Erc20Released => self
                .list_values::<Erc20ReleasedRecord>(tree, None, skip, limit, context)?
                .into_iter()
                .map(EventRecord::Erc20Released)
                .collect(),
        })
    }

    async fn count_event_records(&self, kind: EventRecordKind) -> Result<usize, LedgerError> {
        if log::log_enabled!(log::Level::Trace) {
            trace!("count {} event records", kind);
        }
        self.count_entries(self.event_tree(kind))
    }
}
