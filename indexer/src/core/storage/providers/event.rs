use async_trait::async_trait;
use crowdsale_common::event::{EventId, EventRecord, EventRecordKind};

use crate::core::error::LedgerError;

/// Immutable event records, one tree per kind, ordered by [`EventId`].
#[async_trait]
pub trait EventRecordProvider: Send + Sync {
    async fn has_event_record(
        &self,
        kind: EventRecordKind,
        id: &EventId,
    ) -> Result<bool, LedgerError>;

    async fn get_event_record(
        &self,
        kind: EventRecordKind,
        id: &EventId,
    ) -> Result<Option<EventRecord>, LedgerError>;

    // Records are written once, a second write for the same id is ignored
    async fn add_event_record(&mut self, record: &EventRecord) -> Result<bool, LedgerError>;

    async fn list_event_records(
        &self,
        kind: EventRecordKind,
        skip: usize,
        limit: usize,
    ) -> Result<Vec<EventRecord>, LedgerError>;

    async fn count_event_records(&self, kind: EventRecordKind) -> Result<usize, LedgerError>;
}
