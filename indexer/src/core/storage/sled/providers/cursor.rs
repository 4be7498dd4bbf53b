use async_trait::async_trait;
use crowdsale_common::event::EventId;
use log::trace;

use crate::core::{
    error::{DiskContext, LedgerError},
    storage::{sled::CURSOR, CursorProvider, SledStorage},
};

#[async_trait]
impl CursorProvider for SledStorage {
    async fn get_cursor(&self) -> Result<Option<EventId>, LedgerError> {
        trace!("get cursor");
        self.load_optional_from_disk(&self.extra, CURSOR, DiskContext::Cursor)
    }

    async fn set_cursor(&mut self, id: &EventId) -> Result<(), LedgerError> {
        if log::log_enabled!(log::Level::Trace) {
            trace!("set cursor to {}", id);
        }
        Self::insert_into_disk(
            self.snapshot.as_mut(),
            &self.extra,
            CURSOR,
            id,
            DiskContext::Cursor,
        )
    }
}
