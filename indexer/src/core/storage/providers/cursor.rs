use async_trait::async_trait;
use crowdsale_common::event::EventId;

use crate::core::error::LedgerError;

/// Position of the last event fully applied to the ledger.
#[async_trait]
pub trait CursorProvider: Send + Sync {
    async fn get_cursor(&self) -> Result<Option<EventId>, LedgerError>;

    async fn set_cursor(&mut self, id: &EventId) -> Result<(), LedgerError>;
}
