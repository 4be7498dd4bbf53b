use async_trait::async_trait;

use crate::core::error::LedgerError;

/// Groups every write of one event so it is applied entirely or not at all.
#[async_trait]
pub trait SnapshotProvider: Send + Sync {
    async fn has_snapshot(&self) -> Result<bool, LedgerError>;

    async fn start_snapshot(&mut self) -> Result<(), LedgerError>;

    // apply = false drops all pending writes
    async fn end_snapshot(&mut self, apply: bool) -> Result<(), LedgerError>;
}
