use async_trait::async_trait;
use log::{debug, trace};

use crate::core::{
    error::LedgerError,
    storage::{sled::Snapshot, SledStorage, SnapshotProvider},
};

#[async_trait]
impl SnapshotProvider for SledStorage {
    // Check if we have a snapshot already set
    async fn has_snapshot(&self) -> Result<bool, LedgerError> {
        Ok(self.snapshot.is_some())
    }

    async fn start_snapshot(&mut self) -> Result<(), LedgerError> {
        trace!("Starting snapshot");
        if self.snapshot.is_some() {
            return Err(LedgerError::SnapshotAlreadyStarted);
        }

        self.snapshot = Some(Snapshot::new());
        Ok(())
    }

    async fn end_snapshot(&mut self, apply: bool) -> Result<(), LedgerError> {
        trace!("end snapshot");
        let snapshot = self
            .snapshot
            .take()
            .ok_or(LedgerError::SnapshotNotStarted)?;

        if apply {
            self.apply_snapshot(snapshot)?;
        } else {
            debug!("Dropping pending changes of the snapshot");
        }

        Ok(())
    }
}
