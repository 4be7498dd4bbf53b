use crowdsale_common::event::{ContractEvent, EventId};
use log::{debug, error, info};
use serde::Serialize;

use super::{
    error::LedgerError,
    handlers::{handle_event, HandlerReport},
    reader::ContractReader,
    storage::Storage,
};

#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum ProcessOutcome {
    Applied(HandlerReport),
    // Already covered by the cursor
    Skipped { cursor: EventId },
}

#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize)]
pub struct ReplaySummary {
    pub applied: usize,
    pub skipped: usize,
    pub created: usize,
    pub last_event: Option<EventId>,
}

/// Single writer over the ledger.
///
/// Events must be given in chain order. Each one is applied in its own
/// snapshot together with the cursor. Once an event fails, every later event
/// is refused until the failed one is applied, so the ledger always holds
/// exactly the events up to the cursor.
pub struct Indexer<S: Storage, R: ContractReader> {
    storage: S,
    reader: R,
    // Earliest event that failed and was not applied since
    halted: Option<EventId>,
}

impl<S: Storage, R: ContractReader> Indexer<S, R> {
    pub fn new(storage: S, reader: R) -> Self {
        Self {
            storage,
            reader,
            halted: None,
        }
    }

    pub fn storage(&self) -> &S {
        &self.storage
    }

    pub fn reader(&self) -> &R {
        &self.reader
    }

    pub fn halted(&self) -> Option<EventId> {
        self.halted
    }

    pub async fn process(&mut self, event: &ContractEvent) -> Result<ProcessOutcome, LedgerError> {
        let id = event.id();
        if let Some(cursor) = self.storage.get_cursor().await? {
            if id <= cursor {
                if log::log_enabled!(log::Level::Debug) {
                    debug!("Skipping event {}, cursor is at {}", id, cursor);
                }
                return Ok(ProcessOutcome::Skipped { cursor });
            }
        }

        if let Some(failed) = self.halted {
            if id > failed {
                return Err(LedgerError::Halted { failed, event: id });
            }
        }

        self.storage.start_snapshot().await?;
        match self.apply(event).await {
            Ok(report) => {
                if let Err(e) = self.storage.end_snapshot(true).await {
                    self.halted = Some(id);
                    return Err(e);
                }
                if self.halted == Some(id) {
                    info!("Event {} applied, resuming", id);
                    self.halted = None;
                }
                Ok(ProcessOutcome::Applied(report))
            }
            Err(e) => {
                if log::log_enabled!(log::Level::Error) {
                    error!("Error while handling {} {}: {}", event.kind.name(), id, e);
                }
                self.halted = Some(id);
                if let Err(e) = self.storage.end_snapshot(false).await {
                    error!("Error while dropping snapshot: {}", e);
                }
                Err(e)
            }
        }
    }

    async fn apply(&mut self, event: &ContractEvent) -> Result<HandlerReport, LedgerError> {
        let report = handle_event(&mut self.storage, &self.reader, event).await?;
        self.storage.set_cursor(&event.id()).await?;
        Ok(report)
    }

    /// Apply events in order, stopping at the first failure.
    pub async fn process_all<I>(&mut self, events: I) -> Result<ReplaySummary, LedgerError>
    where
        I: IntoIterator<Item = ContractEvent>,
    {
        let mut summary = ReplaySummary::default();
        for event in events {
            match self.process(&event).await? {
                ProcessOutcome::Applied(report) => {
                    summary.applied += 1;
                    summary.created += report.created.len();
                    summary.last_event = Some(report.event);
                }
                ProcessOutcome::Skipped { .. } => summary.skipped += 1,
            }
        }

        if log::log_enabled!(log::Level::Info) {
            info!(
                "Applied {} events, skipped {}, created {} entities",
                summary.applied, summary.skipped, summary.created
            );
        }
        Ok(summary)
    }

    /// Flush the ledger and release it.
    pub async fn close(mut self) -> Result<(), LedgerError> {
        info!("Closing ledger");
        self.storage.flush().await
    }
}
