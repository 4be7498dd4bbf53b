mod crowdsale;
mod vesting_vault;
mod vesting_wallet;

pub use self::{
    crowdsale::handle_tokens_purchased,
    vesting_vault::{handle_vesting_locked_in, handle_vesting_released},
    vesting_wallet::{handle_erc20_released, handle_ether_released},
};

use crowdsale_common::event::{ContractEvent, EventId, EventKind, EventRecord, EventRecordKind};
use log::trace;
use serde::Serialize;

use crate::core::{
    error::LedgerError,
    reader::ContractReader,
    resolver::Creations,
    storage::Storage,
};

/// What handling one event changed in the ledger.
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct HandlerReport {
    pub event: EventId,
    pub record: EventRecordKind,
    pub created: Creations,
}

/// Route an event to its handler.
///
/// Writes go through the storage as they happen, callers that need all or
/// nothing must run this inside a snapshot.
pub async fn handle_event<S: Storage, R: ContractReader>(
    storage: &mut S,
    reader: &R,
    event: &ContractEvent,
) -> Result<HandlerReport, LedgerError> {
    if log::log_enabled!(log::Level::Trace) {
        trace!("handle {} {} from {}", event.kind.name(), event.id(), event.meta.address);
    }

    let mut created = Creations::default();
    let meta = &event.meta;
    let record = match &event.kind {
        EventKind::TokensPurchased {
            purchaser,
            beneficiary,
            amount,
            value,
        } => {
            handle_tokens_purchased(
                storage,
                reader,
                meta,
                purchaser,
                beneficiary,
                *amount,
                *value,
                &mut created,
            )
            .await?
        }
        EventKind::VestingLockedIn {
            beneficiary,
            release_time,
            token_amount,
        } => {
            handle_vesting_locked_in(
                storage,
                reader,
                meta,
                beneficiary,
                *release_time,
                *token_amount,
                &mut created,
            )
            .await?
        }
        EventKind::VestingReleased {
            beneficiary,
            release_time,
            token_amount,
        } => {
            handle_vesting_released(
                storage,
                reader,
                meta,
                beneficiary,
                *release_time,
                *token_amount,
                &mut created,
            )
            .await?
        }
        EventKind::EtherReleased { amount } => {
            handle_ether_released(storage, reader, meta, *amount, &mut created).await?
        }
        EventKind::Erc20Released { token, amount } => {
            handle_erc20_released(storage, reader, meta, token, *amount, &mut created).await?
        }
    };

    Ok(HandlerReport {
        event: record.id(),
        record: record.kind(),
        created,
    })
}

// Event records are immutable, storing one twice means the event was replayed
async fn store_record<S: Storage>(storage: &mut S, record: &EventRecord) -> Result<(), LedgerError> {
    if !storage.add_event_record(record).await? {
        return Err(LedgerError::DuplicateEvent(record.id(), record.kind()));
    }
    Ok(())
}
