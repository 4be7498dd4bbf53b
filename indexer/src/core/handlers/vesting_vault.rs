use crowdsale_common::{
    address::Address,
    amount::Amount,
    entity::{EntityId, Vesting},
    event::{EventMeta, EventRecord, VestingLockedInRecord, VestingReleasedRecord},
};
use log::debug;

use super::store_record;
use crate::core::{
    error::{checked_add, checked_sub, LedgerError},
    reader::ContractReader,
    resolver::{
        fetch_account, fetch_transaction, fetch_vesting, fetch_vesting_vault, Creations,
    },
    storage::Storage,
};

// Vault, beneficiary and vesting shared by lock-ins and releases
async fn resolve_vesting<S: Storage, R: ContractReader>(
    storage: &mut S,
    reader: &R,
    meta: &EventMeta,
    beneficiary: &Address,
    release_time: Amount,
    created: &mut Creations,
) -> Result<Vesting, LedgerError> {
    let vault = fetch_vesting_vault(storage, reader, &meta.address, meta.block_number, created)
        .await?
        .into_inner();
    let beneficiary = fetch_account(storage, beneficiary, created).await?.into_inner();
    fetch_transaction(storage, meta, created).await?;
    Ok(fetch_vesting(storage, &vault.id, &beneficiary.id, release_time, created)
        .await?
        .into_inner())
}

pub async fn handle_vesting_locked_in<S: Storage, R: ContractReader>(
    storage: &mut S,
    reader: &R,
    meta: &EventMeta,
    beneficiary: &Address,
    release_time: Amount,
    token_amount: Amount,
    created: &mut Creations,
) -> Result<EventRecord, LedgerError> {
    let mut vesting =
        resolve_vesting(storage, reader, meta, beneficiary, release_time, created).await?;

    let record = EventRecord::VestingLockedIn(VestingLockedInRecord {
        header: meta.into(),
        contract: vesting.contract,
        beneficiary: vesting.beneficiary,
        token_amount,
        release_time,
    });

    let id = vesting.entity_id();
    vesting.token_amount = checked_add("token_amount", &id, vesting.token_amount, token_amount)?;
    if log::log_enabled!(log::Level::Debug) {
        debug!("Locked {} in {}, now {}", token_amount, id, vesting.token_amount);
    }

    store_record(storage, &record).await?;
    storage.set_vesting(&vesting).await?;
    Ok(record)
}

/// A release never takes more than what was locked for the same release time.
pub async fn handle_vesting_released<S: Storage, R: ContractReader>(
    storage: &mut S,
    reader: &R,
    meta: &EventMeta,
    beneficiary: &Address,
    release_time: Amount,
    token_amount: Amount,
    created: &mut Creations,
) -> Result<EventRecord, LedgerError> {
    let mut vesting =
        resolve_vesting(storage, reader, meta, beneficiary, release_time, created).await?;

    let record = EventRecord::VestingReleased(VestingReleasedRecord {
        header: meta.into(),
        contract: vesting.contract,
        beneficiary: vesting.beneficiary,
        token_amount,
        release_time,
    });

    let id = vesting.entity_id();
    vesting.token_amount = checked_sub("token_amount", &id, vesting.token_amount, token_amount)?;
    if log::log_enabled!(log::Level::Debug) {
        debug!("Released {} from {}, now {}", token_amount, id, vesting.token_amount);
    }

    store_record(storage, &record).await?;
    storage.set_vesting(&vesting).await?;
    Ok(record)
}
