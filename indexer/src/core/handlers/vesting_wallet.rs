use crowdsale_common::{
    address::Address,
    amount::Amount,
    event::{Erc20ReleasedRecord, EtherReleasedRecord, EventMeta, EventRecord},
};
use log::debug;

use super::store_record;
use crate::core::{
    error::{checked_add, LedgerError},
    reader::ContractReader,
    resolver::{fetch_erc20, fetch_transaction, fetch_vesting_wallet, Creations},
    storage::Storage,
};

pub async fn handle_ether_released<S: Storage, R: ContractReader>(
    storage: &mut S,
    reader: &R,
    meta: &EventMeta,
    amount: Amount,
    created: &mut Creations,
) -> Result<EventRecord, LedgerError> {
    let mut wallet = fetch_vesting_wallet(storage, reader, &meta.address, meta.block_number, created)
        .await?
        .into_inner();
    fetch_transaction(storage, meta, created).await?;

    let record = EventRecord::EtherReleased(EtherReleasedRecord {
        header: meta.into(),
        contract: wallet.id,
        amount,
        from: wallet.id,
        to: wallet.beneficiary,
    });

    wallet.ether_released =
        checked_add("ether_released", &wallet.id.to_hex(), wallet.ether_released, amount)?;
    if log::log_enabled!(log::Level::Debug) {
        debug!("{} released {} wei to {}", wallet.id, amount, wallet.beneficiary);
    }

    store_record(storage, &record).await?;
    storage.set_vesting_wallet(&wallet).await?;
    Ok(record)
}

pub async fn handle_erc20_released<S: Storage, R: ContractReader>(
    storage: &mut S,
    reader: &R,
    meta: &EventMeta,
    token: &Address,
    amount: Amount,
    created: &mut Creations,
) -> Result<EventRecord, LedgerError> {
    let mut wallet = fetch_vesting_wallet(storage, reader, &meta.address, meta.block_number, created)
        .await?
        .into_inner();
    let token = fetch_erc20(storage, reader, token, meta.block_number, created)
        .await?
        .into_inner();
    fetch_transaction(storage, meta, created).await?;

    let record = EventRecord::Erc20Released(Erc20ReleasedRecord {
        header: meta.into(),
        contract: wallet.id,
        token: token.id,
        amount,
        from: wallet.id,
        to: wallet.beneficiary,
    });

    wallet.erc20_released =
        checked_add("erc20_released", &wallet.id.to_hex(), wallet.erc20_released, amount)?;
    if log::log_enabled!(log::Level::Debug) {
        debug!(
            "{} released {} of token {} to {}",
            wallet.id, amount, token.id, wallet.beneficiary
        );
    }

    store_record(storage, &record).await?;
    storage.set_vesting_wallet(&wallet).await?;
    Ok(record)
}
