use crowdsale_common::{
    address::Address,
    amount::Amount,
    event::{EventMeta, EventRecord, TokenPurchaseRecord},
    observed::Observed,
};
use log::{debug, warn};

use super::store_record;
use crate::core::{
    error::{checked_add, LedgerError},
    reader::ContractReader,
    resolver::{fetch_account, fetch_crowdsale_contract, fetch_transaction, Creations},
    storage::Storage,
};

/// Record a purchase and move its amounts on the crowdsale totals.
///
/// `tokens_available` only moves when it could be read from the contract.
/// Tokens sent to the crowdsale by plain transfers are not seen, so a purchase
/// above the ledger figure makes it `Unavailable` instead of failing the
/// purchase. `funds_raised` always counts from zero.
pub async fn handle_tokens_purchased<S: Storage, R: ContractReader>(
    storage: &mut S,
    reader: &R,
    meta: &EventMeta,
    purchaser: &Address,
    beneficiary: &Address,
    amount: Amount,
    value: Amount,
    created: &mut Creations,
) -> Result<EventRecord, LedgerError> {
    let mut contract = fetch_crowdsale_contract(
        storage,
        reader,
        &meta.address,
        amount,
        meta.block_number,
        created,
    )
    .await?
    .into_inner();
    let purchaser = fetch_account(storage, purchaser, created).await?.into_inner();
    let beneficiary = fetch_account(storage, beneficiary, created).await?.into_inner();
    fetch_transaction(storage, meta, created).await?;

    let record = EventRecord::TokenPurchase(TokenPurchaseRecord {
        header: meta.into(),
        contract: contract.id,
        purchaser: purchaser.id,
        beneficiary: beneficiary.id,
        token_amount: amount,
        wei_value: value,
    });

    let entity = contract.id.to_hex();
    contract.tokens_available = match contract.tokens_available {
        Observed::Available(available) => match available.checked_sub(amount) {
            Some(left) => Observed::Available(left),
            None => {
                if log::log_enabled!(log::Level::Warn) {
                    warn!(
                        "Purchase {} of {} tokens is above the {} available on {}, supply is now unknown",
                        record.id(),
                        amount,
                        available,
                        entity
                    );
                }
                Observed::Unavailable
            }
        },
        Observed::Unavailable => Observed::Unavailable,
    };
    contract.funds_raised = checked_add("funds_raised", &entity, contract.funds_raised, value)?;

    if log::log_enabled!(log::Level::Debug) {
        debug!(
            "{} bought {} tokens of {} for {}, available {} raised {}",
            purchaser.id, amount, entity, value, contract.tokens_available, contract.funds_raised
        );
    }

    store_record(storage, &record).await?;
    storage.set_crowdsale(&contract).await?;
    Ok(record)
}
