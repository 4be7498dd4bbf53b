use crowdsale_common::{
    address::Address,
    amount::Amount,
    entity::{AccountRole, CrowdSaleContract},
};
use log::debug;

use super::{assign_role, fetch_account, fetch_erc20, Creations, EntityKind, Resolved};
use crate::core::{error::LedgerError, reader::ContractReader, storage::Storage};

/// Load a crowdsale or initialize it from the contract state.
///
/// `token_amount` is the amount bought by the purchase that revealed the
/// contract. The contract is read after that purchase executed, so it is added
/// back to get the supply before the first sale. It is ignored once the
/// crowdsale is known.
pub async fn fetch_crowdsale_contract<S: Storage, R: ContractReader>(
    storage: &mut S,
    reader: &R,
    address: &Address,
    token_amount: Amount,
    block: u64,
    creations: &mut Creations,
) -> Result<Resolved<CrowdSaleContract>, LedgerError> {
    let account = fetch_account(storage, address, creations)
        .await?
        .into_inner();
    if let Some(contract) = storage.get_crowdsale(address).await? {
        return Ok(Resolved::Found(contract));
    }

    let token = reader.token(address, block).await?;
    let wallet = reader.wallet(address, block).await?;
    let tokens_available = reader.tokens_available(address, block).await?;

    if let Some(token) = token.as_ref().available() {
        fetch_erc20(storage, reader, token, block, creations).await?;
    }
    if let Some(wallet) = wallet.as_ref().available() {
        fetch_account(storage, wallet, creations).await?;
    }

    let contract = CrowdSaleContract::from_first_sight(
        *address,
        token,
        wallet,
        tokens_available,
        token_amount,
    )
    .ok_or_else(|| LedgerError::Overflow {
        field: "initial_supply",
        entity: address.to_hex(),
        current: tokens_available.available().unwrap_or_default(),
        delta: token_amount,
    })?;

    if log::log_enabled!(log::Level::Debug) {
        debug!(
            "New crowdsale {} token {} wallet {} initial supply {}",
            contract.id, contract.token, contract.wallet, contract.initial_supply
        );
    }

    storage.set_crowdsale(&contract).await?;
    assign_role(storage, account, AccountRole::CrowdSale).await?;

    let resolved = Resolved::Created(contract);
    creations.track(EntityKind::CrowdSale, &resolved);
    Ok(resolved)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::{
        reader::{ContractState, StaticContractReader},
        storage::{CrowdSaleProvider, SledStorage},
    };
    use crowdsale_common::observed::Observed;

    const SALE: Address = Address::new([0xc5; 20]);
    const TOKEN: Address = Address::new([0xee; 20]);

    fn reader() -> StaticContractReader {
        StaticContractReader::default().with_contract(
            SALE,
            ContractState {
                token: Some(TOKEN),
                tokens_available: Some(Amount::from(400)),
                ..Default::default()
            },
        )
    }

    #[tokio::test]
    async fn test_known_crowdsale_is_not_initialized_again() {
        let mut storage = SledStorage::temporary().unwrap();
        let reader = reader();
        let mut creations = Creations::default();

        let first = fetch_crowdsale_contract(
            &mut storage,
            &reader,
            &SALE,
            Amount::from(100),
            10,
            &mut creations,
        )
        .await
        .unwrap();
        assert!(first.is_created());
        assert_eq!(first.get().initial_supply, Observed::Available(Amount::from(500)));
        assert!(creations.contains(EntityKind::CrowdSale, &SALE.to_hex()));
        // the token answers nothing, it is still registered
        assert!(creations.contains(EntityKind::Erc20, &TOKEN.to_hex()));
        let calls = reader.call_count();

        let mut creations = Creations::default();
        let second = fetch_crowdsale_contract(
            &mut storage,
            &reader,
            &SALE,
            Amount::from(7),
            20,
            &mut creations,
        )
        .await
        .unwrap();
        assert_eq!(second, Resolved::Found(first.get().clone()));
        assert_eq!(
            bincode::serialize(second.get()).unwrap(),
            bincode::serialize(first.get()).unwrap()
        );
        assert!(creations.is_empty());
        assert_eq!(reader.call_count(), calls);

        let stored = storage.get_crowdsale(&SALE).await.unwrap().unwrap();
        assert_eq!(&stored, first.get());
        assert_eq!(storage.count_crowdsales().await.unwrap(), 1);
    }

    #[tokio::test]
    async fn test_unknown_contract_is_created_unavailable() {
        let mut storage = SledStorage::temporary().unwrap();
        let reader = StaticContractReader::default();
        let mut creations = Creations::default();

        let resolved = fetch_crowdsale_contract(
            &mut storage,
            &reader,
            &SALE,
            Amount::from(100),
            10,
            &mut creations,
        )
        .await
        .unwrap();
        assert!(resolved.is_created());
        let contract = resolved.into_inner();
        assert!(contract.token.is_unavailable());
        assert!(contract.initial_supply.is_unavailable());
        assert!(contract.tokens_available.is_unavailable());
        assert_eq!(contract.funds_raised, Amount::zero());
    }
}
