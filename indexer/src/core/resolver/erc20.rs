use crowdsale_common::{
    address::Address,
    entity::{AccountRole, Erc20Contract},
};
use log::debug;

use super::{assign_role, fetch_account, Creations, EntityKind, Resolved};
use crate::core::{error::LedgerError, reader::ContractReader, storage::Storage};

/// Load token metadata or read it from the token contract.
pub async fn fetch_erc20<S: Storage, R: ContractReader>(
    storage: &mut S,
    reader: &R,
    address: &Address,
    block: u64,
    creations: &mut Creations,
) -> Result<Resolved<Erc20Contract>, LedgerError> {
    let account = fetch_account(storage, address, creations)
        .await?
        .into_inner();
    if let Some(token) = storage.get_erc20(address).await? {
        return Ok(Resolved::Found(token));
    }

    let token = Erc20Contract {
        id: *address,
        name: reader.name(address, block).await?,
        symbol: reader.symbol(address, block).await?,
        decimals: reader.decimals(address, block).await?,
    };
    if log::log_enabled!(log::Level::Debug) {
        debug!(
            "New token {} name {} symbol {} decimals {}",
            token.id, token.name, token.symbol, token.decimals
        );
    }

    storage.set_erc20(&token).await?;
    assign_role(storage, account, AccountRole::Erc20).await?;

    let resolved = Resolved::Created(token);
    creations.track(EntityKind::Erc20, &resolved);
    Ok(resolved)
}
