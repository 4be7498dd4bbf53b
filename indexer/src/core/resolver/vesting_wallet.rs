use crowdsale_common::{
    address::Address,
    entity::{AccountRole, VestingWalletContract},
};
use log::debug;

use super::{assign_role, fetch_account, Creations, EntityKind, Resolved};
use crate::core::{error::LedgerError, reader::ContractReader, storage::Storage};

/// Load a vesting wallet or read its schedule and beneficiary once.
pub async fn fetch_vesting_wallet<S: Storage, R: ContractReader>(
    storage: &mut S,
    reader: &R,
    address: &Address,
    block: u64,
    creations: &mut Creations,
) -> Result<Resolved<VestingWalletContract>, LedgerError> {
    let account = fetch_account(storage, address, creations)
        .await?
        .into_inner();
    if let Some(wallet) = storage.get_vesting_wallet(address).await? {
        return Ok(Resolved::Found(wallet));
    }

    let start = reader.start(address, block).await?;
    let duration = reader.duration(address, block).await?;
    let beneficiary = reader.owner(address, block).await?;
    if let Some(beneficiary) = beneficiary.as_ref().available() {
        fetch_account(storage, beneficiary, creations).await?;
    }

    let wallet = VestingWalletContract::new(*address, beneficiary, start, duration);
    if log::log_enabled!(log::Level::Debug) {
        debug!(
            "New vesting wallet {} beneficiary {} start {} duration {}",
            wallet.id, wallet.beneficiary, wallet.start, wallet.duration
        );
    }

    storage.set_vesting_wallet(&wallet).await?;
    assign_role(storage, account, AccountRole::VestingWallet).await?;

    let resolved = Resolved::Created(wallet);
    creations.track(EntityKind::VestingWallet, &resolved);
    Ok(resolved)
}
