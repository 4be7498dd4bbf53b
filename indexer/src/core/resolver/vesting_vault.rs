use crowdsale_common::{
    address::Address,
    amount::Amount,
    entity::{AccountRole, EntityId, Vesting, VestingVaultContract},
};

use super::{assign_role, fetch_account, fetch_erc20, Creations, EntityKind, Resolved};
use crate::core::{error::LedgerError, reader::ContractReader, storage::Storage};

pub async fn fetch_vesting_vault<S: Storage, R: ContractReader>(
    storage: &mut S,
    reader: &R,
    address: &Address,
    block: u64,
    creations: &mut Creations,
) -> Result<Resolved<VestingVaultContract>, LedgerError> {
    let account = fetch_account(storage, address, creations)
        .await?
        .into_inner();
    if let Some(vault) = storage.get_vesting_vault(address).await? {
        return Ok(Resolved::Found(vault));
    }

    let token = reader.token(address, block).await?;
    if let Some(token) = token.as_ref().available() {
        fetch_erc20(storage, reader, token, block, creations).await?;
    }

    let vault = VestingVaultContract {
        id: *address,
        token,
    };
    storage.set_vesting_vault(&vault).await?;
    assign_role(storage, account, AccountRole::VestingVault).await?;

    let resolved = Resolved::Created(vault);
    creations.track(EntityKind::VestingVault, &resolved);
    Ok(resolved)
}

/// Load the vesting of a beneficiary for one release time, empty when new.
pub async fn fetch_vesting<S: Storage>(
    storage: &mut S,
    vault: &Address,
    beneficiary: &Address,
    release_time: Amount,
    creations: &mut Creations,
) -> Result<Resolved<Vesting>, LedgerError> {
    let id = Vesting::id_for(vault, beneficiary, &release_time);
    let resolved = match storage.get_vesting(&id).await? {
        Some(vesting) => Resolved::Found(vesting),
        None => {
            let vesting = Vesting::new(*vault, *beneficiary, release_time);
            debug_assert_eq!(vesting.entity_id(), id);
            storage.set_vesting(&vesting).await?;
            Resolved::Created(vesting)
        }
    };

    creations.track(EntityKind::Vesting, &resolved);
    Ok(resolved)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::storage::{SledStorage, VestingProvider};

    const VAULT: Address = Address::new([0x7a; 20]);
    const BOB: Address = Address::new([0xbb; 20]);

    #[tokio::test]
    async fn test_fetch_vesting_once_per_release_time() {
        let mut storage = SledStorage::temporary().unwrap();
        let mut creations = Creations::default();
        let release_time = Amount::from(1_800_000_000u64);

        let first = fetch_vesting(&mut storage, &VAULT, &BOB, release_time, &mut creations)
            .await
            .unwrap();
        assert!(first.is_created());
        assert_eq!(first.get().token_amount, Amount::zero());

        let id = format!("{}/{}/1800000000", VAULT.to_hex(), BOB.to_hex());
        assert_eq!(first.get().entity_id(), id);
        assert!(creations.contains(EntityKind::Vesting, &id));

        let mut vesting = first.into_inner();
        vesting.token_amount = Amount::from(200);
        storage.set_vesting(&vesting).await.unwrap();

        let second = fetch_vesting(&mut storage, &VAULT, &BOB, release_time, &mut creations)
            .await
            .unwrap();
        assert_eq!(second, Resolved::Found(vesting));
        assert_eq!(creations.len(), 1);

        let other = fetch_vesting(
            &mut storage,
            &VAULT,
            &BOB,
            Amount::from(1_800_000_001u64),
            &mut creations,
        )
        .await
        .unwrap();
        assert!(other.is_created());
        assert_eq!(storage.count_vestings().await.unwrap(), 2);
    }
}
