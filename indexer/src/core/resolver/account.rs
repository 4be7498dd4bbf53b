use crowdsale_common::{
    address::Address,
    entity::{Account, AccountRole},
};
use log::warn;

use super::{Creations, EntityKind, Resolved};
use crate::core::{error::LedgerError, storage::Storage};

/// Load the account of an address or register it.
///
/// Addresses are case-insensitive, any spelling resolves to the same record.
pub async fn fetch_account<S: Storage>(
    storage: &mut S,
    address: &Address,
    creations: &mut Creations,
) -> Result<Resolved<Account>, LedgerError> {
    let resolved = match storage.get_account(address).await? {
        Some(account) => Resolved::Found(account),
        None => {
            let account = Account::new(*address);
            storage.set_account(&account).await?;
            Resolved::Created(account)
        }
    };

    creations.track(EntityKind::Account, &resolved);
    Ok(resolved)
}

/// Link an account to the contract entity living at the same address.
///
/// The first role wins, an account never changes its role.
pub async fn assign_role<S: Storage>(
    storage: &mut S,
    mut account: Account,
    role: AccountRole,
) -> Result<Account, LedgerError> {
    match account.role {
        Some(current) if current == role => {}
        Some(current) => {
            if log::log_enabled!(log::Level::Warn) {
                warn!(
                    "Account {} is already a {}, not marking it as {}",
                    account.id, current, role
                );
            }
        }
        None => {
            account.role = Some(role);
            storage.set_account(&account).await?;
        }
    }
    Ok(account)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::storage::{AccountProvider, SledStorage};

    #[tokio::test]
    async fn test_fetch_account_is_case_insensitive() {
        let mut storage = SledStorage::temporary().unwrap();
        let mut creations = Creations::default();

        let lower: Address = "0x00000000000000000000000000000000000000aa".parse().unwrap();
        let upper: Address = "0x00000000000000000000000000000000000000AA".parse().unwrap();

        let first = fetch_account(&mut storage, &lower, &mut creations).await.unwrap();
        assert!(first.is_created());
        assert_eq!(first.get().id.to_hex(), "0x00000000000000000000000000000000000000aa");

        let second = fetch_account(&mut storage, &upper, &mut creations).await.unwrap();
        assert_eq!(second, Resolved::Found(first.into_inner()));
        assert_eq!(creations.len(), 1);
        assert_eq!(storage.count_accounts().await.unwrap(), 1);
    }

    #[tokio::test]
    async fn test_first_role_wins() {
        let mut storage = SledStorage::temporary().unwrap();
        let address = Address::new([7; 20]);
        let account = Account::new(address);

        let account = assign_role(&mut storage, account, AccountRole::CrowdSale).await.unwrap();
        let account = assign_role(&mut storage, account, AccountRole::Erc20).await.unwrap();
        assert_eq!(account.role, Some(AccountRole::CrowdSale));
        assert_eq!(
            storage.get_account(&address).await.unwrap().unwrap().role,
            Some(AccountRole::CrowdSale)
        );
    }
}
