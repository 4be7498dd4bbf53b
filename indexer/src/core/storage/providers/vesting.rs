use async_trait::async_trait;
use crowdsale_common::{
    address::Address,
    entity::{Vesting, VestingVaultContract},
};

use crate::core::error::LedgerError;

#[async_trait]
pub trait VestingVaultProvider: Send + Sync {
    async fn get_vesting_vault(
        &self,
        address: &Address,
    ) -> Result<Option<VestingVaultContract>, LedgerError>;

    async fn set_vesting_vault(&mut self, vault: &VestingVaultContract)
        -> Result<(), LedgerError>;

    async fn count_vesting_vaults(&self) -> Result<usize, LedgerError>;
}

#[async_trait]
pub trait VestingProvider: Send + Sync {
    // id is vault/beneficiary/releaseTime
    async fn get_vesting(&self, id: &str) -> Result<Option<Vesting>, LedgerError>;

    async fn set_vesting(&mut self, vesting: &Vesting) -> Result<(), LedgerError>;

    // All vestings of a vault, ordered by id, from committed data only
    async fn list_vestings(
        &self,
        vault: &Address,
        skip: usize,
        limit: usize,
    ) -> Result<Vec<Vesting>, LedgerError>;

    async fn count_vestings(&self) -> Result<usize, LedgerError>;
}
