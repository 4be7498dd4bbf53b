use async_trait::async_trait;
use crowdsale_common::{
    address::Address,
    config::VESTING_ID_SEPARATOR,
    entity::{EntityId, Vesting, VestingVaultContract},
};
use log::trace;

use crate::core::{
    error::{DiskContext, LedgerError},
    storage::{SledStorage, VestingProvider, VestingVaultProvider},
};

#[async_trait]
impl VestingVaultProvider for SledStorage {
    async fn get_vesting_vault(
        &self,
        address: &Address,
    ) -> Result<Option<VestingVaultContract>, LedgerError> {
        if log::log_enabled!(log::Level::Trace) {
            trace!("get vesting vault {}", address);
        }
        self.load_optional_from_disk(
            &self.vesting_vaults,
            address.to_hex().as_bytes(),
            DiskContext::VestingVault,
        )
    }

    async fn set_vesting_vault(
        &mut self,
        vault: &VestingVaultContract,
    ) -> Result<(), LedgerError> {
        if log::log_enabled!(log::Level::Trace) {
            trace!("set vesting vault {}", vault.id);
        }
        Self::insert_into_disk(
            self.snapshot.as_mut(),
            &self.vesting_vaults,
            vault.id.to_hex().as_bytes(),
            vault,
            DiskContext::VestingVault,
        )
    }

    async fn count_vesting_vaults(&self) -> Result<usize, LedgerError> {
        trace!("count vesting vaults");
        self.count_entries(&self.vesting_vaults)
    }
}

#[async_trait]
impl VestingProvider for SledStorage {
    async fn get_vesting(&self, id: &str) -> Result<Option<Vesting>, LedgerError> {
        if log::log_enabled!(log::Level::Trace) {
            trace!("get vesting {}", id);
        }
        self.load_optional_from_disk(&self.vestings, id.as_bytes(), DiskContext::Vesting)
    }

    async fn set_vesting(&mut self, vesting: &Vesting) -> Result<(), LedgerError> {
        let id = vesting.entity_id();
        if log::log_enabled!(log::Level::Trace) {
            trace!("set vesting {} to {}", id, vesting.token_amount);
        }
        Self::insert_into_disk(
            self.snapshot.as_mut(),
            &self.vestings,
            id.as_bytes(),
            vesting,
            DiskContext::Vesting,
        )
    }

    async fn list_vestings(
        &self,
        vault: &Address,
        skip: usize,
        limit: usize,
    ) -> Result<Vec<Vesting>, LedgerError> {
        if log::log_enabled!(log::Level::Trace) {
            trace!("list vestings of {} skip {} limit {}", vault, skip, limit);
        }
        let prefix = format!("{}{}", vault.to_hex(), VESTING_ID_SEPARATOR);
        self.list_values(
            &self.vestings,
            Some(prefix.as_bytes()),
            skip,
            limit,
            DiskContext::Vesting,
        )
    }

    async fn count_vestings(&self) -> Result<usize, LedgerError> {
        trace!("count vestings");
        self.count_entries(&self.vestings)
    }
}
