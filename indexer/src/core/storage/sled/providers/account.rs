use async_trait::async_trait;
use crowdsale_common::{address::Address, entity::Account};
use log::trace;

use crate::core::{
    error::{DiskContext, LedgerError},
    storage::{AccountProvider, SledStorage},
};

#[async_trait]
impl AccountProvider for SledStorage {
    async fn has_account(&self, address: &Address) -> Result<bool, LedgerError> {
        if log::log_enabled!(log::Level::Trace) {
            trace!("has account {}", address);
        }
        self.contains_data(&self.accounts, address.to_hex().as_bytes())
    }

    async fn get_account(&self, address: &Address) -> Result<Option<Account>, LedgerError> {
        if log::log_enabled!(log::Level::Trace) {
            trace!("get account {}", address);
        }
        self.load_optional_from_disk(
            &self.accounts,
            address.to_hex().as_bytes(),
            DiskContext::Account,
        )
    }

    async fn set_account(&mut self, account: &Account) -> Result<(), LedgerError> {
        if log::log_enabled!(log::Level::Trace) {
            trace!("set account {}", account.id);
        }
        Self::insert_into_disk(
            self.snapshot.as_mut(),
            &self.accounts,
            account.id.to_hex().as_bytes(),
            account,
            DiskContext::Account,
        )
    }

    async fn count_accounts(&self) -> Result<usize, LedgerError> {
        trace!("count accounts");
        self.count_entries(&self.accounts)
    }
}
