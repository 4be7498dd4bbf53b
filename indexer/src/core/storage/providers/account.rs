use async_trait::async_trait;
use crowdsale_common::{address::Address, entity::Account};

use crate::core::error::LedgerError;

#[async_trait]
pub trait AccountProvider: Send + Sync {
    async fn has_account(&self, address: &Address) -> Result<bool, LedgerError>;

    async fn get_account(&self, address: &Address) -> Result<Option<Account>, LedgerError>;

    async fn set_account(&mut self, account: &Account) -> Result<(), LedgerError>;

    async fn count_accounts(&self) -> Result<usize, LedgerError>;
}
