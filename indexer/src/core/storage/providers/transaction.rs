use async_trait::async_trait;
use crowdsale_common::{address::TxHash, entity::Transaction};

use crate::core::error::LedgerError;

#[async_trait]
pub trait TransactionProvider: Send + Sync {
    async fn get_transaction(&self, hash: &TxHash) -> Result<Option<Transaction>, LedgerError>;

    async fn set_transaction(&mut self, transaction: &Transaction) -> Result<(), LedgerError>;

    async fn count_transactions(&self) -> Result<usize, LedgerError>;
}
