use async_trait::async_trait;
use crowdsale_common::{address::TxHash, entity::Transaction};
use log::trace;

use crate::core::{
    error::{DiskContext, LedgerError},
    storage::{SledStorage, TransactionProvider},
};

#[async_trait]
impl TransactionProvider for SledStorage {
    async fn get_transaction(&self, hash: &TxHash) -> Result<Option<Transaction>, LedgerError> {
        if log::log_enabled!(log::Level::Trace) {
            trace!("get transaction {}", hash);
        }
        self.load_optional_from_disk(
            &self.transactions,
            hash.as_bytes(),
            DiskContext::Transaction,
        )
    }

    async fn set_transaction(&mut self, transaction: &Transaction) -> Result<(), LedgerError> {
        if log::log_enabled!(log::Level::Trace) {
            trace!("set transaction {}", transaction.id);
        }
        Self::insert_into_disk(
            self.snapshot.as_mut(),
            &self.transactions,
            transaction.id.as_bytes(),
            transaction,
            DiskContext::Transaction,
        )
    }

    async fn count_transactions(&self) -> Result<usize, LedgerError> {
        trace!("count transactions");
        self.count_entries(&self.transactions)
    }
}
