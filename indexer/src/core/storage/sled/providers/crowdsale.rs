use async_trait::async_trait;
use crowdsale_common::{address::Address, entity::CrowdSaleContract};
use log::trace;

use crate::core::{
    error::{DiskContext, LedgerError},
    storage::{CrowdSaleProvider, SledStorage},
};

#[async_trait]
impl CrowdSaleProvider for SledStorage {
    async fn get_crowdsale(
        &self,
        address: &Address,
    ) -> Result<Option<CrowdSaleContract>, LedgerError> {
        if log::log_enabled!(log::Level::Trace) {
            trace!("get crowdsale {}", address);
        }
        self.load_optional_from_disk(
            &self.crowdsales,
            address.to_hex().as_bytes(),
            DiskContext::CrowdSale,
        )
    }

    async fn set_crowdsale(&mut self, contract: &CrowdSaleContract) -> Result<(), LedgerError> {
        if log::log_enabled!(log::Level::Trace) {
            trace!(
                "set crowdsale {} tokens available {} funds raised {}",
                contract.id,
                contract.tokens_available,
                contract.funds_raised
            );
        }
        Self::insert_into_disk(
            self.snapshot.as_mut(),
            &self.crowdsales,
            contract.id.to_hex().as_bytes(),
            contract,
            DiskContext::CrowdSale,
        )
    }

    async fn count_crowdsales(&self) -> Result<usize, LedgerError> {
        trace!("count crowdsales");
        self.count_entries(&self.crowdsales)
    }
}
