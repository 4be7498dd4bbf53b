use async_trait::async_trait;
use crowdsale_common::{address::Address, entity::CrowdSaleContract};

use crate::core::error::LedgerError;

#[async_trait]
pub trait CrowdSaleProvider: Send + Sync {
    async fn get_crowdsale(
        &self,
        address: &Address,
    ) -> Result<Option<CrowdSaleContract>, LedgerError>;

    async fn set_crowdsale(&mut self, contract: &CrowdSaleContract) -> Result<(), LedgerError>;

    async fn count_crowdsales(&self) -> Result<usize, LedgerError>;
}
