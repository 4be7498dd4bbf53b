use async_trait::async_trait;
use crowdsale_common::{address::Address, entity::Erc20Contract};
use log::trace;

use crate::core::{
    error::{DiskContext, LedgerError},
    storage::{Erc20Provider, SledStorage},
};

#[async_trait]
impl Erc20Provider for SledStorage {
    async fn get_erc20(&self, address: &Address) -> Result<Option<Erc20Contract>, LedgerError> {
        if log::log_enabled!(log::Level::Trace) {
            trace!("get erc20 {}", address);
        }
        self.load_optional_from_disk(&self.erc20s, address.to_hex().as_bytes(), DiskContext::Erc20)
    }

    async fn set_erc20(&mut self, token: &Erc20Contract) -> Result<(), LedgerError> {
        if log::log_enabled!(log::Level::Trace) {
            trace!("set erc20 {}", token.id);
        }
        Self::insert_into_disk(
            self.snapshot.as_mut(),
            &self.erc20s,
            token.id.to_hex().as_bytes(),
            token,
            DiskContext::Erc20,
        )
    }

    async fn count_erc20s(&self) -> Result<usize, LedgerError> {
        trace!("count erc20s");
        self.count_entries(&self.erc20s)
    }
}
