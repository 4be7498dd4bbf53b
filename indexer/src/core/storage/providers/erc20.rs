use async_trait::async_trait;
use crowdsale_common::{address::Address, entity::Erc20Contract};

use crate::core::error::LedgerError;

#[async_trait]
pub trait Erc20Provider: Send + Sync {
    async fn get_erc20(&self, address: &Address) -> Result<Option<Erc20Contract>, LedgerError>;

    async fn set_erc20(&mut self, token: &Erc20Contract) -> Result<(), LedgerError>;

    async fn count_erc20s(&self) -> Result<usize, LedgerError>;
}
