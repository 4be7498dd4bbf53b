use async_trait::async_trait;
use crowdsale_common::{address::Address, entity::VestingWalletContract};

use crate::core::error::LedgerError;

#[async_trait]
pub trait VestingWalletProvider: Send + Sync {
    async fn get_vesting_wallet(
        &self,
        address: &Address,
    ) -> Result<Option<VestingWalletContract>, LedgerError>;

    async fn set_vesting_wallet(
        &mut self,
        wallet: &VestingWalletContract,
    ) -> Result<(), LedgerError>;

    async fn count_vesting_wallets(&self) -> Result<usize, LedgerError>;
}
