use async_trait::async_trait;
use crowdsale_common::{address::Address, entity::VestingWalletContract};
use log::trace;

use crate::core::{
    error::{DiskContext, LedgerError},
    storage::{SledStorage, VestingWalletProvider},
};

#[async_trait]
impl VestingWalletProvider for SledStorage {
    async fn get_vesting_wallet(
        &self,
        address: &Address,
    ) -> Result<Option<VestingWalletContract>, LedgerError> {
        if log::log_enabled!(log::Level::Trace) {
            trace!("get vesting wallet {}", address);
        }
        self.load_optional_from_disk(
            &self.vesting_wallets,
            address.to_hex().as_bytes(),
            DiskContext::VestingWallet,
        )
    }

    async fn set_vesting_wallet(
        &mut self,
        wallet: &VestingWalletContract,
    ) -> Result<(), LedgerError> {
        if log::log_enabled!(log::Level::Trace) {
            trace!(
                "set vesting wallet {} ether released {} erc20 released {}",
                wallet.id,
                wallet.ether_released,
                wallet.erc20_released
            );
        }
        Self::insert_into_disk(
            self.snapshot.as_mut(),
            &self.vesting_wallets,
            wallet.id.to_hex().as_bytes(),
            wallet,
            DiskContext::VestingWallet,
        )
    }

    async fn count_vesting_wallets(&self) -> Result<usize, LedgerError> {
        trace!("count vesting wallets");
        self.count_entries(&self.vesting_wallets)
    }
}
