mod providers;

pub mod sled;

pub use self::{providers::*, sled::SledStorage};

use async_trait::async_trait;
use crowdsale_common::event::EventRecordKind;
use log::trace;
use serde::Serialize;
use strum::IntoEnumIterator;

use crate::core::error::LedgerError;

/// Ledger store: sole owner of every entity and event record.
#[async_trait]
pub trait Storage:
    AccountProvider
    + CrowdSaleProvider
    + VestingVaultProvider
    + VestingProvider
    + VestingWalletProvider
    + Erc20Provider
    + TransactionProvider
    + EventRecordProvider
    + CursorProvider
    + SnapshotProvider
    + Sync
    + Send
    + 'static
{
    // Make sure everything applied so far is durable
    async fn flush(&mut self) -> Result<(), LedgerError>;

    async fn get_stats(&self) -> Result<StorageStats, LedgerError> {
        trace!("get storage stats");
        let mut events = Vec::new();
        for kind in EventRecordKind::iter() {
            events.push((kind.to_string(), self.count_event_records(kind).await?));
        }

        Ok(StorageStats {
            cursor: self.get_cursor().await?.map(|id| id.to_string()),
            accounts: self.count_accounts().await?,
            crowdsales: self.count_crowdsales().await?,
            vesting_vaults: self.count_vesting_vaults().await?,
            vestings: self.count_vestings().await?,
            vesting_wallets: self.count_vesting_wallets().await?,
            erc20s: self.count_erc20s().await?,
            transactions: self.count_transactions().await?,
            events,
        })
    }
}

#[derive(Debug, Clone, Serialize)]
pub struct StorageStats {
    pub cursor: Option<String>,
    pub accounts: usize,
    pub crowdsales: usize,
    pub vesting_vaults: usize,
    pub vestings: usize,
    pub vesting_wallets: usize,
    pub erc20s: usize,
    pub transactions: usize,
    pub events: Vec<(String, usize)>,
}
