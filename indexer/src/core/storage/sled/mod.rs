mod providers;
mod snapshot;

pub use snapshot::Snapshot;

use async_trait::async_trait;
use crowdsale_common::event::EventRecordKind;
use log::{debug, info, trace};
use serde::{de::DeserializeOwned, Serialize};
use sled::{Db, IVec, Tree};

use crate::{
    config::{
        ACCOUNTS_TREE, CROWDSALES_TREE, ERC20_RELEASES_TREE, ERC20S_TREE, ETHER_RELEASES_TREE,
        EXTRA_TREE, TOKEN_PURCHASES_TREE, TRANSACTIONS_TREE, VESTINGS_TREE, VESTING_LOCKS_TREE,
        VESTING_RELEASES_TREE, VESTING_VAULTS_TREE, VESTING_WALLETS_TREE,
    },
    core::{
        error::{DiskContext, LedgerError},
        storage::Storage,
    },
};

// Key of the event cursor in the extra tree
pub(crate) const CURSOR: &[u8; 6] = b"CURSOR";

pub struct SledStorage {
    db: Db,
    accounts: Tree,
    crowdsales: Tree,
    vesting_vaults: Tree,
    vestings: Tree,
    vesting_wallets: Tree,
    erc20s: Tree,
    transactions: Tree,
    token_purchases: Tree,
    vesting_locks: Tree,
    vesting_releases: Tree,
    ether_releases: Tree,
    erc20_releases: Tree,
    // cursor and other single values
    extra: Tree,
    snapshot: Option<Snapshot>,
}

impl SledStorage {
    pub fn new(dir_path: &str, cache_capacity: Option<u64>) -> Result<Self, LedgerError> {
        info!("Opening ledger storage at {}", dir_path);
        let mut config = sled::Config::new().path(dir_path);
        if let Some(capacity) = cache_capacity {
            config = config.cache_capacity(capacity);
        }
        Self::open(config)
    }

    // In-memory database removed on drop
    pub fn temporary() -> Result<Self, LedgerError> {
        Self::open(sled::Config::new().temporary(true))
    }

    fn open(config: sled::Config) -> Result<Self, LedgerError> {
        let db = config.open()?;
        let storage = Self {
            accounts: db.open_tree(ACCOUNTS_TREE)?,
            crowdsales: db.open_tree(CROWDSALES_TREE)?,
            vesting_vaults: db.open_tree(VESTING_VAULTS_TREE)?,
            vestings: db.open_tree(VESTINGS_TREE)?,
            vesting_wallets: db.open_tree(VESTING_WALLETS_TREE)?,
            erc20s: db.open_tree(ERC20S_TREE)?,
            transactions: db.open_tree(TRANSACTIONS_TREE)?,
            token_purchases: db.open_tree(TOKEN_PURCHASES_TREE)?,
            vesting_locks: db.open_tree(VESTING_LOCKS_TREE)?,
            vesting_releases: db.open_tree(VESTING_RELEASES_TREE)?,
            ether_releases: db.open_tree(ETHER_RELEASES_TREE)?,
            erc20_releases: db.open_tree(ERC20_RELEASES_TREE)?,
            extra: db.open_tree(EXTRA_TREE)?,
            db,
            snapshot: None,
        };

        if log::log_enabled!(log::Level::Debug) {
            debug!(
                "Ledger storage opened, {} accounts known",
                storage.accounts.len()
            );
        }

        Ok(storage)
    }

    fn event_tree(&self, kind: EventRecordKind) -> &Tree {
        match kind {
            EventRecordKind::TokenPurchase => &self.token_purchases,
            EventRecordKind::VestingLockedIn => &self.vesting_locks,
            EventRecordKind::VestingReleased => &self.vesting_releases,
            EventRecordKind::EtherReleased => &self.ether_releases,
            EventRecordKind::Erc20Released => &self.erc20_releases,
        }
    }

    fn decode<T: DeserializeOwned>(bytes: &[u8], context: DiskContext) -> Result<T, LedgerError> {
        bincode::deserialize(bytes).map_err(|error| LedgerError::Decode { context, error })
    }

    fn encode<T: Serialize>(value: &T, context: DiskContext) -> Result<Vec<u8>, LedgerError> {
        bincode::serialize(value).map_err(|error| LedgerError::Encode { context, error })
    }

    // Read the pending snapshot value first, then the disk
    fn load_optional_from_disk<T: DeserializeOwned>(
        &self,
        tree: &Tree,
        key: &[u8],
        context: DiskContext,
    ) -> Result<Option<T>, LedgerError> {
        if let Some(snapshot) = self.snapshot.as_ref() {
            if let Some(bytes) = snapshot.get(&tree.name(), key) {
                return Self::decode(bytes, context).map(Some);
            }
        }

        match tree.get(key)? {
            Some(bytes) => Self::decode(&bytes, context).map(Some),
            None => Ok(None),
        }
    }

    fn contains_data(&self, tree: &Tree, key: &[u8]) -> Result<bool, LedgerError> {
        if let Some(snapshot) = self.snapshot.as_ref() {
            if snapshot.get(&tree.name(), key).is_some() {
                return Ok(true);
            }
        }
        Ok(tree.contains_key(key)?)
    }

    // Goes into the snapshot when one is running, straight to the tree otherwise
    fn insert_into_disk<T: Serialize>(
        snapshot: Option<&mut Snapshot>,
        tree: &Tree,
        key: &[u8],
        value: &T,
        context: DiskContext,
    ) -> Result<(), LedgerError> {
        let bytes = Self::encode(value, context)?;
        match snapshot {
            Some(snapshot) => {
                snapshot.put(tree.name(), IVec::from(key), IVec::from(bytes));
            }
            None => {
                tree.insert(key, bytes)?;
            }
        };
        Ok(())
    }

    fn count_entries(&self, tree: &Tree) -> Result<usize, LedgerError> {
        let pending = match self.snapshot.as_ref() {
            Some(snapshot) => snapshot.count_new(&tree.name(), |key| tree.contains_key(key))?,
            None => 0,
        };
        Ok(tree.len() + pending)
    }

    // Committed values only, ordered by key
    fn list_values<T: DeserializeOwned>(
        &self,
        tree: &Tree,
        prefix: Option<&[u8]>,
        skip: usize,
        limit: usize,
        context: DiskContext,
    ) -> Result<Vec<T>, LedgerError> {
        let iter = match prefix {
            Some(prefix) => tree.scan_prefix(prefix),
            None => tree.iter(),
        };

        let mut out = Vec::new();
        for item in iter.skip(skip).take(limit) {
            let (_, value) = item?;
            out.push(Self::decode(&value, context)?);
        }
        Ok(out)
    }

    fn apply_snapshot(&self, snapshot: Snapshot) -> Result<(), LedgerError> {
        if snapshot.is_empty() {
            trace!("Nothing to apply from snapshot");
            return Ok(());
        }

        let mut trees = Vec::with_capacity(snapshot.trees.len());
        let mut batches = Vec::with_capacity(snapshot.trees.len());
        for (name, changes) in snapshot.trees {
            if log::log_enabled!(log::Level::Trace) {
                trace!(
                    "Applying {} changes to tree {}",
                    changes.len(),
                    String::from_utf8_lossy(&name)
                );
            }
            let mut batch = sled::Batch::default();
            for (key, value) in changes {
                batch.insert(key, value);
            }
            trees.push(self.db.open_tree(name)?);
            batches.push(batch);
        }

        // All trees are written in one transaction so an event is never half applied
        use sled::transaction::{TransactionError, Transactional};
        trees
            .as_slice()
            .transaction(|views| {
                for (view, batch) in views.iter().zip(batches.iter()) {
                    view.apply_batch(batch)?;
                }
                Ok::<(), sled::transaction::ConflictableTransactionError<()>>(())
            })
            .map_err(|e| match e {
                TransactionError::Storage(e) => LedgerError::Database(e),
                TransactionError::Abort(()) => {
                    LedgerError::Any(anyhow::anyhow!("Snapshot transaction aborted"))
                }
            })
    }
}

#[async_trait]
impl Storage for SledStorage {
    async fn flush(&mut self) -> Result<(), LedgerError> {
        trace!("flush ledger storage");
        let bytes = self.db.flush_async().await?;
        if log::log_enabled!(log::Level::Debug) {
            debug!("Flushed {} bytes to disk", bytes);
        }
        Ok(())
    }
}
