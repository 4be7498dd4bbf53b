mod account;
mod crowdsale;
mod erc20;
mod transaction;
mod vesting_vault;
mod vesting_wallet;

pub use self::{
    account::{assign_role, fetch_account},
    crowdsale::fetch_crowdsale_contract,
    erc20::fetch_erc20,
    transaction::fetch_transaction,
    vesting_vault::{fetch_vesting, fetch_vesting_vault},
    vesting_wallet::fetch_vesting_wallet,
};

use crowdsale_common::entity::EntityId;
use log::debug;
use serde::Serialize;
use strum::Display;

/// Outcome of a fetch-or-create lookup.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Resolved<T> {
    // Already in the ledger
    Found(T),
    // Initialized by this lookup and persisted
    Created(T),
}

impl<T> Resolved<T> {
    pub fn is_created(&self) -> bool {
        matches!(self, Self::Created(_))
    }

    pub fn get(&self) -> &T {
        match self {
            Self::Found(value) | Self::Created(value) => value,
        }
    }

    pub fn into_inner(self) -> T {
        match self {
            Self::Found(value) | Self::Created(value) => value,
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Display, Serialize)]
#[serde(rename_all = "snake_case")]
#[strum(serialize_all = "snake_case")]
pub enum EntityKind {
    Account,
    CrowdSale,
    VestingVault,
    Vesting,
    VestingWallet,
    Erc20,
    Transaction,
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct CreatedEntity {
    pub kind: EntityKind,
    pub id: String,
}

// Entities initialized while handling one event, in creation order
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize)]
pub struct Creations(Vec<CreatedEntity>);

impl Creations {
    pub fn track<T: EntityId>(&mut self, kind: EntityKind, resolved: &Resolved<T>) {
        if resolved.is_created() {
            let id = resolved.get().entity_id();
            if log::log_enabled!(log::Level::Debug) {
                debug!("Created {} {}", kind, id);
            }
            self.0.push(CreatedEntity { kind, id });
        }
    }

    pub fn contains(&self, kind: EntityKind, id: &str) -> bool {
        self.0.iter().any(|e| e.kind == kind && e.id == id)
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &CreatedEntity> {
        self.0.iter()
    }
}
