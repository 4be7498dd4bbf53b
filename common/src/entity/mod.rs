//! Derived records maintained off-chain from contract events.
//!
//! Every entity is stored under a stable string id built from one or more
//! addresses (see [`EntityId`]).

mod account;
mod crowdsale;
mod erc20;
mod transaction;
mod vesting;
mod vesting_wallet;

pub use account::*;
pub use crowdsale::*;
pub use erc20::*;
pub use transaction::*;
pub use vesting::*;
pub use vesting_wallet::*;

/// Stable storage identifier of a record.
pub trait EntityId {
    fn entity_id(&self) -> String;
}
