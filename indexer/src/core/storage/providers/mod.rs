mod account;
mod crowdsale;
mod cursor;
mod erc20;
mod event;
mod snapshot;
mod transaction;
mod vesting;
mod vesting_wallet;

pub use account::*;
pub use crowdsale::*;
pub use cursor::*;
pub use erc20::*;
pub use event::*;
pub use snapshot::*;
pub use transaction::*;
pub use vesting::*;
pub use vesting_wallet::*;
