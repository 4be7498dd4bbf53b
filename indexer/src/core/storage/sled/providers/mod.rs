mod account;
mod crowdsale;
mod cursor;
mod erc20;
mod event;
mod snapshot;
mod transaction;
mod vesting;
mod vesting_wallet;
