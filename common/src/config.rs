pub const VERSION: &str = env!("CARGO_PKG_VERSION");

// Separator between vault, beneficiary and release time in a vesting id
pub const VESTING_ID_SEPARATOR: &str = "/";

// Separator between block number and log index in an event id
pub const EVENT_ID_SEPARATOR: &str = "-";
