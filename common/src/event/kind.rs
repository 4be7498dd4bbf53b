use serde::{Deserialize, Serialize};
use strum::IntoStaticStr;

use crate::{address::Address, amount::Amount};

/// Decoded parameters of the contract events the ledger listens to.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize, IntoStaticStr)]
#[serde(tag = "event")]
pub enum EventKind {
    // Crowdsale
    TokensPurchased {
        purchaser: Address,
        beneficiary: Address,
        amount: Amount,
        value: Amount,
    },
    // Vesting vault
    VestingLockedIn {
        beneficiary: Address,
        release_time: Amount,
        token_amount: Amount,
    },
    VestingReleased {
        beneficiary: Address,
        release_time: Amount,
        token_amount: Amount,
    },
    // Vesting wallet
    EtherReleased {
        amount: Amount,
    },
    #[serde(rename = "ERC20Released")]
    #[strum(serialize = "ERC20Released")]
    Erc20Released {
        token: Address,
        amount: Amount,
    },
}

impl EventKind {
    pub fn name(&self) -> &'static str {
        self.into()
    }
}
