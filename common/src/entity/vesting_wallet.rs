use serde::{Deserialize, Serialize};

use crate::{address::Address, amount::Amount, observed::Observed};

use super::EntityId;

/// Release counters of a vesting wallet, one per asset class.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct VestingWalletContract {
    pub id: Address,
    pub beneficiary: Observed<Address>,
    pub start: Observed<Amount>,
    pub duration: Observed<Amount>,
    pub erc20_released: Amount,
    pub ether_released: Amount,
}

impl VestingWalletContract {
    pub fn new(
        id: Address,
        beneficiary: Observed<Address>,
        start: Observed<Amount>,
        duration: Observed<Amount>,
    ) -> Self {
        Self {
            id,
            beneficiary,
            start,
            duration,
            erc20_released: Amount::zero(),
            ether_released: Amount::zero(),
        }
    }
}

impl EntityId for VestingWalletContract {
    fn entity_id(&self) -> String {
        self.id.to_hex()
    }
}
