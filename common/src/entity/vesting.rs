use serde::{Deserialize, Serialize};

use crate::{address::Address, amount::Amount, config::VESTING_ID_SEPARATOR, observed::Observed};

use super::EntityId;

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct VestingVaultContract {
    pub id: Address,
    pub token: Observed<Address>,
}

impl EntityId for VestingVaultContract {
    fn entity_id(&self) -> String {
        self.id.to_hex()
    }
}

/// Tokens locked in a vault for one beneficiary until one release time.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Vesting {
    pub contract: Address,
    pub beneficiary: Address,
    pub release_time: Amount,
    pub token_amount: Amount,
}

impl Vesting {
    pub fn new(contract: Address, beneficiary: Address, release_time: Amount) -> Self {
        Self {
            contract,
            beneficiary,
            release_time,
            token_amount: Amount::zero(),
        }
    }

    // vault/beneficiary/releaseTime
    pub fn id_for(contract: &Address, beneficiary: &Address, release_time: &Amount) -> String {
        [
            contract.to_hex(),
            beneficiary.to_hex(),
            release_time.to_string(),
        ]
        .join(VESTING_ID_SEPARATOR)
    }
}

impl EntityId for Vesting {
    fn entity_id(&self) -> String {
        Self::id_for(&self.contract, &self.beneficiary, &self.release_time)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_vesting_id() {
        let vesting = Vesting::new(
            Address::new([0xab; 20]),
            Address::new([0xcc; 20]),
            Amount::from(1000),
        );
        assert_eq!(
            vesting.entity_id(),
            format!("0x{}/0x{}/1000", "ab".repeat(20), "cc".repeat(20))
        );
        assert!(vesting.token_amount.is_zero());
    }
}
