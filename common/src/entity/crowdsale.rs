use serde::{Deserialize, Serialize};

use crate::{address::Address, amount::Amount, observed::Observed};

use super::EntityId;

/// Running totals of a crowdsale contract.
///
/// `initial_supply` is fixed at creation. `tokens_available` only goes down and
/// `funds_raised` only goes up, both in the same update for a given purchase.
/// A purchase above `tokens_available` turns it `Unavailable` for good.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct CrowdSaleContract {
    pub id: Address,
    pub token: Observed<Address>,
    pub wallet: Observed<Address>,
    pub initial_supply: Observed<Amount>,
    pub tokens_available: Observed<Amount>,
    pub funds_raised: Amount,
}

impl CrowdSaleContract {
    /// Build the record from the live reads taken while handling the first
    /// purchase. The purchase already executed on-chain so its token amount is
    /// added back to get the balance as it was before.
    pub fn from_first_sight(
        id: Address,
        token: Observed<Address>,
        wallet: Observed<Address>,
        tokens_available_now: Observed<Amount>,
        token_amount_just_purchased: Amount,
    ) -> Option<Self> {
        let supply = tokens_available_now
            .try_map(|available| {
                available
                    .checked_add(token_amount_just_purchased)
                    .ok_or(())
            })
            .ok()?;

        Some(Self {
            id,
            token,
            wallet,
            initial_supply: supply,
            tokens_available: supply,
            funds_raised: Amount::zero(),
        })
    }
}

impl EntityId for CrowdSaleContract {
    fn entity_id(&self) -> String {
        self.id.to_hex()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_first_sight_restores_pre_purchase_supply() {
        let contract = CrowdSaleContract::from_first_sight(
            Address::new([1; 20]),
            Observed::Unavailable,
            Observed::Unavailable,
            Observed::Available(Amount::from(400)),
            Amount::from(100),
        )
        .unwrap();
        assert_eq!(contract.initial_supply, Observed::Available(Amount::from(500)));
        assert_eq!(contract.tokens_available, Observed::Available(Amount::from(500)));
        assert!(contract.funds_raised.is_zero());
    }

    #[test]
    fn test_first_sight_without_supply() {
        let contract = CrowdSaleContract::from_first_sight(
            Address::new([1; 20]),
            Observed::Available(Address::new([2; 20])),
            Observed::Unavailable,
            Observed::Unavailable,
            Amount::from(100),
        )
        .unwrap();
        assert!(contract.initial_supply.is_unavailable());
        assert!(contract.tokens_available.is_unavailable());
    }
}
