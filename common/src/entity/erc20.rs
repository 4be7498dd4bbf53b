use serde::{Deserialize, Serialize};

use crate::{address::Address, observed::Observed};

use super::EntityId;

/// Token metadata, read once on first reference.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Erc20Contract {
    pub id: Address,
    pub name: Observed<String>,
    pub symbol: Observed<String>,
    pub decimals: Observed<u8>,
}

impl EntityId for Erc20Contract {
    fn entity_id(&self) -> String {
        self.id.to_hex()
    }
}
