use serde::{Deserialize, Serialize};
use strum::{Display, EnumString};

use crate::address::Address;

use super::EntityId;

/// Which contract an account turned out to be, if any.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize, Display, EnumString)]
#[serde(rename_all = "snake_case")]
#[strum(serialize_all = "snake_case")]
pub enum AccountRole {
    CrowdSale,
    VestingVault,
    VestingWallet,
    Erc20,
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Account {
    pub id: Address,
    pub role: Option<AccountRole>,
}

impl Account {
    pub fn new(id: Address) -> Self {
        Self { id, role: None }
    }

    pub fn with_role(id: Address, role: AccountRole) -> Self {
        Self {
            id,
            role: Some(role),
        }
    }
}

impl EntityId for Account {
    fn entity_id(&self) -> String {
        self.id.to_hex()
    }
}
