use serde::{Deserialize, Serialize};

use crate::address::TxHash;

use super::EntityId;

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Transaction {
    pub id: TxHash,
    pub block_number: u64,
    pub timestamp: u64,
}

impl EntityId for Transaction {
    fn entity_id(&self) -> String {
        self.id.to_hex()
    }
}
