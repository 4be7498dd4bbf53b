use std::{
    collections::HashMap,
    path::Path,
    sync::atomic::{AtomicBool, AtomicUsize, Ordering},
};

use async_trait::async_trait;
use crowdsale_common::{address::Address, amount::Amount};
use log::info;
use serde::{Deserialize, Serialize};

use super::{encode_address, encode_string, encode_uint, ContractCall, ContractReader, ReaderError};

/// Fixed getter answers of one contract, a missing value reverts.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ContractState {
    pub token: Option<Address>,
    pub wallet: Option<Address>,
    pub tokens_available: Option<Amount>,
    pub start: Option<Amount>,
    pub duration: Option<Amount>,
    pub owner: Option<Address>,
    pub name: Option<String>,
    pub symbol: Option<String>,
    pub decimals: Option<u8>,
}

impl ContractState {
    fn answer(&self, call: ContractCall) -> Option<Vec<u8>> {
        match call {
            ContractCall::Token => self.token.as_ref().map(encode_address),
            ContractCall::Wallet => self.wallet.as_ref().map(encode_address),
            ContractCall::TokensAvailable => self.tokens_available.map(encode_uint),
            ContractCall::Start => self.start.map(encode_uint),
            ContractCall::Duration => self.duration.map(encode_uint),
            ContractCall::Owner => self.owner.as_ref().map(encode_address),
            ContractCall::Name => self.name.as_deref().map(encode_string),
            ContractCall::Symbol => self.symbol.as_deref().map(encode_string),
            ContractCall::Decimals => self.decimals.map(|d| encode_uint(Amount::from(d as u64))),
        }
    }
}

/// Contract reader answering from memory, for offline replays and tests.
///
/// Answers do not depend on the block number.
#[derive(Debug, Default)]
pub struct StaticContractReader {
    contracts: HashMap<Address, ContractState>,
    calls: AtomicUsize,
    unreachable: AtomicBool,
}

impl StaticContractReader {
    // JSON object of contract address to getter answers
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self, ReaderError> {
        let content = std::fs::read_to_string(&path)?;
        let contracts: HashMap<Address, ContractState> = serde_json::from_str(&content)?;
        if log::log_enabled!(log::Level::Info) {
            info!(
                "Loaded state of {} contracts from {}",
                contracts.len(),
                path.as_ref().display()
            );
        }
        Ok(Self {
            contracts,
            ..Default::default()
        })
    }

    pub fn with_contract(mut self, address: Address, state: ContractState) -> Self {
        self.contracts.insert(address, state);
        self
    }

    pub fn set_contract(&mut self, address: Address, state: ContractState) {
        self.contracts.insert(address, state);
    }

    /// Answer every call with an RPC error, as a node that went away would.
    pub fn set_unreachable(&self, unreachable: bool) {
        self.unreachable.store(unreachable, Ordering::Relaxed);
    }

    // Number of getter calls served so far, reverts included
    pub fn call_count(&self) -> usize {
        self.calls.load(Ordering::Relaxed)
    }
}

#[async_trait]
impl ContractReader for StaticContractReader {
    async fn call(
        &self,
        contract: &Address,
        call: ContractCall,
        _: u64,
    ) -> Result<Option<Vec<u8>>, ReaderError> {
        self.calls.fetch_add(1, Ordering::Relaxed);
        if self.unreachable.load(Ordering::Relaxed) {
            return Err(ReaderError::Rpc {
                code: -32000,
                message: format!("{} is unreachable", contract),
            });
        }
        Ok(self
            .contracts
            .get(contract)
            .and_then(|state| state.answer(call)))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crowdsale_common::observed::Observed;

    #[tokio::test]
    async fn test_from_file() {
        let dir = tempdir::TempDir::new("contracts").unwrap();
        let path = dir.path().join("state.json");
        std::fs::write(
            &path,
            r#"{
                "0x00000000000000000000000000000000000000C5": {
                    "token": "0x00000000000000000000000000000000000000ee",
                    "tokens_available": "400"
                },
                "0x00000000000000000000000000000000000000ee": {
                    "name": "Crowd",
                    "symbol": "CRD",
                    "decimals": 18
                }
            }"#,
        )
        .unwrap();

        let reader = StaticContractReader::from_file(&path).unwrap();
        let sale: Address = "0x00000000000000000000000000000000000000c5".parse().unwrap();
        let token: Address = "0x00000000000000000000000000000000000000ee".parse().unwrap();

        assert_eq!(reader.token(&sale, 1).await.unwrap(), Observed::Available(token));
        assert_eq!(reader.wallet(&sale, 1).await.unwrap(), Observed::Unavailable);
        assert_eq!(
            reader.tokens_available(&sale, 1).await.unwrap(),
            Observed::Available(Amount::from(400))
        );
        assert_eq!(
            reader.symbol(&token, 1).await.unwrap(),
            Observed::Available("CRD".to_string())
        );
        assert_eq!(reader.decimals(&token, 1).await.unwrap(), Observed::Available(18));
        assert_eq!(reader.call_count(), 5);
    }

    #[tokio::test]
    async fn test_unreachable_is_an_error() {
        let token = Address::new([0xee; 20]);
        let reader = StaticContractReader::default().with_contract(
            token,
            ContractState {
                decimals: Some(6),
                ..Default::default()
            },
        );

        reader.set_unreachable(true);
        assert!(matches!(
            reader.decimals(&token, 1).await,
            Err(ReaderError::Rpc { code: -32000, .. })
        ));

        reader.set_unreachable(false);
        assert_eq!(reader.decimals(&token, 1).await.unwrap(), Observed::Available(6));
    }
}
