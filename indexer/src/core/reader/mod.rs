mod abi;
mod rpc;
mod static_reader;

pub use self::{
    abi::{
        decode_address, decode_string, decode_u8, decode_uint, encode_address, encode_string,
        encode_uint, selector,
    },
    rpc::RpcContractReader,
    static_reader::{ContractState, StaticContractReader},
};

use async_trait::async_trait;
use crowdsale_common::{address::Address, amount::Amount, observed::Observed};
use log::{trace, warn};
use strum::{Display, EnumIter};
use thiserror::Error;

/// Read-only getters the handlers query on live contracts.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Display, EnumIter)]
#[strum(serialize_all = "camelCase")]
pub enum ContractCall {
    Token,
    Wallet,
    TokensAvailable,
    Start,
    Duration,
    Owner,
    Name,
    Symbol,
    Decimals,
}

impl ContractCall {
    pub fn signature(&self) -> &'static str {
        match self {
            Self::Token => "token()",
            Self::Wallet => "wallet()",
            Self::TokensAvailable => "tokensAvailable()",
            Self::Start => "start()",
            Self::Duration => "duration()",
            Self::Owner => "owner()",
            Self::Name => "name()",
            Self::Symbol => "symbol()",
            Self::Decimals => "decimals()",
        }
    }
}

#[derive(Error, Debug)]
pub enum ReaderError {
    #[error(transparent)]
    Transport(#[from] reqwest::Error),
    #[error("RPC error {code}: {message}")]
    Rpc { code: i64, message: String },
    #[error("Invalid RPC response: {0}")]
    InvalidResponse(String),
    #[error(transparent)]
    Io(#[from] std::io::Error),
    #[error(transparent)]
    Json(#[from] serde_json::Error),
}

/// Live contract state at a given block.
///
/// `call` returns `None` when the call reverted. Typed getters turn a revert,
/// or an answer that cannot be decoded, into [`Observed::Unavailable`].
/// Transport failures are errors and abort the event being handled.
#[async_trait]
pub trait ContractReader: Send + Sync {
    async fn call(
        &self,
        contract: &Address,
        call: ContractCall,
        block_number: u64,
    ) -> Result<Option<Vec<u8>>, ReaderError>;

    async fn token(&self, contract: &Address, block: u64) -> Result<Observed<Address>, ReaderError> {
        read(self, contract, ContractCall::Token, block, decode_address).await
    }

    async fn wallet(&self, contract: &Address, block: u64) -> Result<Observed<Address>, ReaderError> {
        read(self, contract, ContractCall::Wallet, block, decode_address).await
    }

    async fn tokens_available(
        &self,
        contract: &Address,
        block: u64,
    ) -> Result<Observed<Amount>, ReaderError> {
        read(self, contract, ContractCall::TokensAvailable, block, decode_uint).await
    }

    async fn start(&self, contract: &Address, block: u64) -> Result<Observed<Amount>, ReaderError> {
        read(self, contract, ContractCall::Start, block, decode_uint).await
    }

    async fn duration(
        &self,
        contract: &Address,
        block: u64,
    ) -> Result<Observed<Amount>, ReaderError> {
        read(self, contract, ContractCall::Duration, block, decode_uint).await
    }

    async fn owner(&self, contract: &Address, block: u64) -> Result<Observed<Address>, ReaderError> {
        read(self, contract, ContractCall::Owner, block, decode_address).await
    }

    async fn name(&self, contract: &Address, block: u64) -> Result<Observed<String>, ReaderError> {
        read(self, contract, ContractCall::Name, block, decode_string).await
    }

    async fn symbol(&self, contract: &Address, block: u64) -> Result<Observed<String>, ReaderError> {
        read(self, contract, ContractCall::Symbol, block, decode_string).await
    }

    async fn decimals(&self, contract: &Address, block: u64) -> Result<Observed<u8>, ReaderError> {
        read(self, contract, ContractCall::Decimals, block, decode_u8).await
    }
}

async fn read<R, T>(
    reader: &R,
    contract: &Address,
    call: ContractCall,
    block: u64,
    decode: fn(&[u8]) -> Option<T>,
) -> Result<Observed<T>, ReaderError>
where
    R: ContractReader + ?Sized,
{
    let Some(bytes) = reader.call(contract, call, block).await? else {
        if log::log_enabled!(log::Level::Trace) {
            trace!("{} on {} reverted at block {}", call, contract, block);
        }
        return Ok(Observed::Unavailable);
    };

    match decode(&bytes) {
        Some(value) => Ok(Observed::Available(value)),
        None => {
            if log::log_enabled!(log::Level::Warn) {
                warn!(
                    "Cannot decode {} answer of {} at block {}: 0x{}",
                    call,
                    contract,
                    block,
                    hex::encode(&bytes)
                );
            }
            Ok(Observed::Unavailable)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_revert_and_garbage_are_unavailable() {
        let contract = Address::new([1; 20]);
        let reader = StaticContractReader::default().with_contract(
            contract,
            ContractState {
                tokens_available: Some(Amount::from(400)),
                ..Default::default()
            },
        );

        assert_eq!(
            reader.tokens_available(&contract, 1).await.unwrap(),
            Observed::Available(Amount::from(400))
        );
        assert_eq!(reader.token(&contract, 1).await.unwrap(), Observed::Unavailable);
        // a 32 bytes word with dirty high bytes is not an address
        assert_eq!(decode_address(&[0xff; 32]), None);
    }

    #[test]
    fn test_call_names() {
        assert_eq!(ContractCall::TokensAvailable.to_string(), "tokensAvailable");
        assert_eq!(ContractCall::TokensAvailable.signature(), "tokensAvailable()");
    }
}
