use std::{
    sync::atomic::{AtomicU64, Ordering},
    time::Duration,
};

use async_trait::async_trait;
use crowdsale_common::address::Address;
use log::{debug, trace};
use reqwest::Client;
use serde::{Deserialize, Serialize};
use serde_json::{json, Value};
use url::Url;

use super::{ContractCall, ContractReader, ReaderError};
use crate::config::BlockTag;

// Standard JSON-RPC code of a reverted eth_call
const EXECUTION_REVERTED: i64 = 3;

#[derive(Debug, Serialize)]
struct JsonRpcRequest<'a> {
    jsonrpc: &'static str,
    id: u64,
    method: &'a str,
    params: Value,
}

#[derive(Debug, Deserialize)]
struct JsonRpcResponse {
    result: Option<Value>,
    error: Option<JsonRpcError>,
}

#[derive(Debug, Deserialize)]
struct JsonRpcError {
    code: i64,
    message: String,
}

impl JsonRpcError {
    fn is_revert(&self) -> bool {
        self.code == EXECUTION_REVERTED || self.message.to_lowercase().contains("revert")
    }
}

/// Contract reader over an Ethereum node, one `eth_call` per getter.
pub struct RpcContractReader {
    client: Client,
    url: Url,
    block_tag: BlockTag,
    next_id: AtomicU64,
}

impl RpcContractReader {
    pub fn new(url: &str, block_tag: BlockTag, timeout: Duration) -> Result<Self, ReaderError> {
        let url = Url::parse(url).map_err(|e| ReaderError::InvalidResponse(e.to_string()))?;
        let client = Client::builder().timeout(timeout).build()?;
        Ok(Self {
            client,
            url,
            block_tag,
            next_id: AtomicU64::new(1),
        })
    }

    fn block_param(&self, block_number: u64) -> String {
        match self.block_tag {
            BlockTag::Event => format!("0x{:x}", block_number),
            BlockTag::Latest => "latest".to_string(),
        }
    }
}

#[async_trait]
impl ContractReader for RpcContractReader {
    async fn call(
        &self,
        contract: &Address,
        call: ContractCall,
        block_number: u64,
    ) -> Result<Option<Vec<u8>>, ReaderError> {
        let request = JsonRpcRequest {
            jsonrpc: "2.0",
            id: self.next_id.fetch_add(1, Ordering::Relaxed),
            method: "eth_call",
            params: json!([
                {
                    "to": contract.to_hex(),
                    "data": format!("0x{}", hex::encode(call.calldata())),
                },
                self.block_param(block_number),
            ]),
        };

        if log::log_enabled!(log::Level::Trace) {
            trace!("eth_call {} on {} at block {}", call, contract, block_number);
        }

        let response: JsonRpcResponse = self
            .client
            .post(self.url.clone())
            .json(&request)
            .send()
            .await?
            .error_for_status()?
            .json()
            .await?;

        if let Some(error) = response.error {
            if error.is_revert() {
                if log::log_enabled!(log::Level::Debug) {
                    debug!("{} on {} reverted: {}", call, contract, error.message);
                }
                return Ok(None);
            }
            return Err(ReaderError::Rpc {
                code: error.code,
                message: error.message,
            });
        }

        let result = match response.result {
            Some(Value::String(result)) => result,
            other => {
                return Err(ReaderError::InvalidResponse(format!(
                    "expected a hex string result, got {:?}",
                    other
                )))
            }
        };

        let bytes = hex::decode(result.trim_start_matches("0x"))
            .map_err(|e| ReaderError::InvalidResponse(e.to_string()))?;

        // Calls to an address without code succeed with no data
        if bytes.is_empty() {
            return Ok(None);
        }

        Ok(Some(bytes))
    }
}
