use alloy::primitives::{Address, Bytes, B256, U256, U64};
use jsonrpsee::{
    core::{client::ClientT, params::ArrayParams},
    http_client::{HttpClient, HttpClientBuilder},
};
use serde::de::DeserializeOwned;
use serde_json::{json, Value};
use std::time::Duration;
use tracing::debug;

use crate::{
    constant::methods::{
        ETH_BLOCK_NUMBER, ETH_CHAIN_ID, ETH_GET_BALANCE, ETH_GET_TRANSACTION_COUNT,
        ETH_GET_TRANSACTION_RECEIPT, ETH_SEND_RAW_TRANSACTION,
    },
    error::{from_client_error, HarnessError},
    rpc::types::{BlockTag, TransactionReceipt},
    sanitize_error,
};

/// One logical JSON-RPC connection to the node under test. Calls are never
/// retried; every failure is returned to the caller as is.
pub struct RpcProbe {
    client: HttpClient,
    url: String,
}

impl RpcProbe {
    pub fn new(url: &str, request_timeout: Duration) -> Result<Self, HarnessError> {
        let client = HttpClientBuilder::default()
            .request_timeout(request_timeout)
            .build(url)
            .map_err(|e| {
                HarnessError::RpcError(format!("Failed to create HTTP client: {}", sanitize_error!(e)))
            })?;

        Ok(Self { client, url: url.to_string() })
    }

    pub fn url(&self) -> &str {
        &self.url
    }

    /// Issues `method` with positional `params` and decodes the result.
    pub async fn call<T>(&self, method: &str, params: Vec<Value>) -> Result<T, HarnessError>
    where
        T: DeserializeOwned,
    {
        let mut rpc_params = ArrayParams::new();
        for param in params {
            rpc_params.insert(param)?;
        }

        debug!(method, "rpc call");
        self.client.request(method, rpc_params).await.map_err(|e| from_client_error(method, e))
    }

    pub async fn call_raw(&self, method: &str, params: Vec<Value>) -> Result<Value, HarnessError> {
        self.call(method, params).await
    }

    pub async fn get_balance(&self, address: Address, tag: BlockTag) -> Result<U256, HarnessError> {
        let balance: U256 = self.call(ETH_GET_BALANCE, vec![json!(address), json!(tag)]).await?;
        debug!(%address, %tag, %balance, "balance");
        Ok(balance)
    }

    pub async fn send_raw_transaction(&self, raw: &Bytes) -> Result<B256, HarnessError> {
        self.call(ETH_SEND_RAW_TRANSACTION, vec![json!(raw)]).await
    }

    pub async fn chain_id(&self) -> Result<u64, HarnessError> {
        let chain_id: U64 = self.call(ETH_CHAIN_ID, vec![]).await?;
        Ok(chain_id.to())
    }

    pub async fn transaction_count(
        &self,
        address: Address,
        tag: BlockTag,
    ) -> Result<u64, HarnessError> {
        let count: U64 =
            self.call(ETH_GET_TRANSACTION_COUNT, vec![json!(address), json!(tag)]).await?;
        Ok(count.to())
    }

    pub async fn block_number(&self) -> Result<u64, HarnessError> {
        let number: U64 = self.call(ETH_BLOCK_NUMBER, vec![]).await?;
        Ok(number.to())
    }

    /// `None` while the transaction is unknown or not yet sealed.
    pub async fn transaction_receipt(
        &self,
        hash: B256,
    ) -> Result<Option<TransactionReceipt>, HarnessError> {
        self.call(ETH_GET_TRANSACTION_RECEIPT, vec![json!(hash)]).await
    }
}
