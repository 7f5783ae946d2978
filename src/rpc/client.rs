//! Plain JSON-RPC 2.0 client for a Solana node.

use std::time::Duration;

use anyhow::{Context, Result};
use async_trait::async_trait;
use log::{debug, info};
use rand::Rng;
use reqwest::Client;
use serde::de::DeserializeOwned;
use serde_json::{json, Value};
use thiserror::Error;

use crate::rpc::types::{AccountInfo, RpcResponse, TokenAccountBalance, TokenAmount};
use crate::rpc::ChainQuery;

#[derive(Debug, Error)]
pub enum RpcError {
    #[error("RPC error {method}: {message}")]
    Remote { method: String, message: String },
    #[error("RPC {method} HTTP {status}: {body}")]
    Http {
        method: String,
        status: u16,
        body: String,
    },
    #[error("RPC {method} request failed: {source}")]
    Transport {
        method: String,
        #[source]
        source: reqwest::Error,
    },
    #[error("RPC {method} returned an unexpected shape: {source}")]
    Decode {
        method: String,
        #[source]
        source: serde_json::Error,
    },
}

#[derive(Clone)]
pub struct SolanaRpc {
    url: String,
    client: Client,
}

impl SolanaRpc {
    pub fn new(url: String, timeout: Duration) -> Result<Self> {
        info!("🔗 [RPC] Chain client initialized: {}", url);
        let client = Client::builder()
            .timeout(timeout)
            .build()
            .context("building RPC http client")?;
        Ok(Self { url, client })
    }

    /// Send one request; an `error` envelope in the reply becomes [`RpcError::Remote`].
    pub async fn call(&self, method: &str, params: Value) -> Result<Value, RpcError> {
        let id: u32 = rand::thread_rng().gen_range(0..1_000_000);
        let body = json!({
            "jsonrpc": "2.0",
            "id": id,
            "method": method,
            "params": params,
        });

        let res = self
            .client
            .post(&self.url)
            .json(&body)
            .send()
            .await
            .map_err(|source| RpcError::Transport {
                method: method.to_string(),
                source,
            })?;

        let status = res.status();
        if !status.is_success() {
            let body = res.text().await.unwrap_or_default();
            return Err(RpcError::Http {
                method: method.to_string(),
                status: status.as_u16(),
                body,
            });
        }

        let resp: Value = res.json().await.map_err(|source| RpcError::Transport {
            method: method.to_string(),
            source,
        })?;

        let result = parse_envelope(method, resp)?;
        debug!("📨 [RPC] {} ok", method);
        Ok(result)
    }

    async fn call_typed<T: DeserializeOwned>(&self, method: &str, params: Value) -> Result<T, RpcError> {
        let result = self.call(method, params).await?;
        decode_result(method, result)
    }
}

/// `result` of a JSON-RPC reply, or [`RpcError::Remote`] when a non-null
/// `error` is present.
pub fn parse_envelope(method: &str, mut resp: Value) -> Result<Value, RpcError> {
    if let Some(err) = resp.get("error").filter(|e| !e.is_null()) {
        let message = err
            .get("message")
            .and_then(Value::as_str)
            .map(str::to_string)
            .unwrap_or_else(|| err.to_string());
        return Err(RpcError::Remote {
            method: method.to_string(),
            message,
        });
    }
    Ok(resp.get_mut("result").map(Value::take).unwrap_or(Value::Null))
}

fn decode_result<T: DeserializeOwned>(method: &str, result: Value) -> Result<T, RpcError> {
    serde_json::from_value(result).map_err(|source| RpcError::Decode {
        method: method.to_string(),
        source,
    })
}

/// `getTokenSupply` value; a null value reads as an empty amount.
fn supply_from_result(result: Value) -> Result<TokenAmount, RpcError> {
    let resp: RpcResponse<Option<TokenAmount>> = decode_result("getTokenSupply", result)?;
    Ok(resp.value.unwrap_or_default())
}

#[async_trait]
impl ChainQuery for SolanaRpc {
    async fn token_largest_accounts(&self, mint: &str) -> Result<Vec<TokenAccountBalance>, RpcError> {
        let resp: RpcResponse<Vec<TokenAccountBalance>> = self
            .call_typed(
                "getTokenLargestAccounts",
                json!([mint, { "commitment": "finalized" }]),
            )
            .await?;
        Ok(resp.value)
    }

    async fn token_supply(&self, mint: &str) -> Result<TokenAmount, RpcError> {
        let result = self.call("getTokenSupply", json!([mint])).await?;
        supply_from_result(result)
    }

    async fn multiple_accounts(&self, addresses: &[String]) -> Result<Vec<Option<AccountInfo>>, RpcError> {
        let resp: RpcResponse<Vec<Option<AccountInfo>>> = self
            .call_typed(
                "getMultipleAccounts",
                json!([addresses, { "commitment": "confirmed", "encoding": "base64" }]),
            )
            .await?;
        Ok(resp.value)
    }
}
