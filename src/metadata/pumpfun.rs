//! Pump.fun frontend API: primary metadata source.

use std::time::Duration;

use anyhow::{anyhow, Context, Result};
use async_trait::async_trait;
use reqwest::Client;
use serde_json::{json, Value};

use crate::metadata::{MetadataSource, TokenMetadata, UNKNOWN};
use crate::utils::json::{first_str, non_null};

pub const DEFAULT_URL: &str = "https://frontend-api-v3.pump.fun/coins/mints";

#[derive(Clone)]
pub struct PumpFun {
    url: String,
    client: Client,
}

impl PumpFun {
    pub fn new(url: String, timeout: Duration) -> Result<Self> {
        let client = Client::builder()
            .timeout(timeout)
            .build()
            .context("building pump.fun http client")?;
        Ok(Self { url, client })
    }
}

#[async_trait]
impl MetadataSource for PumpFun {
    fn label(&self) -> &'static str {
        "Pump.fun"
    }

    async fn fetch(&self, mint: &str) -> Result<TokenMetadata> {
        let res = self
            .client
            .post(&self.url)
            .json(&json!({ "mints": [mint] }))
            .send()
            .await?;

        let status = res.status();
        if !status.is_success() {
            return Err(anyhow!("HTTP {}", status.as_u16()));
        }

        let body: Value = res.json().await?;
        parse_response(&body, mint).ok_or_else(|| anyhow!("Empty Pump.fun metadata response"))
    }
}

/// The endpoint answers with a list, a map keyed by mint, a `{ coin }`
/// wrapper or the coin itself, depending on version.
pub fn parse_response(body: &Value, mint: &str) -> Option<TokenMetadata> {
    let coin = match body {
        Value::Array(items) => items.first()?,
        Value::Object(_) => non_null(body, mint)
            .or_else(|| non_null(body, "coin"))
            .unwrap_or(body),
        _ => return None,
    };

    let name = first_str(coin, &["name", "tokenName", "displayName", "symbol"]).unwrap_or(UNKNOWN);
    let symbol = first_str(coin, &["symbol", "ticker", "tokenSymbol", "name"]).unwrap_or(UNKNOWN);
    Some(TokenMetadata::new(name, symbol))
}
