//! Dexscreener token endpoint: fallback metadata source.

use std::time::Duration;

use anyhow::{anyhow, Context, Result};
use async_trait::async_trait;
use reqwest::Client;
use serde_json::Value;

use crate::metadata::{MetadataSource, TokenMetadata, UNKNOWN};
use crate::utils::json::first_str;

pub const DEFAULT_URL: &str = "https://api.dexscreener.com/latest/dex/tokens";

#[derive(Clone)]
pub struct Dexscreener {
    base_url: String,
    client: Client,
}

impl Dexscreener {
    pub fn new(base_url: String, timeout: Duration) -> Result<Self> {
        let client = Client::builder()
            .timeout(timeout)
            .build()
            .context("building dexscreener http client")?;
        Ok(Self {
            base_url: base_url.trim_end_matches('/').to_string(),
            client,
        })
    }
}

#[async_trait]
impl MetadataSource for Dexscreener {
    fn label(&self) -> &'static str {
        "Dexscreener"
    }

    async fn fetch(&self, mint: &str) -> Result<TokenMetadata> {
        let url = format!("{}/{}", self.base_url, mint);
        let res = self.client.get(&url).send().await?;

        let status = res.status();
        if !status.is_success() {
            return Err(anyhow!("HTTP {}", status.as_u16()));
        }

        let body: Value = res.json().await?;
        parse_response(&body).ok_or_else(|| anyhow!("Empty Dexscreener pairs"))
    }
}

/// Name and symbol of the base token of the first pair.
pub fn parse_response(body: &Value) -> Option<TokenMetadata> {
    let pair = body.get("pairs")?.as_array()?.first()?;
    let missing = Value::Null;
    let base = pair.get("baseToken").unwrap_or(&missing);

    let name = first_str(base, &["name", "symbol"]).unwrap_or(UNKNOWN);
    let symbol = first_str(base, &["symbol", "name"]).unwrap_or(UNKNOWN);
    Some(TokenMetadata::new(name, symbol))
}
