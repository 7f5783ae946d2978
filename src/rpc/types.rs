//! Response shapes for the handful of Solana JSON-RPC methods we use.

use base64::Engine;
use serde::Deserialize;

/// `{ context, value }` wrapper returned by most account queries.
#[derive(Debug, Clone, Deserialize)]
pub struct RpcResponse<T> {
    pub value: T,
}

/// One entry of `getTokenLargestAccounts`.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TokenAccountBalance {
    pub address: String,
    #[serde(default)]
    pub amount: Option<String>,
    #[serde(default)]
    pub decimals: Option<u8>,
    #[serde(default)]
    pub ui_amount: Option<f64>,
}

/// `getTokenSupply` value.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TokenAmount {
    #[serde(default)]
    pub amount: Option<String>,
    #[serde(default)]
    pub decimals: Option<u8>,
    #[serde(default)]
    pub ui_amount: Option<f64>,
}

/// One entry of `getMultipleAccounts` (null entries become `None` upstream).
#[derive(Debug, Clone, Default, Deserialize)]
pub struct AccountInfo {
    #[serde(default)]
    pub lamports: Option<u64>,
    #[serde(default)]
    pub data: Option<AccountData>,
}

/// Account payload as returned with `encoding: "base64"`.
///
/// Nodes answer with `["<b64>", "base64"]`; some proxies wrap that array in
/// an object. Anything else is kept as raw JSON and yields no payload.
#[derive(Debug, Clone, Deserialize)]
#[serde(untagged)]
pub enum AccountData {
    Encoded(Vec<String>),
    Wrapped { data: Vec<String> },
    Other(serde_json::Value),
}

impl AccountData {
    pub fn base64_payload(&self) -> Option<&str> {
        match self {
            AccountData::Encoded(parts) | AccountData::Wrapped { data: parts } => {
                parts.first().map(String::as_str)
            }
            AccountData::Other(_) => None,
        }
    }

    /// Decoded account bytes, `None` when absent or not valid base64.
    pub fn bytes(&self) -> Option<Vec<u8>> {
        let payload = self.base64_payload()?;
        base64::engine::general_purpose::STANDARD
            .decode(payload)
            .ok()
    }
}

impl AccountInfo {
    pub fn bytes(&self) -> Option<Vec<u8>> {
        self.data.as_ref().and_then(AccountData::bytes)
    }
}
