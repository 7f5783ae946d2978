//! Normalization of feed messages into migration events.

use serde_json::Value;

use crate::utils::json::{first_str, non_null};

/// A token that left the bonding curve, as reported by the feed.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MigrationEvent {
    pub mint: String,
    pub name: Option<String>,
    pub symbol: Option<String>,
}

impl MigrationEvent {
    pub fn new(mint: impl Into<String>, name: Option<&str>, symbol: Option<&str>) -> Self {
        Self {
            mint: mint.into(),
            name: name.map(str::to_string),
            symbol: symbol.map(str::to_string),
        }
    }

    /// The token record may sit at `token`, `data.token`, or be the message
    /// itself. Messages without a mint are not events.
    pub fn from_value(msg: &Value) -> Option<Self> {
        let token = non_null(msg, "token")
            .or_else(|| non_null(msg, "data").and_then(|d| non_null(d, "token")))
            .unwrap_or(msg);

        let mint = first_str(token, &["mint", "mintAddress", "address"])
            .or_else(|| first_str(msg, &["mint"]))?;

        let symbol = first_str(token, &["symbol", "ticker", "tokenSymbol"])
            .or_else(|| first_str(msg, &["symbol", "ticker"]));

        let name = first_str(token, &["name", "tokenName", "coin_name"])
            .or_else(|| first_str(msg, &["name"]));

        Some(Self::new(mint, name, symbol))
    }
}

/// Split one frame into candidate event payloads.
pub fn unpack_message(msg: Value) -> Vec<Value> {
    match msg {
        Value::Array(items) => items,
        Value::Object(mut obj) => match obj.remove("data") {
            Some(Value::Array(items)) => items,
            Some(data) if is_truthy(&data) => vec![data],
            Some(data) => {
                obj.insert("data".to_string(), data);
                vec![Value::Object(obj)]
            }
            None => vec![Value::Object(obj)],
        },
        other => vec![other],
    }
}

/// `data` values that count as a payload: anything but null, false, 0 or "".
fn is_truthy(value: &Value) -> bool {
    match value {
        Value::Null => false,
        Value::Bool(b) => *b,
        Value::Number(n) => n.as_f64().is_some_and(|f| f != 0.0),
        Value::String(s) => !s.is_empty(),
        Value::Array(_) | Value::Object(_) => true,
    }
}

/// Parse a text frame and normalize every event in it. Unparseable frames
/// yield nothing.
pub fn parse_frame(text: &str) -> Vec<MigrationEvent> {
    let Ok(msg) = serde_json::from_str::<Value>(text) else {
        return Vec::new();
    };
    unpack_message(msg)
        .iter()
        .filter_map(MigrationEvent::from_value)
        .collect()
}
