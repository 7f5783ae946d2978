//! Runtime configuration loader.

use std::{fmt, fs, path::Path, time::Duration};

use anyhow::{bail, Context, Result};
use serde_json::Value;

use crate::metadata::{dexscreener, pumpfun};

pub const DEFAULT_PATH: &str = "config/settings.json";
pub const DEFAULT_WS_URL: &str = "wss://pumpportal.fun/api/data";
pub const DEFAULT_BOT_USERNAME: &str = "Migration Scanner";

/// ------------------------------------------------------------------
/// Main Settings object
/// ------------------------------------------------------------------
#[derive(Clone)]
pub struct Settings {
    /* -------- endpoints ----------------------------- */
    pub rpc_url: String,
    pub ws_url: String,
    pub pumpfun_api_url: String,
    pub dexscreener_api_url: String,

    /* -------- discord ------------------------------- */
    pub discord_webhook_url: String,
    pub bot_username: String,
    pub mention_everyone: bool,

    /* -------- timing -------------------------------- */
    pub reconnect_delay_ms: u64,
    pub dedupe_ttl_ms: u64,
    pub rpc_timeout_ms: u64,
    pub metadata_timeout_ms: u64,
}

impl Settings {
    /// Read `settings.json` from disk.
    pub fn load_from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let raw = fs::read_to_string(&path)
            .with_context(|| format!("reading settings file {:?}", path.as_ref()))?;
        Self::from_json_str(&raw)
            .with_context(|| format!("parsing settings file {:?}", path.as_ref()))
    }

    /// Load settings from the default config/settings.json file.
    pub fn load() -> Result<Self> {
        Self::load_from_file(DEFAULT_PATH)
    }

    pub fn from_json_str(raw: &str) -> Result<Self> {
        let json: Value = serde_json::from_str(raw)?;

        /* -------- plain strings ---------------------------------- */
        let rpc_url = required_str(&json, "rpc_url")?;
        let discord_webhook_url = required_str(&json, "discord_webhook_url")?;
        let ws_url = json["ws_url"].as_str().unwrap_or(DEFAULT_WS_URL).to_string();
        let pumpfun_api_url = json["pumpfun_api_url"]
            .as_str()
            .unwrap_or(pumpfun::DEFAULT_URL)
            .to_string();
        let dexscreener_api_url = json["dexscreener_api_url"]
            .as_str()
            .unwrap_or(dexscreener::DEFAULT_URL)
            .to_string();
        let bot_username = json["bot_username"]
            .as_str()
            .unwrap_or(DEFAULT_BOT_USERNAME)
            .to_string();
        let mention_everyone = json["mention_everyone"].as_bool().unwrap_or(true);

        /* -------- numeric parameters ----------------------------- */
        let reconnect_delay_ms = json["reconnect_delay_ms"].as_u64().unwrap_or(5_000);
        let dedupe_ttl_ms = json["dedupe_ttl_ms"].as_u64().unwrap_or(5 * 60 * 1000);
        let rpc_timeout_ms = json["rpc_timeout_ms"].as_u64().unwrap_or(10_000);
        let metadata_timeout_ms = json["metadata_timeout_ms"].as_u64().unwrap_or(5_000);

        Ok(Self {
            rpc_url,
            ws_url,
            pumpfun_api_url,
            dexscreener_api_url,
            discord_webhook_url,
            bot_username,
            mention_everyone,
            reconnect_delay_ms,
            dedupe_ttl_ms,
            rpc_timeout_ms,
            metadata_timeout_ms,
        })
    }

    pub fn reconnect_delay(&self) -> Duration {
        Duration::from_millis(self.reconnect_delay_ms)
    }

    pub fn dedupe_ttl(&self) -> Duration {
        Duration::from_millis(self.dedupe_ttl_ms)
    }

    pub fn rpc_timeout(&self) -> Duration {
        Duration::from_millis(self.rpc_timeout_ms)
    }

    pub fn metadata_timeout(&self) -> Duration {
        Duration::from_millis(self.metadata_timeout_ms)
    }
}

fn required_str(json: &Value, key: &str) -> Result<String> {
    match json[key].as_str() {
        Some(s) if !s.trim().is_empty() => Ok(s.to_string()),
        _ => bail!("`{key}` must be set in settings"),
    }
}

/* Webhook URLs carry their token, keep them out of logs. */
impl fmt::Debug for Settings {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Settings")
            .field("rpc_url", &self.rpc_url)
            .field("ws_url", &self.ws_url)
            .field("discord_webhook_url", &"<redacted>")
            .field("bot_username", &self.bot_username)
            .field("mention_everyone", &self.mention_everyone)
            .field("dedupe_ttl_ms", &self.dedupe_ttl_ms)
            .finish_non_exhaustive()
    }
}
