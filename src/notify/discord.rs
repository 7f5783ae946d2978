//! Discord webhook delivery.

use std::time::Duration;

use anyhow::{anyhow, Context, Result};
use async_trait::async_trait;
use log::{info, warn};
use reqwest::Client;
use serde_json::{json, Value};

use crate::notify::{Alert, Notifier};

#[derive(Clone)]
pub struct DiscordWebhook {
    url: String,
    username: String,
    client: Client,
}

impl DiscordWebhook {
    pub fn new(url: String, username: String, timeout: Duration) -> Result<Self> {
        let client = Client::builder()
            .timeout(timeout)
            .build()
            .context("building discord http client")?;
        Ok(Self {
            url,
            username,
            client,
        })
    }
}

/// Webhook body for one alert. `@everyone` only pings when the alert asks for it.
pub fn payload(alert: &Alert, username: &str) -> Value {
    let parse: Vec<&str> = if alert.mention_everyone {
        vec!["everyone"]
    } else {
        Vec::new()
    };

    let embed = json!({
        "title": alert.title,
        "color": alert.color,
        "fields": alert.fields,
        "timestamp": alert.timestamp.to_rfc3339(),
    });

    json!({
        "username": username,
        "content": alert.content,
        "allowed_mentions": { "parse": parse },
        "embeds": [embed],
    })
}

#[async_trait]
impl Notifier for DiscordWebhook {
    async fn send(&self, alert: &Alert) -> Result<()> {
        let res = self
            .client
            .post(&self.url)
            .json(&payload(alert, &self.username))
            .send()
            .await
            .context("posting to discord webhook")?;

        let status = res.status();
        if !status.is_success() {
            let body = res.text().await.unwrap_or_default();
            warn!("⚠️ [DISCORD] Webhook rejected alert: HTTP {} {}", status.as_u16(), body);
            return Err(anyhow!("discord webhook HTTP {}", status.as_u16()));
        }

        info!("📨 [DISCORD] Sent: {}", alert.title);
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{TimeZone, Utc};

    #[test]
    fn test_ready_payload() {
        let now = Utc.with_ymd_and_hms(2024, 5, 1, 12, 0, 0).unwrap();
        let body = payload(&Alert::ready(now), "Migration Scanner");

        assert_eq!(body["username"], "Migration Scanner");
        assert_eq!(body["content"], "✅ Bot is online.");
        assert_eq!(body["allowed_mentions"]["parse"], json!([]));
        assert_eq!(body["embeds"][0]["title"], "🟢 Migration Scanner Online");
        assert_eq!(body["embeds"][0]["color"], 0x2ecc71);
        assert_eq!(body["embeds"][0]["timestamp"], "2024-05-01T12:00:00+00:00");
        assert_eq!(body["embeds"][0]["fields"], json!([]));
    }

    #[test]
    fn test_migration_payload_mentions() {
        let snapshot = crate::holders::HolderSnapshot::empty();
        let meta = crate::metadata::TokenMetadata::new("Moon Cat", "MCAT");
        let alert = Alert::migration("MINT", &meta, &snapshot, &snapshot.concentration(), true, Utc::now());
        let body = payload(&alert, "bot");

        assert_eq!(body["allowed_mentions"]["parse"], json!(["everyone"]));
        let fields = body["embeds"][0]["fields"].as_array().unwrap();
        assert_eq!(fields.len(), 8);
        assert_eq!(fields[0]["name"], "🧪 Token");
        assert_eq!(fields[3]["inline"], true);
        assert_eq!(fields[0]["inline"], false);
    }
}
