//! Websocket subscription to the migration feed.

use std::sync::Arc;
use std::time::Duration;

use anyhow::{Context, Result};
use futures_util::{SinkExt, StreamExt};
use log::{debug, error, info, warn};
use serde_json::json;
use tokio_tungstenite::tungstenite::Message;
use url::Url;

use crate::feed::event::parse_frame;
use crate::pipeline::MigrationPipeline;

pub struct FeedListener {
    url: String,
    reconnect_delay: Duration,
    pipeline: Arc<MigrationPipeline>,
}

impl FeedListener {
    pub fn new(url: String, reconnect_delay: Duration, pipeline: Arc<MigrationPipeline>) -> Self {
        Self {
            url,
            reconnect_delay,
            pipeline,
        }
    }

    /// Connect, consume, reconnect. Never returns.
    pub async fn run(&self) {
        loop {
            match self.connect_and_listen().await {
                Ok(()) => warn!(
                    "⚠️ [FEED] Connection closed, reconnecting in {}s...",
                    self.reconnect_delay.as_secs_f64()
                ),
                Err(e) => error!(
                    "❌ [FEED] {:#}, reconnecting in {}s...",
                    e,
                    self.reconnect_delay.as_secs_f64()
                ),
            }
            tokio::time::sleep(self.reconnect_delay).await;
        }
    }

    async fn connect_and_listen(&self) -> Result<()> {
        info!("🔌 [FEED] Connecting to {}", self.url);

        let url = Url::parse(&self.url).with_context(|| format!("invalid feed url {}", self.url))?;
        let (ws_stream, _) = tokio_tungstenite::connect_async(url)
            .await
            .context("websocket connect")?;
        let (mut ws_sender, mut ws_receiver) = ws_stream.split();
        info!("✅ [FEED] WebSocket connected");

        let subscribe = json!({ "method": "subscribeMigration" });
        ws_sender
            .send(Message::Text(subscribe.to_string()))
            .await
            .context("sending subscribeMigration")?;
        info!("📨 [FEED] Subscribed to migration feed");

        while let Some(msg) = ws_receiver.next().await {
            match msg.context("websocket read")? {
                Message::Text(text) => self.dispatch(&text),
                Message::Close(frame) => {
                    debug!("[FEED] Close frame: {:?}", frame);
                    break;
                }
                _ => {}
            }
        }

        Ok(())
    }

    /// One task per event.
    fn dispatch(&self, text: &str) {
        for event in parse_frame(text) {
            let pipeline = Arc::clone(&self.pipeline);
            tokio::spawn(async move {
                pipeline.handle_event(event).await;
            });
        }
    }
}
