//! Per-event flow: metadata, dedupe gate, holders, alert.
//!
//! Everything an event touches is owned here and injected at construction,
//! so the scanner shares one `Arc<MigrationPipeline>` across spawned tasks.

use std::sync::Arc;
use std::time::{Duration, Instant};

use anyhow::Result;
use chrono::Utc;
use log::{error, info};

use crate::cache::DedupCache;
use crate::config::Settings;
use crate::feed::MigrationEvent;
use crate::holders::HolderAggregator;
use crate::metadata::{MetadataResolver, UNKNOWN};
use crate::notify::{Alert, DiscordWebhook, Notifier};
use crate::rpc::{ChainQuery, SolanaRpc};

#[derive(Debug, Clone, PartialEq)]
pub enum EventOutcome {
    /// Same mint alerted within the dedupe window.
    Suppressed,
    /// Alert was built and handed to the notifier.
    Alerted(Alert),
}

pub struct MigrationPipeline {
    dedupe: DedupCache,
    metadata: MetadataResolver,
    aggregator: HolderAggregator,
    notifier: Arc<dyn Notifier>,
    dedupe_ttl: Duration,
    mention_everyone: bool,
}

impl MigrationPipeline {
    pub fn new(
        chain: Arc<dyn ChainQuery>,
        metadata: MetadataResolver,
        notifier: Arc<dyn Notifier>,
        dedupe_ttl: Duration,
        mention_everyone: bool,
    ) -> Self {
        Self {
            dedupe: DedupCache::new(),
            metadata,
            aggregator: HolderAggregator::new(chain),
            notifier,
            dedupe_ttl,
            mention_everyone,
        }
    }

    /// Live wiring: Solana RPC, Pump.fun + Dexscreener, Discord webhook.
    pub fn from_settings(settings: &Settings) -> Result<Self> {
        let chain = Arc::new(SolanaRpc::new(settings.rpc_url.clone(), settings.rpc_timeout())?);
        let metadata = MetadataResolver::with_default_sources(
            &settings.pumpfun_api_url,
            &settings.dexscreener_api_url,
            settings.metadata_timeout(),
        )?;
        let notifier = Arc::new(DiscordWebhook::new(
            settings.discord_webhook_url.clone(),
            settings.bot_username.clone(),
            settings.metadata_timeout(),
        )?);

        Ok(Self::new(
            chain,
            metadata,
            notifier,
            settings.dedupe_ttl(),
            settings.mention_everyone,
        ))
    }

    pub fn dedupe(&self) -> &DedupCache {
        &self.dedupe
    }

    /// Startup message. Failures are logged only.
    pub async fn announce_ready(&self) {
        match self.notifier.send(&Alert::ready(Utc::now())).await {
            Ok(()) => info!("🟢 [ALERT] Ready message sent"),
            Err(e) => error!("❌ [ALERT] Failed to send ready message: {:#}", e),
        }
    }

    pub async fn handle_event(&self, event: MigrationEvent) -> EventOutcome {
        let symbol = event.symbol.as_deref().unwrap_or(UNKNOWN);
        let name = event.name.as_deref().unwrap_or(symbol);

        let meta = self
            .metadata
            .resolve(Some(event.mint.as_str()), Some(name), Some(symbol))
            .await;

        if self
            .dedupe
            .check_and_record(&event.mint, Instant::now(), self.dedupe_ttl)
            .await
        {
            return EventOutcome::Suppressed;
        }

        info!("🚀 [PIPELINE] Migration: {} ({}) {}", meta.name, meta.symbol, event.mint);

        let snapshot = self.aggregator.aggregate(&event.mint).await;
        let concentration = snapshot.concentration();
        info!(
            "📊 [HOLDERS] {} holders={} tier={}",
            event.mint,
            snapshot.holders.len(),
            concentration.risk_tier
        );

        let alert = Alert::migration(
            &event.mint,
            &meta,
            &snapshot,
            &concentration,
            self.mention_everyone,
            Utc::now(),
        );

        if let Err(e) = self.notifier.send(&alert).await {
            error!("❌ [ALERT] Failed to send alert for {}: {:#}", event.mint, e);
        }

        EventOutcome::Alerted(alert)
    }
}
