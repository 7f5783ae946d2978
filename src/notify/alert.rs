//! Alert payloads: the startup ping and the per-migration holder report.

use chrono::{DateTime, Utc};
use itertools::Itertools;
use serde::Serialize;

use crate::holders::{ConcentrationResult, HolderSnapshot, RankedHolder};
use crate::metadata::{TokenMetadata, UNKNOWN};
use crate::utils::address::shorten;
use crate::utils::format::{format_compact, format_grouped, NOT_AVAILABLE};

pub const READY_COLOR: u32 = 0x2ecc71;
pub const MIGRATION_COLOR: u32 = 0x00ffcc;

/// Embed field values are capped by Discord, counted in UTF-16 units.
pub const FIELD_VALUE_LIMIT: usize = 1024;

const EXPLORER_TOKEN_URL: &str = "https://solscan.io/token";
const EXPLORER_ACCOUNT_URL: &str = "https://solscan.io/account";
const TRADE_URL: &str = "https://axiom.trade/t";

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Field {
    pub name: String,
    pub value: String,
    pub inline: bool,
}

impl Field {
    fn new(name: &str, value: impl Into<String>) -> Self {
        Self {
            name: name.to_string(),
            value: value.into(),
            inline: false,
        }
    }

    fn inline(name: &str, value: impl Into<String>) -> Self {
        Self {
            inline: true,
            ..Self::new(name, value)
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct Alert {
    /// Message text above the embed.
    pub content: String,
    pub mention_everyone: bool,
    pub title: String,
    pub color: u32,
    pub fields: Vec<Field>,
    pub timestamp: DateTime<Utc>,
}

impl Alert {
    /// Posted once when the scanner comes up.
    pub fn ready(now: DateTime<Utc>) -> Self {
        Self {
            content: "✅ Bot is online.".to_string(),
            mention_everyone: false,
            title: "🟢 Migration Scanner Online".to_string(),
            color: READY_COLOR,
            fields: Vec::new(),
            timestamp: now,
        }
    }

    pub fn migration(
        mint: &str,
        meta: &TokenMetadata,
        snapshot: &HolderSnapshot,
        concentration: &ConcentrationResult,
        mention_everyone: bool,
        now: DateTime<Utc>,
    ) -> Self {
        let content = if mention_everyone {
            "@everyone 🚨 **New Pump.fun Migration Detected!**"
        } else {
            "🚨 **New Pump.fun Migration Detected!**"
        };

        let name = non_empty_or_unknown(&meta.name);
        let symbol = non_empty_or_unknown(&meta.symbol);

        let fields = vec![
            Field::new("🧪 Token", format!("**{name} ({symbol})**")),
            Field::new("🤑 Contract (CA)", format!("```{mint}```")),
            Field::new(
                "🔗 Quick Links",
                format!("[Solscan]({EXPLORER_TOKEN_URL}/{mint}) | [Trade on Axiom]({TRADE_URL}/{mint})"),
            ),
            Field::inline("📦 Total Supply", supply_text(snapshot.total_supply())),
            Field::inline("🐋 Top 1 Holder", percent_text(concentration.top1_share)),
            Field::inline("👥 Top 10 Holders", percent_text(concentration.top10_share)),
            Field::new("⚖️ Distribution Quality", concentration.label()),
            Field::new("🏦 Holder Breakdown", holder_breakdown(&snapshot.holders)),
        ];

        Self {
            content: content.to_string(),
            mention_everyone,
            title: format!("🚀 {symbol} Migrated"),
            color: MIGRATION_COLOR,
            fields,
            timestamp: now,
        }
    }

    pub fn field(&self, name: &str) -> Option<&str> {
        self.fields
            .iter()
            .find(|f| f.name == name)
            .map(|f| f.value.as_str())
    }
}

fn non_empty_or_unknown(s: &str) -> &str {
    if s.is_empty() {
        UNKNOWN
    } else {
        s
    }
}

fn supply_text(supply: Option<f64>) -> String {
    match supply {
        Some(s) if s.is_finite() && s != 0.0 => format_grouped(s, 2),
        _ => "No Data".to_string(),
    }
}

fn percent_text(share: Option<f64>) -> String {
    share
        .map(|p| format!("{p:.2}%"))
        .unwrap_or_else(|| NOT_AVAILABLE.to_string())
}

pub fn holder_line(h: &RankedHolder) -> String {
    let sol = h
        .native_balance
        .map(|s| format!("{s:.3} SOL"))
        .unwrap_or_else(|| NOT_AVAILABLE.to_string());
    format!(
        "▫️ **#{}** — [{}]({}/{}) • **{} tokens** • 💰 {}",
        h.rank,
        shorten(Some(&h.owner_address)),
        EXPLORER_ACCOUNT_URL,
        h.owner_address,
        format_compact(h.token_balance),
        sol
    )
}

/// One line per holder, cut to [`FIELD_VALUE_LIMIT`] UTF-16 units.
pub fn holder_breakdown(holders: &[RankedHolder]) -> String {
    if holders.is_empty() {
        return "No holder data".to_string();
    }
    truncate_field(&holders.iter().map(holder_line).join("\n"))
}

fn utf16_len(text: &str) -> usize {
    text.encode_utf16().count()
}

fn truncate_field(text: &str) -> String {
    if utf16_len(text) <= FIELD_VALUE_LIMIT {
        return text.to_string();
    }
    let budget = FIELD_VALUE_LIMIT - 4;
    let mut used = 0;
    let mut out: String = text
        .chars()
        .take_while(|c| {
            used += c.len_utf16();
            used <= budget
        })
        .collect();
    out.push_str("...");
    out
}
