//! One-shot holder analysis for a mint. Prints, never alerts.
//!
//! Usage: cargo run --bin check_holders -- --mint <MINT>

use std::sync::Arc;

use anyhow::Result;
use clap::Parser;

use migration_scanner::config::settings::{Settings, DEFAULT_PATH};
use migration_scanner::holders::HolderAggregator;
use migration_scanner::metadata::MetadataResolver;
use migration_scanner::notify::alert::holder_line;
use migration_scanner::rpc::SolanaRpc;
use migration_scanner::utils::format::{format_grouped, NOT_AVAILABLE};

#[derive(Parser)]
#[command(name = "check_holders", about = "Print top holders and concentration for a mint")]
struct Args {
    /// Settings JSON file
    #[arg(long, default_value = DEFAULT_PATH)]
    config: String,

    /// Token mint address
    #[arg(long)]
    mint: String,
}

#[tokio::main]
async fn main() -> Result<()> {
    env_logger::init();

    let args = Args::parse();
    let settings = Settings::load_from_file(&args.config)?;

    let resolver = MetadataResolver::with_default_sources(
        &settings.pumpfun_api_url,
        &settings.dexscreener_api_url,
        settings.metadata_timeout(),
    )?;
    let chain = Arc::new(SolanaRpc::new(settings.rpc_url.clone(), settings.rpc_timeout())?);
    let aggregator = HolderAggregator::new(chain);

    println!("🔍 Checking holders for {}...", args.mint);

    let meta = resolver.resolve(Some(args.mint.as_str()), None, None).await;
    let snapshot = aggregator.aggregate(&args.mint).await;
    let concentration = snapshot.concentration();

    println!("🧪 Token: {} ({})", meta.name, meta.symbol);
    match snapshot.total_supply() {
        Some(supply) => println!("📦 Total supply: {}", format_grouped(supply, 2)),
        None => println!("📦 Total supply: No Data"),
    }

    if snapshot.holders.is_empty() {
        println!("\n🏦 No holder data");
    } else {
        println!("\n🏦 Top holders:");
        for holder in &snapshot.holders {
            println!("   {}", holder_line(holder));
        }
    }

    let pct = |share: Option<f64>| {
        share
            .map(|p| format!("{p:.2}%"))
            .unwrap_or_else(|| NOT_AVAILABLE.to_string())
    };
    println!("\n🐋 Top 1 holder:   {}", pct(concentration.top1_share));
    println!("👥 Top 10 holders: {}", pct(concentration.top10_share));
    println!("⚖️ Distribution:   {}", concentration.label());

    Ok(())
}
