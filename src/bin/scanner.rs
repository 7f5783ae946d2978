//! Long-running migration scanner.
//!
//! Usage: cargo run --bin scanner -- --config config/settings.json

use std::sync::Arc;

use anyhow::Result;
use clap::Parser;
use log::info;

use migration_scanner::config::settings::{Settings, DEFAULT_PATH};
use migration_scanner::feed::FeedListener;
use migration_scanner::pipeline::MigrationPipeline;

#[derive(Parser)]
#[command(name = "scanner", about = "Alert on Pump.fun migrations with holder analysis")]
struct Args {
    /// Settings JSON file
    #[arg(long, default_value = DEFAULT_PATH)]
    config: String,
}

#[tokio::main(flavor = "current_thread")]
async fn main() -> Result<()> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    let args = Args::parse();
    let settings = Settings::load_from_file(&args.config)?;
    info!("⚙️ [CONFIG] Loaded {}: {:?}", args.config, settings);

    let pipeline = Arc::new(MigrationPipeline::from_settings(&settings)?);
    pipeline.announce_ready().await;

    FeedListener::new(settings.ws_url.clone(), settings.reconnect_delay(), pipeline)
        .run()
        .await;

    Ok(())
}
