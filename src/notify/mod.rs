pub mod alert;
pub mod discord;

use async_trait::async_trait;

pub use alert::{Alert, Field};
pub use discord::DiscordWebhook;

/// Where alerts end up.
#[async_trait]
pub trait Notifier: Send + Sync + 'static {
    async fn send(&self, alert: &Alert) -> anyhow::Result<()>;
}
