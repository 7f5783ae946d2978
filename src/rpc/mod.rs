pub mod client;
pub mod types;

#[cfg(test)]
pub(crate) mod fake;

use async_trait::async_trait;

pub use client::{RpcError, SolanaRpc};
use types::{AccountInfo, TokenAccountBalance, TokenAmount};

/// The chain queries the holder aggregator depends on.
#[async_trait]
pub trait ChainQuery: Send + Sync + 'static {
    /// Largest token accounts for `mint` at finalized commitment.
    async fn token_largest_accounts(&self, mint: &str) -> Result<Vec<TokenAccountBalance>, RpcError>;

    async fn token_supply(&self, mint: &str) -> Result<TokenAmount, RpcError>;

    /// One entry per address, in request order; `None` for accounts that do not exist.
    async fn multiple_accounts(&self, addresses: &[String]) -> Result<Vec<Option<AccountInfo>>, RpcError>;
}
