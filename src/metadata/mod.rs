//! Token name/symbol lookup with layered fallback.

pub mod dexscreener;
pub mod pumpfun;
pub mod resolver;

use async_trait::async_trait;

pub use dexscreener::Dexscreener;
pub use pumpfun::PumpFun;
pub use resolver::MetadataResolver;

/// Placeholder used wherever a name or symbol is unknown.
pub const UNKNOWN: &str = "-";

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TokenMetadata {
    pub name: String,
    pub symbol: String,
}

impl TokenMetadata {
    pub fn new(name: impl Into<String>, symbol: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            symbol: symbol.into(),
        }
    }

    /// Missing or placeholder fields, or a name that is just the ticker.
    pub fn is_poor(&self) -> bool {
        self.name.is_empty()
            || self.name == UNKNOWN
            || self.symbol == UNKNOWN
            || self.name.to_uppercase() == self.symbol.to_uppercase()
    }
}

/// A remote service that can name a token.
#[async_trait]
pub trait MetadataSource: Send + Sync + 'static {
    /// Short label used in logs.
    fn label(&self) -> &'static str;

    async fn fetch(&self, mint: &str) -> anyhow::Result<TokenMetadata>;
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_is_poor() {
        assert!(TokenMetadata::new("-", "DOGE").is_poor());
        assert!(TokenMetadata::new("", "DOGE").is_poor());
        assert!(TokenMetadata::new("Dogecoin", "-").is_poor());
        assert!(TokenMetadata::new("doge", "DOGE").is_poor());
        assert!(!TokenMetadata::new("Dogecoin", "DOGE").is_poor());
    }
}
