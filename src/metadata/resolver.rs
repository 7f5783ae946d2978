//! Best-effort name/symbol resolution.
//!
//! Priority:
//!  1. Name from the feed event, when it is more than the ticker
//!  2. Cache
//!  3. Sources in order (Pump.fun, then Dexscreener), moving on only while
//!     the answer is missing or poor
//!  4. Whatever the event carried, then `-`

use std::sync::Arc;
use std::time::Duration;

use anyhow::Result;
use log::{error, info};

use crate::cache::MetadataCache;
use crate::metadata::{Dexscreener, MetadataSource, PumpFun, TokenMetadata, UNKNOWN};

pub struct MetadataResolver {
    sources: Vec<Arc<dyn MetadataSource>>,
    cache: MetadataCache,
}

impl MetadataResolver {
    pub fn new(sources: Vec<Arc<dyn MetadataSource>>) -> Self {
        Self {
            sources,
            cache: MetadataCache::new(),
        }
    }

    /// Pump.fun primary, Dexscreener fallback.
    pub fn with_default_sources(pumpfun_url: &str, dexscreener_url: &str, timeout: Duration) -> Result<Self> {
        let sources: Vec<Arc<dyn MetadataSource>> = vec![
            Arc::new(PumpFun::new(pumpfun_url.to_string(), timeout)?),
            Arc::new(Dexscreener::new(dexscreener_url.to_string(), timeout)?),
        ];
        Ok(Self::new(sources))
    }

    pub fn cache(&self) -> &MetadataCache {
        &self.cache
    }

    pub async fn resolve(
        &self,
        mint: Option<&str>,
        current_name: Option<&str>,
        current_symbol: Option<&str>,
    ) -> TokenMetadata {
        let current_name = present(current_name);
        let current_symbol = present(current_symbol);

        let Some(mint) = present(mint) else {
            return TokenMetadata::new(
                first_or_unknown(&[current_name, current_symbol]),
                first_or_unknown(&[current_symbol]),
            );
        };

        if let Some(name) = current_name {
            let symbol = current_symbol.unwrap_or("");
            if name != UNKNOWN && name.to_uppercase() != symbol.to_uppercase() {
                return TokenMetadata::new(name, first_or_unknown(&[current_symbol]));
            }
        }

        if let Some(cached) = self.cache.get(mint) {
            return TokenMetadata::new(
                first_or_unknown(&[present(Some(cached.name.as_str())), current_name, current_symbol]),
                first_or_unknown(&[present(Some(cached.symbol.as_str())), current_symbol]),
            );
        }

        let fetched = self.fetch_from_sources(mint).await;
        let fetched_name = fetched.as_ref().and_then(|m| present(Some(m.name.as_str())));
        let fetched_symbol = fetched.as_ref().and_then(|m| present(Some(m.symbol.as_str())));

        let resolved = TokenMetadata::new(
            first_or_unknown(&[fetched_name, current_name, current_symbol]),
            first_or_unknown(&[fetched_symbol, current_symbol, current_name]),
        );

        self.cache.insert(mint, resolved.clone());
        info!(
            "🏷️ [META] {} resolved as {} ({})",
            mint, resolved.name, resolved.symbol
        );
        resolved
    }

    /// Walk the sources until one gives a usable answer. A later source only
    /// replaces an earlier answer when it returns something itself.
    async fn fetch_from_sources(&self, mint: &str) -> Option<TokenMetadata> {
        let mut best: Option<TokenMetadata> = None;

        for source in &self.sources {
            if best.as_ref().is_some_and(|m| !m.is_poor()) {
                break;
            }
            match source.fetch(mint).await {
                Ok(meta) => best = Some(meta),
                Err(e) => error!("❌ [META] {} metadata error for {}: {}", source.label(), mint, e),
            }
        }

        best
    }
}

fn present(s: Option<&str>) -> Option<&str> {
    s.filter(|s| !s.is_empty())
}

fn first_or_unknown(candidates: &[Option<&str>]) -> String {
    candidates
        .iter()
        .find_map(|c| *c)
        .unwrap_or(UNKNOWN)
        .to_string()
}

#[cfg(test)]
pub(crate) mod tests {
    use super::*;
    use async_trait::async_trait;
    use std::sync::atomic::{AtomicUsize, Ordering};

    /// Scripted source that counts how often it was asked.
    pub(crate) struct StubSource {
        pub answer: Option<TokenMetadata>,
        pub calls: AtomicUsize,
    }

    impl StubSource {
        pub fn answering(name: &str, symbol: &str) -> Arc<Self> {
            Arc::new(Self {
                answer: Some(TokenMetadata::new(name, symbol)),
                calls: AtomicUsize::new(0),
            })
        }

        pub fn failing() -> Arc<Self> {
            Arc::new(Self {
                answer: None,
                calls: AtomicUsize::new(0),
            })
        }

        pub fn calls(&self) -> usize {
            self.calls.load(Ordering::SeqCst)
        }
    }

    #[async_trait]
    impl MetadataSource for StubSource {
        fn label(&self) -> &'static str {
            "stub"
        }

        async fn fetch(&self, _mint: &str) -> Result<TokenMetadata> {
            self.calls.fetch_add(1, Ordering::SeqCst);
            self.answer
                .clone()
                .ok_or_else(|| anyhow::anyhow!("HTTP 503"))
        }
    }

    fn resolver(primary: &Arc<StubSource>, fallback: &Arc<StubSource>) -> MetadataResolver {
        let sources: Vec<Arc<dyn MetadataSource>> = vec![
            primary.clone() as Arc<dyn MetadataSource>,
            fallback.clone() as Arc<dyn MetadataSource>,
        ];
        MetadataResolver::new(sources)
    }

    #[tokio::test]
    async fn test_no_mint_uses_current_values() {
        let p = StubSource::answering("Remote", "RMT");
        let f = StubSource::failing();
        let r = resolver(&p, &f);

        assert_eq!(r.resolve(None, None, Some("SYM")).await, TokenMetadata::new("SYM", "SYM"));
        assert_eq!(r.resolve(None, None, None).await, TokenMetadata::new("-", "-"));
        assert_eq!(p.calls(), 0);
    }

    #[tokio::test]
    async fn test_trustworthy_name_short_circuits() {
        let p = StubSource::answering("Remote", "RMT");
        let f = StubSource::failing();
        let r = resolver(&p, &f);

        let meta = r.resolve(Some("MINT"), Some("Moon Cat"), Some("MCAT")).await;
        assert_eq!(meta, TokenMetadata::new("Moon Cat", "MCAT"));
        assert_eq!(p.calls(), 0);
        assert!(r.cache().is_empty());

        let meta = r.resolve(Some("MINT"), Some("Moon Cat"), None).await;
        assert_eq!(meta, TokenMetadata::new("Moon Cat", "-"));
    }

    #[tokio::test]
    async fn test_name_equal_to_symbol_consults_sources() {
        let p = StubSource::answering("Moon Cat", "MCAT");
        let f = StubSource::failing();
        let r = resolver(&p, &f);

        let meta = r.resolve(Some("MINT"), Some("mcat"), Some("MCAT")).await;
        assert_eq!(meta, TokenMetadata::new("Moon Cat", "MCAT"));
        assert_eq!(p.calls(), 1);
        assert_eq!(f.calls(), 0);
    }

    #[tokio::test]
    async fn test_poor_primary_falls_back() {
        let p = StubSource::answering("MCAT", "MCAT");
        let f = StubSource::answering("Moon Cat", "MCAT");
        let r = resolver(&p, &f);

        let meta = r.resolve(Some("MINT"), Some("-"), Some("-")).await;
        assert_eq!(meta, TokenMetadata::new("Moon Cat", "MCAT"));
        assert_eq!(f.calls(), 1);
    }

    #[tokio::test]
    async fn test_failed_fallback_keeps_poor_primary() {
        let p = StubSource::answering("MCAT", "MCAT");
        let f = StubSource::failing();
        let r = resolver(&p, &f);

        let meta = r.resolve(Some("MINT"), None, None).await;
        assert_eq!(meta, TokenMetadata::new("MCAT", "MCAT"));
        assert_eq!(f.calls(), 1);
    }

    #[tokio::test]
    async fn test_all_sources_fail_uses_current() {
        let p = StubSource::failing();
        let f = StubSource::failing();
        let r = resolver(&p, &f);

        let meta = r.resolve(Some("MINT"), Some("-"), Some("CAT")).await;
        assert_eq!(meta, TokenMetadata::new("-", "CAT"));

        let r = resolver(&p, &f);
        let meta = r.resolve(Some("MINT2"), None, None).await;
        assert_eq!(meta, TokenMetadata::new("-", "-"));
    }

    #[tokio::test]
    async fn test_result_is_cached_permanently() {
        let p = StubSource::answering("Moon Cat", "MCAT");
        let f = StubSource::failing();
        let r = resolver(&p, &f);

        r.resolve(Some("MINT"), Some("MCAT"), Some("MCAT")).await;
        let again = r.resolve(Some("MINT"), Some("MCAT"), Some("MCAT")).await;

        assert_eq!(again, TokenMetadata::new("Moon Cat", "MCAT"));
        assert_eq!(p.calls(), 1);
        assert_eq!(r.cache().get("MINT"), Some(TokenMetadata::new("Moon Cat", "MCAT")));
    }
}
