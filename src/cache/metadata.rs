//! Resolved token names, kept for the life of the process.

use dashmap::DashMap;

use crate::metadata::TokenMetadata;

#[derive(Debug, Default)]
pub struct MetadataCache {
    entries: DashMap<String, TokenMetadata>,
}

impl MetadataCache {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn get(&self, mint: &str) -> Option<TokenMetadata> {
        self.entries.get(mint).map(|e| e.value().clone())
    }

    pub fn insert(&self, mint: &str, meta: TokenMetadata) {
        self.entries.insert(mint.to_string(), meta);
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}
