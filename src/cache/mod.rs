pub mod dedupe;
pub mod metadata;

pub use dedupe::DedupCache;
pub use metadata::MetadataCache;
