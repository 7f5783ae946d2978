//! PumpPortal migration feed.

pub mod event;
pub mod listener;

pub use event::{parse_frame, unpack_message, MigrationEvent};
pub use listener::FeedListener;
