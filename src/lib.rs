// App-specific modules
pub mod cache;
pub mod config;
pub mod feed;
pub mod holders;
pub mod metadata;
pub mod notify;
pub mod pipeline;
pub mod rpc;
pub mod utils;
