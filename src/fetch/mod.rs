//! Network fetch layer
//!
//! The only place the scanner performs I/O. Every GET goes through
//! the fixed-delay [`RetryPolicy`].

pub mod http;
pub mod retry;

use async_trait::async_trait;
use serde_json::Value;

use crate::error::Result;

pub use http::HttpFetcher;
pub use retry::RetryPolicy;

/// Fetches a JSON document by URL
#[async_trait]
pub trait JsonFetcher: Send + Sync {
    async fn get_json(&self, url: &str) -> Result<Value>;
}
