//! Source abstraction for news retrieval.
//!
//! This module defines the [`NewsSource`] trait, one implementation per
//! upstream feed. Sources report failures through their `Result`; the
//! [`NewsCollector`](crate::collect::NewsCollector) is the boundary that
//! catches every failure and degrades that source to an empty batch, so no
//! source error ever aborts a whole request.
//!
//! The trait is designed for async usage and dynamic dispatch
//! (`dyn NewsSource`), so a pipeline is composed by pushing sources in the
//! order their output should rank under ties.
//!
//! # Example
//!
//! ```rust
//! use async_trait::async_trait;
//! use market_data_client::models::news::RawNewsItem;
//! use news_aggregator::models::NewsQuery;
//! use news_aggregator::sources::{NewsSource, NewsSourceError};
//!
//! struct MySource;
//!
//! #[async_trait]
//! impl NewsSource for MySource {
//!     fn name(&self) -> &'static str {
//!         "my-source"
//!     }
//!
//!     async fn fetch(&self, _query: &NewsQuery) -> Result<Vec<RawNewsItem>, NewsSourceError> {
//!         Ok(vec![])
//!     }
//! }
//! ```
//!

pub mod provider_feed;
pub mod syndication;

use async_trait::async_trait;
use market_data_client::{models::news::RawNewsItem, providers::ProviderError};
use snafu::{Backtrace, Snafu};

use crate::models::NewsQuery;

/// Trait for fetching raw candidate news items from one upstream source.
///
/// Implementations are best-effort: they may fail, return fewer items than
/// their cap, or return items with absent fields. They must not filter or
/// repair content; that belongs to the aggregation pipeline.
#[async_trait]
pub trait NewsSource {
    /// Short stable name used in logs.
    fn name(&self) -> &'static str;

    /// Fetches raw candidate items for the query, in source order.
    async fn fetch(&self, query: &NewsQuery) -> Result<Vec<RawNewsItem>, NewsSourceError>;
}

/// Errors that can occur during the creation of a news source.
#[derive(Debug, Snafu)]
#[snafu(visibility(pub))]
pub enum NewsSourceInitError {
    /// failed to init reqwest client
    #[snafu(display("Failed to build HTTP client: {source}"))]
    ClientBuild {
        source: reqwest::Error,
        backtrace: Backtrace,
    },
}

/// Errors that can occur while fetching from a news source.
#[derive(Debug, Snafu)]
#[snafu(visibility(pub))]
pub enum NewsSourceError {
    /// network-level failure or timeout
    #[snafu(display("Feed request failed: {source}"))]
    Request {
        source: reqwest::Error,
        backtrace: Backtrace,
    },

    /// the feed answered with a non-success status
    #[snafu(display("Feed returned HTTP {status}"))]
    Status {
        status: reqwest::StatusCode,
        backtrace: Backtrace,
    },

    /// the underlying market data provider failed
    #[snafu(display("Provider news lookup failed: {source}"))]
    Provider {
        #[snafu(backtrace)]
        source: ProviderError,
    },
}
