//! Typed news items after validity filtering, and the ranked result set.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// The search inputs for one news collection pass.
#[derive(Debug, Clone, PartialEq)]
pub struct NewsQuery {
    /// Uppercase ticker symbol, e.g. "AAPL".
    pub ticker: String,

    /// Company display name used to widen feed queries. Callers fall back
    /// to the ticker when the name is unknown.
    pub company_name: String,
}

/// A news item that passed the ingestion boundary.
///
/// Unlike [`RawNewsItem`](market_data_client::models::news::RawNewsItem),
/// title and link are guaranteed present, non-empty, and non-placeholder.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NewsItem {
    /// Headline; never empty, never a placeholder, never a bare URL.
    pub title: String,

    /// Article URL; never empty, never a placeholder.
    pub link: String,

    /// Summary text. Repaired by the aggregation pipeline before display.
    pub summary: String,

    /// Publisher label; "Unknown" when the source supplied none.
    pub publisher: String,

    /// Publication time. Undated items are kept but rank last.
    pub published_at: Option<DateTime<Utc>>,
}

/// One aggregation run's output: ranked items plus how the sources behaved.
///
/// Zero items with `sources_failed > 0` means the run was degraded; zero
/// items with all sources ok means there genuinely was no news. Both are
/// success states.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct RankedNews {
    /// Ranked items, newest first, at most
    /// [`MAX_ITEMS`](crate::aggregate::MAX_ITEMS).
    pub items: Vec<NewsItem>,

    /// Sources that answered, even with zero items.
    pub sources_ok: usize,

    /// Sources that failed and were degraded to an empty batch.
    pub sources_failed: usize,
}

impl RankedNews {
    /// True when aggregation ran and nothing survived.
    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }
}
