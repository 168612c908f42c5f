//! Raw news candidates as surfaced by a provider or feed, before aggregation.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// A candidate news item in permissive form.
///
/// Feeds routinely omit summaries, publishers, or timestamps, so every field
/// is optional here. Validity filtering and placeholder handling belong to
/// the aggregation pipeline, not to this type.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct RawNewsItem {
    /// Headline text.
    pub title: Option<String>,

    /// Canonical article URL.
    pub link: Option<String>,

    /// Summary or description, often HTML-laden.
    pub summary: Option<String>,

    /// Publisher or source label.
    pub publisher: Option<String>,

    /// Publication time (UTC).
    pub published_at: Option<DateTime<Utc>>,
}
