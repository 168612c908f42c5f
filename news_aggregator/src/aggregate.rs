//! Merging, filtering, ranking and capping of raw news batches.
//!
//! This is the pure core of the crate: no IO, batches in, ranked items out.
//! Batch order matters twice. Duplicate articles keep their first
//! occurrence, and the ranking sort is stable, so items from earlier
//! sources win ties against later ones.

use std::collections::HashSet;

use chrono::DateTime;
use market_data_client::models::news::RawNewsItem;

use crate::{models::NewsItem, repair::repair_summary};

/// Most items surfaced to callers after ranking.
pub const MAX_ITEMS: usize = 15;

/// Placeholder titles some feeds emit instead of omitting the field.
const PLACEHOLDER_TITLES: [&str; 2] = ["No Title", "NO TITLE"];

/// Placeholder links some feeds emit instead of omitting the field.
const PLACEHOLDER_LINKS: [&str; 2] = ["No Link", "NO LINK"];

/// Merges raw batches into at most [`MAX_ITEMS`] ranked, repaired items.
///
/// Invalid entries are dropped, exact duplicates collapse to their first
/// occurrence, the rest sort newest first with undated items last, and each
/// surviving summary goes through [`repair_summary`].
pub fn aggregate(batches: &[Vec<RawNewsItem>], ticker: &str) -> Vec<NewsItem> {
    let mut items: Vec<NewsItem> = batches.iter().flatten().filter_map(admit).collect();

    let mut seen: HashSet<(String, String)> = HashSet::new();
    items.retain(|item| seen.insert((item.title.clone(), item.link.clone())));

    // Undated items carry the epoch as their sort key, ranking them last.
    items.sort_by_key(|item| std::cmp::Reverse(item.published_at.unwrap_or(DateTime::UNIX_EPOCH)));
    items.truncate(MAX_ITEMS);

    for item in &mut items {
        item.summary = repair_summary(&item.summary, &item.title, ticker);
    }

    items
}

/// Admission check at the ingestion boundary.
///
/// Feeds sometimes send placeholder text instead of omitting a field, and
/// some syndicated entries carry a URL where the headline should be; both
/// count as missing content here.
fn admit(raw: &RawNewsItem) -> Option<NewsItem> {
    let title = raw.title.as_deref().unwrap_or("").trim();
    let link = raw.link.as_deref().unwrap_or("").trim();

    if title.is_empty()
        || PLACEHOLDER_TITLES.contains(&title)
        || title.starts_with("http")
        || link.is_empty()
        || PLACEHOLDER_LINKS.contains(&link)
    {
        return None;
    }

    Some(NewsItem {
        title: title.to_string(),
        link: link.to_string(),
        summary: raw.summary.clone().unwrap_or_default(),
        publisher: raw
            .publisher
            .clone()
            .unwrap_or_else(|| "Unknown".to_string()),
        published_at: raw.published_at,
    })
}
