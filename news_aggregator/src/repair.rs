//! Heuristic summary repair.
//!
//! Upstream feeds frequently return empty, HTML-laden, or title-duplicate
//! summaries, and the product goal is "always show substantive text" rather
//! than surfacing empty content. Weak summaries are replaced from a small
//! keyword-matched template table, then every summary is normalized to at
//! most two sentences and 250 characters. The repair is lossy and
//! approximate on purpose.

use crate::sanitize::{decode_entities, strip_tags};

/// Cleaned summaries shorter than this are considered too thin to show.
pub const MIN_SUMMARY_CHARS: usize = 50;

/// Hard cap on repaired summary length, in characters.
pub const MAX_SUMMARY_CHARS: usize = 250;

/// One synthesis rule: if any keyword appears in the lowercased title, the
/// two sentences below replace the summary. `{ticker}` in the lead is
/// substituted with the symbol.
struct SummaryTemplate {
    keywords: &'static [&'static str],
    lead: &'static str,
    follow_up: &'static str,
}

/// Evaluated in order; first match wins.
const TEMPLATES: &[SummaryTemplate] = &[
    SummaryTemplate {
        keywords: &["stock", "shares"],
        lead: "Latest market analysis and trading insights for {ticker}.",
        follow_up: "Investors are monitoring key developments and price movements in the stock.",
    },
    SummaryTemplate {
        keywords: &["earnings", "revenue"],
        lead: "Financial performance update for {ticker}.",
        follow_up: "Analysts review quarterly results and provide market outlook.",
    },
    SummaryTemplate {
        keywords: &["investment", "fund"],
        lead: "Investment activity and institutional interest in {ticker}.",
        follow_up: "Market participants assess portfolio allocation strategies.",
    },
];

const DEFAULT_TEMPLATE: SummaryTemplate = SummaryTemplate {
    keywords: &[],
    lead: "Breaking news and market updates for {ticker}.",
    follow_up: "Financial markets react to latest corporate developments.",
};

/// Cleans one summary and replaces it when it is too weak to show.
///
/// Steps: strip tags, decode entities, trim; synthesize from the template
/// table when the cleaned text is empty, case-insensitively equal to the
/// title, or shorter than [`MIN_SUMMARY_CHARS`]; keep the first two
/// sentences; guarantee a trailing period; hard-cut at
/// [`MAX_SUMMARY_CHARS`].
pub fn repair_summary(summary: &str, title: &str, ticker: &str) -> String {
    let cleaned = decode_entities(&strip_tags(summary));
    let cleaned = cleaned.trim();

    let base = if is_too_weak(cleaned, title) {
        synthesize_summary(title, ticker)
    } else {
        cleaned.to_string()
    };

    let two_sentences = first_two_sentences(&base);
    truncate_chars(&two_sentences, MAX_SUMMARY_CHARS)
}

fn is_too_weak(cleaned: &str, title: &str) -> bool {
    cleaned.is_empty()
        || cleaned.to_lowercase() == title.to_lowercase()
        || cleaned.chars().count() < MIN_SUMMARY_CHARS
}

fn synthesize_summary(title: &str, ticker: &str) -> String {
    let title_lower = title.to_lowercase();
    let template = TEMPLATES
        .iter()
        .find(|t| t.keywords.iter().any(|kw| title_lower.contains(kw)))
        .unwrap_or(&DEFAULT_TEMPLATE);
    format!(
        "{} {}",
        template.lead.replace("{ticker}", ticker),
        template.follow_up
    )
}

/// Keeps at most the first two sentence-delimited segments and guarantees
/// a trailing period.
fn first_two_sentences(text: &str) -> String {
    let mut parts = text.splitn(3, ". ");
    let first = parts.next().unwrap_or_default();
    let mut result = match parts.next() {
        Some(second) => format!("{first}. {second}"),
        None => first.to_string(),
    };
    if !result.ends_with('.') {
        result.push('.');
    }
    result
}

/// Hard cut at `max` characters (not bytes), marking the cut with an
/// ellipsis.
fn truncate_chars(text: &str, max: usize) -> String {
    if text.chars().count() <= max {
        return text.to_string();
    }
    let cut: String = text.chars().take(max - 3).collect();
    format!("{cut}...")
}

#[cfg(test)]
mod tests {
    use proptest::prelude::*;

    use super::*;

    #[test]
    fn substantive_summary_passes_through() {
        let summary = "Apple reported record services revenue for the quarter, \
                       beating analyst expectations across every region.";
        let repaired = repair_summary(summary, "Apple beats expectations", "AAPL");
        assert!(repaired.starts_with("Apple reported record services revenue"));
        assert!(repaired.ends_with('.'));
    }

    #[test]
    fn html_and_entities_are_cleaned_before_judging() {
        let summary = "<p>Apple&nbsp;&amp;&nbsp;suppliers extend gains as iPhone \
                       demand holds up better than feared this quarter.</p>";
        let repaired = repair_summary(summary, "Apple gains", "AAPL");
        assert!(repaired.starts_with("Apple & suppliers extend gains"));
        assert!(!repaired.contains('<'));
    }

    #[test]
    fn empty_summary_synthesizes_from_title_keywords() {
        let repaired = repair_summary("", "AAPL shares jump after upgrade", "AAPL");
        assert_eq!(
            repaired,
            "Latest market analysis and trading insights for AAPL. Investors are \
             monitoring key developments and price movements in the stock."
        );
    }

    #[test]
    fn title_echo_synthesizes() {
        let title = "Quarterly earnings preview for the market";
        let repaired = repair_summary(title, title, "MSFT");
        assert!(repaired.starts_with("Financial performance update for MSFT."));
    }

    #[test]
    fn keyword_table_is_ordered_first_match_wins() {
        // "stock" appears before "earnings" in the table, so it wins even
        // though both keywords occur.
        let repaired = repair_summary("", "Stock slides ahead of earnings", "TSLA");
        assert!(repaired.starts_with("Latest market analysis and trading insights for TSLA."));
    }

    #[test]
    fn unmatched_title_gets_default_template() {
        let repaired = repair_summary("", "Regulators circle the industry", "GOOGL");
        assert_eq!(
            repaired,
            "Breaking news and market updates for GOOGL. Financial markets react \
             to latest corporate developments."
        );
    }

    #[test]
    fn long_summaries_are_cut_to_two_sentences() {
        let summary = "First sentence runs long enough to clear the minimum length \
                       bar comfortably. Second sentence adds considerably more \
                       detail about it. Third sentence must disappear.";
        let repaired = repair_summary(summary, "unrelated title", "AAPL");
        assert_eq!(
            repaired,
            "First sentence runs long enough to clear the minimum length bar \
             comfortably. Second sentence adds considerably more detail about it."
        );
    }

    #[test]
    fn oversized_text_is_cut_at_the_character_cap() {
        let summary = format!("{}. {}", "a".repeat(200), "b".repeat(200));
        let repaired = repair_summary(&summary, "unrelated title", "AAPL");
        assert_eq!(repaired.chars().count(), MAX_SUMMARY_CHARS);
        assert!(repaired.ends_with("..."));
    }

    #[test]
    fn multibyte_text_is_cut_on_character_boundaries() {
        let summary = "é".repeat(300);
        let repaired = repair_summary(&summary, "unrelated title", "AAPL");
        assert_eq!(repaired.chars().count(), MAX_SUMMARY_CHARS);
    }

    proptest! {
        #[test]
        fn repaired_summary_is_bounded_and_terminated(
            summary in ".{0,400}",
            title in "[a-zA-Z ]{1,80}",
        ) {
            let repaired = repair_summary(&summary, &title, "AAPL");
            prop_assert!(repaired.chars().count() <= MAX_SUMMARY_CHARS);
            prop_assert!(repaired.ends_with('.') || repaired.ends_with("..."));
            prop_assert!(!repaired.is_empty());
        }
    }
}
