//! Company profile and valuation fields reported alongside a quote.

use serde::{Deserialize, Serialize};

/// Sparse company metadata for a symbol.
///
/// Upstream profile coverage varies wildly by listing, so every field is
/// optional. Absence means "not available" and is never an error; consumers
/// render what is present and skip the rest.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct CompanyMetadata {
    /// Long display name (e.g., "Apple Inc.").
    pub name: Option<String>,

    /// Sector label from the company profile.
    pub sector: Option<String>,

    /// Market capitalization in the listing currency.
    pub market_cap: Option<u64>,

    /// Trailing price-to-earnings ratio.
    pub pe_ratio: Option<f64>,

    /// Beta versus the broad market.
    pub beta: Option<f64>,

    /// Dividend yield as a fraction (0.0052 = 0.52%).
    pub dividend_yield: Option<f64>,

    /// Long-form business summary paragraph.
    pub business_summary: Option<String>,
}

impl CompanyMetadata {
    /// True when no field is populated, the shape a degraded metadata fetch
    /// falls back to.
    pub fn is_empty(&self) -> bool {
        self.name.is_none()
            && self.sector.is_none()
            && self.market_cap.is_none()
            && self.pe_ratio.is_none()
            && self.beta.is_none()
            && self.dividend_yield.is_none()
            && self.business_summary.is_none()
    }
}
