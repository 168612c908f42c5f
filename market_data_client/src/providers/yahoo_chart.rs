//! Market data over the public Yahoo chart, quote-summary, and search
//! JSON endpoints. Keyless, rate limited, best effort.

pub mod params;
pub mod provider;
pub mod response;

pub use provider::{ClientOptions, YahooChartProvider};
