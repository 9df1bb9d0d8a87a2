//! Market-data provider port.

use crate::domain::error::QuotefolioError;
use crate::domain::normalizer::RawSeries;

/// Source of raw provider maps. Fetching, retries and rate limiting live
/// behind this trait; the domain only sees fully materialized maps.
pub trait MarketDataPort {
    /// Daily records keyed by `YYYY-MM-DD`. A response without a series
    /// yields an empty map.
    fn daily_series(&self, symbol: &str) -> Result<RawSeries, QuotefolioError>;

    /// Intraday records keyed by `YYYY-MM-DD HH:MM:SS`.
    fn intraday_series(&self, symbol: &str) -> Result<RawSeries, QuotefolioError>;
}
