//! Display sink port.

use crate::domain::ema::EmaSeries;
use crate::domain::error::QuotefolioError;
use crate::domain::price_point::TimeSeries;
use crate::domain::quote::Quote;
use crate::domain::valuation::PortfolioValuation;

/// Consumer of computed series and valuations. Rendering is entirely the
/// sink's business.
pub trait DisplaySink {
    /// `overlays` may start later than `series` (EMA warmup) but never
    /// earlier.
    fn chart(
        &mut self,
        symbol: &str,
        series: &TimeSeries,
        overlays: &[EmaSeries],
    ) -> Result<(), QuotefolioError>;

    fn valuation(&mut self, valuation: &PortfolioValuation) -> Result<(), QuotefolioError>;

    fn quote(&mut self, symbol: &str, quote: Option<&Quote>) -> Result<(), QuotefolioError>;
}
