//! Chart view assembly: windowed series plus clipped EMA overlays.

use chrono::NaiveDate;

use super::ema::{ema_overlays, EmaSeries};
use super::error::QuotefolioError;
use super::price_point::TimeSeries;
use super::range::{filter_range, ChartRange};

/// View state supplied by the caller on every request.
#[derive(Debug, Clone, PartialEq)]
pub struct ChartRequest {
    pub symbol: String,
    pub range: ChartRange,
    /// End of the window. Defaults to the last date in the series.
    pub as_of: Option<NaiveDate>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct ChartView {
    pub series: TimeSeries,
    pub overlays: Vec<EmaSeries>,
    /// EMA periods longer than the full history.
    pub omitted: Vec<usize>,
}

/// EMAs are computed over the full history and then clipped to the window,
/// so a 200-day EMA still shows on a one-month chart.
pub fn build_chart(
    full: &TimeSeries,
    request: &ChartRequest,
    ema_periods: &[usize],
) -> Result<ChartView, QuotefolioError> {
    let Some(as_of) = request.as_of.or_else(|| full.last().map(|p| p.date)) else {
        return Ok(ChartView {
            series: TimeSeries::empty(),
            overlays: Vec::new(),
            omitted: ema_periods.to_vec(),
        });
    };

    let series = filter_range(full, request.range, as_of);
    let computed = ema_overlays(full, ema_periods)?;
    let overlays = match request.range.cutoff(as_of) {
        None => computed.series,
        Some(cutoff) => computed
            .series
            .into_iter()
            .map(|ema| EmaSeries {
                period: ema.period,
                points: ema.since(cutoff).to_vec(),
            })
            .collect(),
    };

    Ok(ChartView {
        series,
        overlays,
        omitted: computed.omitted,
    })
}
