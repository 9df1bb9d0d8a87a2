//! Exponential Moving Average over a normalized series.
//!
//! k = 2/(n+1), seed with the SMA of the first n closes (dated at bar n-1),
//! then EMA[i] = (C[i] - EMA[i-1]) * k + EMA[i-1].
//! Unlike a chart-aligned indicator there are no warmup slots: the output
//! starts at the seed, so its length is `len - n + 1`.

use chrono::NaiveDate;
use std::fmt;
use tracing::debug;

use super::error::QuotefolioError;
use super::price_point::TimeSeries;

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct EmaPoint {
    pub date: NaiveDate,
    pub value: f64,
}

#[derive(Debug, Clone, PartialEq)]
pub struct EmaSeries {
    pub period: usize,
    pub points: Vec<EmaPoint>,
}

impl EmaSeries {
    pub fn len(&self) -> usize {
        self.points.len()
    }

    pub fn is_empty(&self) -> bool {
        self.points.is_empty()
    }

    pub fn value_on(&self, date: NaiveDate) -> Option<f64> {
        self.points
            .binary_search_by_key(&date, |p| p.date)
            .ok()
            .map(|i| self.points[i].value)
    }

    /// Points dated on or after `cutoff`.
    pub fn since(&self, cutoff: NaiveDate) -> &[EmaPoint] {
        let start = self.points.partition_point(|p| p.date < cutoff);
        &self.points[start..]
    }
}

impl fmt::Display for EmaSeries {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "EMA({})", self.period)
    }
}

pub fn smoothing_factor(period: usize) -> f64 {
    2.0 / (period as f64 + 1.0)
}

pub fn compute_ema(series: &TimeSeries, period: usize) -> Result<EmaSeries, QuotefolioError> {
    if period == 0 {
        return Err(QuotefolioError::InvalidPeriod { period });
    }
    if series.len() < period {
        return Err(QuotefolioError::InsufficientData {
            points: series.len(),
            period,
        });
    }

    let points = series.points();
    let k = smoothing_factor(period);
    let seed = points[..period].iter().map(|p| p.close).sum::<f64>() / period as f64;

    let mut values = Vec::with_capacity(points.len() - period + 1);
    values.push(EmaPoint {
        date: points[period - 1].date,
        value: seed,
    });

    let mut ema = seed;
    for point in &points[period..] {
        ema += (point.close - ema) * k;
        values.push(EmaPoint {
            date: point.date,
            value: ema,
        });
    }

    Ok(EmaSeries {
        period,
        points: values,
    })
}

/// Result of computing several EMA overlays for one series.
#[derive(Debug, Clone, Default)]
pub struct EmaOverlays {
    pub series: Vec<EmaSeries>,
    /// Periods longer than the available history.
    pub omitted: Vec<usize>,
}

/// Each period is computed independently; periods the series is too short
/// for are reported in `omitted` rather than failing the batch.
pub fn ema_overlays(
    series: &TimeSeries,
    periods: &[usize],
) -> Result<EmaOverlays, QuotefolioError> {
    let mut overlays = EmaOverlays::default();
    for &period in periods {
        match compute_ema(series, period) {
            Ok(ema) => overlays.series.push(ema),
            Err(QuotefolioError::InsufficientData { points, .. }) => {
                debug!(period, points, "omitting EMA overlay");
                overlays.omitted.push(period);
            }
            Err(e) => return Err(e),
        }
    }
    Ok(overlays)
}
