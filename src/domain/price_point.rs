//! Price points and normalized daily series.

use chrono::NaiveDate;

use super::error::QuotefolioError;

/// One trading day. `open`/`high`/`low` are carried when the provider supplies
/// them so candlestick sinks can use them; `split_coefficient` is bookkeeping
/// only and never feeds back into `close`.
#[derive(Debug, Clone, PartialEq)]
pub struct PricePoint {
    pub date: NaiveDate,
    pub close: f64,
    pub open: Option<f64>,
    pub high: Option<f64>,
    pub low: Option<f64>,
    pub split_coefficient: Option<f64>,
}

impl PricePoint {
    pub fn new(date: NaiveDate, close: f64) -> Self {
        PricePoint {
            date,
            close,
            open: None,
            high: None,
            low: None,
            split_coefficient: None,
        }
    }
}

/// Ascending, duplicate-free sequence of [`PricePoint`]s.
///
/// There is no mutating API: a refreshed fetch produces a new series.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct TimeSeries {
    points: Vec<PricePoint>,
}

impl TimeSeries {
    pub fn empty() -> Self {
        TimeSeries { points: Vec::new() }
    }

    /// Sorts `points` by date and rejects repeated dates.
    pub fn from_points(mut points: Vec<PricePoint>) -> Result<Self, QuotefolioError> {
        points.sort_by_key(|p| p.date);
        if let Some(pair) = points.windows(2).find(|w| w[0].date == w[1].date) {
            return Err(QuotefolioError::DuplicateDate { date: pair[0].date });
        }
        Ok(TimeSeries { points })
    }

    pub fn points(&self) -> &[PricePoint] {
        &self.points
    }

    pub fn len(&self) -> usize {
        self.points.len()
    }

    pub fn is_empty(&self) -> bool {
        self.points.is_empty()
    }

    pub fn first(&self) -> Option<&PricePoint> {
        self.points.first()
    }

    pub fn last(&self) -> Option<&PricePoint> {
        self.points.last()
    }

    pub fn iter(&self) -> std::slice::Iter<'_, PricePoint> {
        self.points.iter()
    }

    pub fn closes(&self) -> Vec<f64> {
        self.points.iter().map(|p| p.close).collect()
    }

    /// Points from index `start` onward. Any suffix of an ordered series is
    /// itself ordered, so no re-validation is needed.
    pub(crate) fn suffix(&self, start: usize) -> TimeSeries {
        TimeSeries {
            points: self.points[start.min(self.points.len())..].to_vec(),
        }
    }
}

impl<'a> IntoIterator for &'a TimeSeries {
    type Item = &'a PricePoint;
    type IntoIter = std::slice::Iter<'a, PricePoint>;

    fn into_iter(self) -> Self::IntoIter {
        self.points.iter()
    }
}
