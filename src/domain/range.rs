//! Trailing chart windows.

use chrono::{Days, Months, NaiveDate};
use std::fmt;
use std::str::FromStr;

use super::price_point::TimeSeries;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum ChartRange {
    OneWeek,
    #[default]
    OneMonth,
    ThreeMonths,
    OneYear,
    All,
}

impl ChartRange {
    pub const ALL_RANGES: [ChartRange; 5] = [
        ChartRange::OneWeek,
        ChartRange::OneMonth,
        ChartRange::ThreeMonths,
        ChartRange::OneYear,
        ChartRange::All,
    ];

    /// Earliest date kept for a window ending at `as_of`, or `None` for `All`.
    ///
    /// Month arithmetic is calendar based and clamps to the last day of the
    /// target month (2024-03-31 minus one month is 2024-02-29).
    pub fn cutoff(&self, as_of: NaiveDate) -> Option<NaiveDate> {
        match self {
            ChartRange::OneWeek => as_of.checked_sub_days(Days::new(7)),
            ChartRange::OneMonth => as_of.checked_sub_months(Months::new(1)),
            ChartRange::ThreeMonths => as_of.checked_sub_months(Months::new(3)),
            ChartRange::OneYear => as_of.checked_sub_months(Months::new(12)),
            ChartRange::All => None,
        }
    }
}

impl fmt::Display for ChartRange {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let label = match self {
            ChartRange::OneWeek => "1W",
            ChartRange::OneMonth => "1M",
            ChartRange::ThreeMonths => "3M",
            ChartRange::OneYear => "1Y",
            ChartRange::All => "ALL",
        };
        write!(f, "{label}")
    }
}

impl FromStr for ChartRange {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_uppercase().as_str() {
            "1W" => Ok(ChartRange::OneWeek),
            "1M" => Ok(ChartRange::OneMonth),
            "3M" => Ok(ChartRange::ThreeMonths),
            "1Y" => Ok(ChartRange::OneYear),
            "ALL" => Ok(ChartRange::All),
            other => Err(format!("invalid chart range: {other}")),
        }
    }
}

/// Contiguous suffix of `series` dated on or after the range cutoff.
pub fn filter_range(series: &TimeSeries, range: ChartRange, as_of: NaiveDate) -> TimeSeries {
    match range.cutoff(as_of) {
        None => series.clone(),
        Some(cutoff) => {
            let start = series.points().partition_point(|p| p.date < cutoff);
            series.suffix(start)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::price_point::PricePoint;

    fn d(y: i32, m: u32, day: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, day).unwrap()
    }

    fn daily_series(start: NaiveDate, days: usize) -> TimeSeries {
        TimeSeries::from_points(
            (0..days)
                .map(|i| PricePoint::new(start + chrono::Duration::days(i as i64), 100.0 + i as f64))
                .collect(),
        )
        .unwrap()
    }

    #[test]
    fn cutoffs() {
        let as_of = d(2024, 1, 15);
        assert_eq!(ChartRange::OneWeek.cutoff(as_of), Some(d(2024, 1, 8)));
        assert_eq!(ChartRange::OneMonth.cutoff(as_of), Some(d(2023, 12, 15)));
        assert_eq!(ChartRange::ThreeMonths.cutoff(as_of), Some(d(2023, 10, 15)));
        assert_eq!(ChartRange::OneYear.cutoff(as_of), Some(d(2023, 1, 15)));
        assert_eq!(ChartRange::All.cutoff(as_of), None);
    }

    #[test]
    fn month_cutoff_clamps_to_month_end() {
        assert_eq!(
            ChartRange::OneMonth.cutoff(d(2024, 3, 31)),
            Some(d(2024, 2, 29))
        );
        assert_eq!(
            ChartRange::OneYear.cutoff(d(2024, 2, 29)),
            Some(d(2023, 2, 28))
        );
    }

    #[test]
    fn one_week_excludes_points_before_cutoff() {
        let series = daily_series(d(2024, 1, 1), 15);
        let filtered = filter_range(&series, ChartRange::OneWeek, d(2024, 1, 15));

        assert_eq!(filtered.first().unwrap().date, d(2024, 1, 8));
        assert_eq!(filtered.last().unwrap().date, d(2024, 1, 15));
        assert_eq!(filtered.len(), 8);
        assert!(filtered.iter().all(|p| p.date >= d(2024, 1, 8)));
    }

    #[test]
    fn all_returns_full_series() {
        let series = daily_series(d(2020, 1, 1), 30);
        let filtered = filter_range(&series, ChartRange::All, d(2024, 1, 15));
        assert_eq!(filtered, series);
    }

    #[test]
    fn no_points_in_window_is_empty() {
        let series = daily_series(d(2020, 1, 1), 30);
        let filtered = filter_range(&series, ChartRange::OneMonth, d(2024, 1, 15));
        assert!(filtered.is_empty());
    }

    #[test]
    fn points_after_as_of_are_kept() {
        let series = daily_series(d(2024, 1, 10), 10);
        let filtered = filter_range(&series, ChartRange::OneWeek, d(2024, 1, 15));
        assert_eq!(filtered.len(), series.len());
    }

    #[test]
    fn input_is_untouched() {
        let series = daily_series(d(2024, 1, 1), 15);
        let before = series.clone();
        let _ = filter_range(&series, ChartRange::OneWeek, d(2024, 1, 15));
        assert_eq!(series, before);
    }

    #[test]
    fn parse_and_display() {
        for range in ChartRange::ALL_RANGES {
            assert_eq!(range.to_string().parse::<ChartRange>(), Ok(range));
        }
        assert_eq!("all".parse::<ChartRange>(), Ok(ChartRange::All));
        assert!("5D".parse::<ChartRange>().is_err());
    }
}
