//! Provider records to canonical [`TimeSeries`].
//!
//! Input is the provider's daily map: date string to a record of named string
//! fields. Both the stock layout (`4. close`, `5. adjusted close`, ...) and the
//! digital-currency layout (`4a. close (USD)`, ...) are recognized.

use chrono::NaiveDate;
use std::collections::BTreeMap;
use std::fmt;
use std::str::FromStr;
use tracing::{debug, warn};

use super::error::QuotefolioError;
use super::price_point::{PricePoint, TimeSeries};

/// Field name to raw string value for one date.
pub type RawRecord = BTreeMap<String, String>;

/// Date string to record, as delivered by the market-data provider.
pub type RawSeries = BTreeMap<String, RawRecord>;

pub const DATE_FORMAT: &str = "%Y-%m-%d";

pub const ADJUSTED_CLOSE_FIELD: &str = "5. adjusted close";
pub const SPLIT_COEFFICIENT_FIELD: &str = "8. split coefficient";
pub const CLOSE_FIELDS: [&str; 2] = ["4. close", "4a. close (USD)"];
pub const OPEN_FIELDS: [&str; 2] = ["1. open", "1a. open (USD)"];
pub const HIGH_FIELDS: [&str; 2] = ["2. high", "2a. high (USD)"];
pub const LOW_FIELDS: [&str; 2] = ["3. low", "3a. low (USD)"];

/// What to do with a record whose date or close cannot be parsed.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum MalformedRowPolicy {
    /// Abort the whole normalization with the first error.
    #[default]
    FailFast,
    /// Drop the offending record and keep going.
    Skip,
}

impl fmt::Display for MalformedRowPolicy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            MalformedRowPolicy::FailFast => write!(f, "fail"),
            MalformedRowPolicy::Skip => write!(f, "skip"),
        }
    }
}

impl FromStr for MalformedRowPolicy {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "fail" | "fail-fast" | "failfast" => Ok(MalformedRowPolicy::FailFast),
            "skip" => Ok(MalformedRowPolicy::Skip),
            other => Err(format!("unknown malformed row policy: {other}")),
        }
    }
}

/// Normalize with the default fail-fast policy.
pub fn normalize(raw: &RawSeries) -> Result<TimeSeries, QuotefolioError> {
    normalize_with(raw, MalformedRowPolicy::FailFast)
}

pub fn normalize_with(
    raw: &RawSeries,
    policy: MalformedRowPolicy,
) -> Result<TimeSeries, QuotefolioError> {
    let mut points = Vec::with_capacity(raw.len());

    for (date_key, record) in raw {
        match parse_row(date_key, record) {
            Ok(point) => points.push(point),
            Err(e) if policy == MalformedRowPolicy::Skip => {
                warn!(date = %date_key, error = %e, "skipping malformed row");
            }
            Err(e) => return Err(e),
        }
    }

    debug!(input = raw.len(), kept = points.len(), "normalized series");
    TimeSeries::from_points(points)
}

fn parse_row(date_key: &str, record: &RawRecord) -> Result<PricePoint, QuotefolioError> {
    let date = parse_date(date_key)?;

    let (field, value) = close_field(record).ok_or_else(|| QuotefolioError::MalformedPrice {
        date: date_key.to_string(),
        field: CLOSE_FIELDS[0].to_string(),
        value: String::new(),
    })?;
    let close = parse_price(value).ok_or_else(|| QuotefolioError::MalformedPrice {
        date: date_key.to_string(),
        field: field.to_string(),
        value: value.to_string(),
    })?;

    Ok(PricePoint {
        date,
        close,
        open: optional_field(date_key, record, &OPEN_FIELDS),
        high: optional_field(date_key, record, &HIGH_FIELDS),
        low: optional_field(date_key, record, &LOW_FIELDS),
        split_coefficient: optional_field(date_key, record, &[SPLIT_COEFFICIENT_FIELD]),
    })
}

pub fn parse_date(value: &str) -> Result<NaiveDate, QuotefolioError> {
    NaiveDate::parse_from_str(value.trim(), DATE_FORMAT).map_err(|e| {
        QuotefolioError::MalformedDate {
            value: value.to_string(),
            reason: e.to_string(),
        }
    })
}

/// Adjusted close wins whenever present; the provider has already applied
/// split and dividend adjustments to it.
fn close_field(record: &RawRecord) -> Option<(&str, &str)> {
    std::iter::once(ADJUSTED_CLOSE_FIELD)
        .chain(CLOSE_FIELDS)
        .find_map(|name| record.get(name).map(|v| (name, v.as_str())))
}

fn optional_field(date_key: &str, record: &RawRecord, names: &[&str]) -> Option<f64> {
    let (name, value) = names
        .iter()
        .find_map(|name| record.get(*name).map(|v| (*name, v)))?;
    let parsed = parse_price(value);
    if parsed.is_none() {
        debug!(date = %date_key, field = name, value = %value, "ignoring unparsable optional field");
    }
    parsed
}

pub(crate) fn parse_price(value: &str) -> Option<f64> {
    value.trim().parse::<f64>().ok().filter(|v| v.is_finite())
}
