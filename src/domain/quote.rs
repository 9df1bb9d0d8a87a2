//! Latest price from an intraday provider map.

use chrono::NaiveDateTime;

use super::error::QuotefolioError;
use super::normalizer::{parse_price, RawSeries, CLOSE_FIELDS, OPEN_FIELDS};

pub const INTRADAY_FORMAT: &str = "%Y-%m-%d %H:%M:%S";

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Quote {
    pub timestamp: NaiveDateTime,
    pub price: f64,
    /// Move from the bar's open to its close, in percent.
    pub change_percent: f64,
}

/// Quote from the most recent intraday bar, `None` when the map is empty.
///
/// Keys that do not parse as timestamps are ignored when picking the latest
/// bar; only the chosen bar's prices must be valid.
pub fn latest_quote(intraday: &RawSeries) -> Result<Option<Quote>, QuotefolioError> {
    let latest = intraday
        .iter()
        .filter_map(|(key, record)| {
            NaiveDateTime::parse_from_str(key.trim(), INTRADAY_FORMAT)
                .ok()
                .map(|ts| (ts, key, record))
        })
        .max_by_key(|(ts, _, _)| *ts);

    let Some((timestamp, key, record)) = latest else {
        return Ok(None);
    };

    let price_of = |fields: &[&str]| -> Result<f64, QuotefolioError> {
        let (field, value) = fields
            .iter()
            .find_map(|f| record.get(*f).map(|v| (*f, v.as_str())))
            .unwrap_or((fields[0], ""));
        parse_price(value).ok_or_else(|| QuotefolioError::MalformedPrice {
            date: key.clone(),
            field: field.to_string(),
            value: value.to_string(),
        })
    };

    let price = price_of(&CLOSE_FIELDS)?;
    let open = price_of(&OPEN_FIELDS)?;
    let change_percent = if open != 0.0 {
        (price - open) / open * 100.0
    } else {
        0.0
    };

    Ok(Some(Quote {
        timestamp,
        price,
        change_percent,
    }))
}
