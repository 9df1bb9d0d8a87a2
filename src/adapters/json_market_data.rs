//! Market data from saved provider JSON responses.
//!
//! Files live in one directory as `<SYMBOL>_daily.json` and
//! `<SYMBOL>_intraday.json`, each holding the provider's full response body.

use serde_json::Value;
use std::fs;
use std::path::PathBuf;
use tracing::{debug, warn};

use crate::domain::error::QuotefolioError;
use crate::domain::holding::normalize_symbol;
use crate::domain::normalizer::{RawRecord, RawSeries};
use crate::ports::market_data_port::MarketDataPort;

const SERIES_KEY_PREFIX: &str = "Time Series";

pub struct JsonMarketData {
    base_path: PathBuf,
}

impl JsonMarketData {
    pub fn new(base_path: PathBuf) -> Self {
        Self { base_path }
    }

    fn file_path(&self, symbol: &str, kind: &str) -> PathBuf {
        self.base_path
            .join(format!("{}_{}.json", normalize_symbol(symbol), kind))
    }

    fn read_series(&self, symbol: &str, kind: &str) -> Result<RawSeries, QuotefolioError> {
        let path = self.file_path(symbol, kind);
        debug!(path = %path.display(), "reading provider response");
        let content = fs::read_to_string(&path).map_err(|e| QuotefolioError::Provider {
            symbol: symbol.to_string(),
            reason: format!("failed to read {}: {}", path.display(), e),
        })?;
        parse_response(symbol, &content)
    }
}

impl MarketDataPort for JsonMarketData {
    fn daily_series(&self, symbol: &str) -> Result<RawSeries, QuotefolioError> {
        self.read_series(symbol, "daily")
    }

    fn intraday_series(&self, symbol: &str) -> Result<RawSeries, QuotefolioError> {
        self.read_series(symbol, "intraday")
    }
}

/// Parses a response body. Invalid JSON is an error; valid JSON without a
/// time-series object (rate-limit notes, error messages) is an empty map.
pub fn parse_response(symbol: &str, body: &str) -> Result<RawSeries, QuotefolioError> {
    let value: Value = serde_json::from_str(body).map_err(|e| QuotefolioError::Provider {
        symbol: symbol.to_string(),
        reason: format!("invalid JSON: {}", e),
    })?;
    let series = extract_series(&value);
    if series.is_empty() {
        warn!(symbol, "provider response contains no time series");
    }
    Ok(series)
}

/// Pulls the first `Time Series ...` object out of a response.
pub fn extract_series(response: &Value) -> RawSeries {
    let Some(object) = response.as_object() else {
        return RawSeries::new();
    };
    let Some(entries) = object
        .iter()
        .find(|(key, _)| key.starts_with(SERIES_KEY_PREFIX))
        .and_then(|(_, v)| v.as_object())
    else {
        return RawSeries::new();
    };

    entries
        .iter()
        .map(|(date, fields)| (date.clone(), record_fields(fields)))
        .collect()
}

fn record_fields(fields: &Value) -> RawRecord {
    let Some(object) = fields.as_object() else {
        return RawRecord::new();
    };
    object
        .iter()
        .filter_map(|(name, value)| {
            let text = match value {
                Value::String(s) => s.clone(),
                Value::Number(n) => n.to_string(),
                _ => return None,
            };
            Some((name.clone(), text))
        })
        .collect()
}
