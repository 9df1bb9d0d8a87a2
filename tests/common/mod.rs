#![allow(dead_code)]

use chrono::NaiveDate;
use quotefolio::domain::ema::EmaSeries;
use quotefolio::domain::error::QuotefolioError;
use quotefolio::domain::normalizer::{RawRecord, RawSeries};
use quotefolio::domain::portfolio::Portfolio;
use quotefolio::domain::price_point::TimeSeries;
use quotefolio::domain::quote::Quote;
use quotefolio::domain::valuation::PortfolioValuation;
use quotefolio::ports::display_port::DisplaySink;
use quotefolio::ports::market_data_port::MarketDataPort;
use quotefolio::ports::portfolio_store_port::PortfolioStore;
use std::cell::RefCell;
use std::collections::HashMap;

pub struct MockMarketData {
    pub daily: HashMap<String, RawSeries>,
    pub intraday: HashMap<String, RawSeries>,
    pub errors: HashMap<String, String>,
}

impl MockMarketData {
    pub fn new() -> Self {
        Self {
            daily: HashMap::new(),
            intraday: HashMap::new(),
            errors: HashMap::new(),
        }
    }

    pub fn with_daily(mut self, symbol: &str, raw: RawSeries) -> Self {
        self.daily.insert(symbol.to_string(), raw);
        self
    }

    pub fn with_intraday(mut self, symbol: &str, raw: RawSeries) -> Self {
        self.intraday.insert(symbol.to_string(), raw);
        self
    }

    pub fn with_error(mut self, symbol: &str, reason: &str) -> Self {
        self.errors.insert(symbol.to_string(), reason.to_string());
        self
    }

    fn lookup(
        &self,
        map: &HashMap<String, RawSeries>,
        symbol: &str,
    ) -> Result<RawSeries, QuotefolioError> {
        if let Some(reason) = self.errors.get(symbol) {
            return Err(QuotefolioError::Provider {
                symbol: symbol.to_string(),
                reason: reason.clone(),
            });
        }
        Ok(map.get(symbol).cloned().unwrap_or_default())
    }
}

impl MarketDataPort for MockMarketData {
    fn daily_series(&self, symbol: &str) -> Result<RawSeries, QuotefolioError> {
        self.lookup(&self.daily, symbol)
    }

    fn intraday_series(&self, symbol: &str) -> Result<RawSeries, QuotefolioError> {
        self.lookup(&self.intraday, symbol)
    }
}

#[derive(Default)]
pub struct MemoryStore {
    pub portfolio: RefCell<Portfolio>,
    pub saves: RefCell<usize>,
}

impl MemoryStore {
    pub fn with(portfolio: Portfolio) -> Self {
        Self {
            portfolio: RefCell::new(portfolio),
            saves: RefCell::new(0),
        }
    }
}

impl PortfolioStore for MemoryStore {
    fn load(&self) -> Result<Portfolio, QuotefolioError> {
        Ok(self.portfolio.borrow().clone())
    }

    fn save(&self, portfolio: &Portfolio) -> Result<(), QuotefolioError> {
        *self.portfolio.borrow_mut() = portfolio.clone();
        *self.saves.borrow_mut() += 1;
        Ok(())
    }
}

#[derive(Default)]
pub struct RecordingSink {
    pub charts: Vec<(String, TimeSeries, Vec<EmaSeries>)>,
    pub valuations: Vec<PortfolioValuation>,
    pub quotes: Vec<(String, Option<Quote>)>,
}

impl DisplaySink for RecordingSink {
    fn chart(
        &mut self,
        symbol: &str,
        series: &TimeSeries,
        overlays: &[EmaSeries],
    ) -> Result<(), QuotefolioError> {
        self.charts
            .push((symbol.to_string(), series.clone(), overlays.to_vec()));
        Ok(())
    }

    fn valuation(&mut self, valuation: &PortfolioValuation) -> Result<(), QuotefolioError> {
        self.valuations.push(valuation.clone());
        Ok(())
    }

    fn quote(&mut self, symbol: &str, quote: Option<&Quote>) -> Result<(), QuotefolioError> {
        self.quotes.push((symbol.to_string(), quote.copied()));
        Ok(())
    }
}

pub fn date(y: i32, m: u32, d: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(y, m, d).unwrap()
}

pub fn close_record(close: f64) -> RawRecord {
    RawRecord::from([("4. close".to_string(), close.to_string())])
}

/// Daily provider map with one `4. close` record per calendar day.
pub fn generate_daily(start: &str, count: usize, start_price: f64) -> RawSeries {
    let start = NaiveDate::parse_from_str(start, "%Y-%m-%d").unwrap();
    (0..count)
        .map(|i| {
            let d = start + chrono::Duration::days(i as i64);
            (d.format("%Y-%m-%d").to_string(), close_record(start_price + i as f64))
        })
        .collect()
}

pub fn intraday_bar(timestamp: &str, open: f64, close: f64) -> (String, RawRecord) {
    (
        timestamp.to_string(),
        RawRecord::from([
            ("1. open".to_string(), open.to_string()),
            ("4. close".to_string(), close.to_string()),
        ]),
    )
}
