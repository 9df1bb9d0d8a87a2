//! Display sink that renders everything as CSV tables.

use std::io::Write;

use crate::domain::ema::EmaSeries;
use crate::domain::error::QuotefolioError;
use crate::domain::price_point::TimeSeries;
use crate::domain::quote::Quote;
use crate::domain::valuation::{PortfolioValuation, UnpricedReason};
use crate::ports::display_port::DisplaySink;

pub struct CsvSink<W: Write> {
    writer: csv::Writer<W>,
}

impl<W: Write> CsvSink<W> {
    pub fn new(inner: W) -> Self {
        let writer = csv::WriterBuilder::new().flexible(true).from_writer(inner);
        Self { writer }
    }

    pub fn into_inner(self) -> Result<W, QuotefolioError> {
        self.writer
            .into_inner()
            .map_err(|e| QuotefolioError::Io(e.into_error()))
    }

    fn row<I, S>(&mut self, fields: I) -> Result<(), QuotefolioError>
    where
        I: IntoIterator<Item = S>,
        S: AsRef<[u8]>,
    {
        self.writer
            .write_record(fields)
            .map_err(|e| QuotefolioError::Io(e.into()))
    }
}

const VALUATION_HEADER: [&str; 8] = [
    "symbol",
    "shares",
    "cost_basis",
    "price",
    "market_value",
    "pnl",
    "pnl_percent",
    "note",
];

fn money(value: f64) -> String {
    format!("{:.2}", value)
}

impl<W: Write> DisplaySink for CsvSink<W> {
    fn chart(
        &mut self,
        _symbol: &str,
        series: &TimeSeries,
        overlays: &[EmaSeries],
    ) -> Result<(), QuotefolioError> {
        let mut header = vec!["date".to_string(), "close".to_string()];
        header.extend(overlays.iter().map(|o| format!("ema_{}", o.period)));
        self.row(&header)?;

        for point in series {
            let mut fields = vec![point.date.to_string(), money(point.close)];
            fields.extend(
                overlays
                    .iter()
                    .map(|o| o.value_on(point.date).map(money).unwrap_or_default()),
            );
            self.row(&fields)?;
        }
        self.writer.flush()?;
        Ok(())
    }

    fn valuation(&mut self, valuation: &PortfolioValuation) -> Result<(), QuotefolioError> {
        self.row(VALUATION_HEADER)?;

        for p in &valuation.positions {
            let (pnl_percent, note) = if p.cost_basis_available {
                (money(p.pnl_percent), "")
            } else {
                ("n/a".to_string(), "no cost basis")
            };
            self.row([
                p.symbol.clone(),
                p.shares.to_string(),
                money(p.cost_basis),
                money(p.current_price),
                money(p.market_value),
                money(p.pnl),
                pnl_percent,
                note.to_string(),
            ])?;
        }

        for u in &valuation.unpriced {
            let note = match &u.reason {
                UnpricedReason::NoQuote => "no quote".to_string(),
                UnpricedReason::InvalidPrice(price) => format!("invalid price {price}"),
                UnpricedReason::MalformedData(reason) => format!("malformed data: {reason}"),
            };
            self.row([
                u.symbol.clone(),
                u.shares.to_string(),
                money(u.cost_basis),
                String::new(),
                String::new(),
                String::new(),
                String::new(),
                note,
            ])?;
        }

        let s = &valuation.summary;
        self.row([
            "TOTAL".to_string(),
            String::new(),
            money(s.total_cost),
            String::new(),
            money(s.total_value),
            money(s.total_pnl),
            money(s.total_pnl_percent),
            String::new(),
        ])?;
        self.writer.flush()?;
        Ok(())
    }

    fn quote(&mut self, symbol: &str, quote: Option<&Quote>) -> Result<(), QuotefolioError> {
        self.row(["symbol", "timestamp", "price", "change_percent"])?;
        match quote {
            Some(q) => self.row([
                symbol.to_string(),
                q.timestamp.to_string(),
                money(q.price),
                money(q.change_percent),
            ])?,
            None => self.row([symbol, "", "", ""])?,
        }
        self.writer.flush()?;
        Ok(())
    }
}
