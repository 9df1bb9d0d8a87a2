//! CLI definition and dispatch.

use chrono::NaiveDate;
use clap::{Parser, Subcommand};
use std::collections::HashMap;
use std::path::PathBuf;
use std::process::ExitCode;
use tracing::{debug, info, warn};

use crate::adapters::csv_portfolio_store::CsvPortfolioStore;
use crate::adapters::csv_sink::CsvSink;
use crate::adapters::file_config_adapter::FileConfigAdapter;
use crate::adapters::json_market_data::JsonMarketData;
use crate::domain::chart::{build_chart, ChartRequest, ChartView};
use crate::domain::config::DashboardConfig;
use crate::domain::error::QuotefolioError;
use crate::domain::holding::Holding;
use crate::domain::normalizer::{normalize_with, MalformedRowPolicy};
use crate::domain::quote::{latest_quote, Quote};
use crate::domain::range::ChartRange;
use crate::domain::valuation::{value_portfolio_with_failures, PortfolioValuation};
use crate::ports::display_port::DisplaySink;
use crate::ports::market_data_port::MarketDataPort;
use crate::ports::portfolio_store_port::PortfolioStore;

#[derive(Parser, Debug)]
#[command(name = "quotefolio", about = "Price charts, EMAs and portfolio P&L from saved market data")]
pub struct Cli {
    /// Enable debug logging
    #[arg(short, long, global = true)]
    pub verbose: bool,

    #[command(subcommand)]
    pub command: Command,
}

#[derive(Subcommand, Debug)]
pub enum Command {
    /// Print a daily price chart with EMA overlays as CSV
    Chart {
        #[arg(short, long)]
        config: PathBuf,
        #[arg(short, long)]
        symbol: String,
        /// 1W, 1M, 3M, 1Y or ALL
        #[arg(short, long)]
        range: Option<ChartRange>,
        /// End of the window (YYYY-MM-DD); defaults to the latest close
        #[arg(long)]
        as_of: Option<NaiveDate>,
    },
    /// Print the latest intraday quote
    Quote {
        #[arg(short, long)]
        config: PathBuf,
        #[arg(short, long)]
        symbol: String,
    },
    /// Inspect or edit holdings
    Portfolio {
        #[command(subcommand)]
        action: PortfolioAction,
    },
}

#[derive(Subcommand, Debug)]
pub enum PortfolioAction {
    /// Value every holding and print positions and totals
    Show {
        #[arg(short, long)]
        config: PathBuf,
        /// Price holdings at the last daily close on or before this date
        #[arg(long)]
        as_of: Option<NaiveDate>,
    },
    /// Add a new holding
    Add {
        #[arg(short, long)]
        config: PathBuf,
        symbol: String,
        #[arg(long)]
        shares: f64,
        #[arg(long)]
        cost_basis: f64,
    },
    /// Replace shares and cost basis of an existing holding
    Update {
        #[arg(short, long)]
        config: PathBuf,
        symbol: String,
        #[arg(long)]
        shares: f64,
        #[arg(long)]
        cost_basis: f64,
    },
    /// Remove a holding
    Remove {
        #[arg(short, long)]
        config: PathBuf,
        symbol: String,
    },
}

pub fn run(cli: Cli) -> ExitCode {
    match dispatch(cli.command) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("error: {e}");
            (&e).into()
        }
    }
}

fn dispatch(command: Command) -> Result<(), QuotefolioError> {
    let mut sink = CsvSink::new(std::io::stdout().lock());
    match command {
        Command::Chart {
            config,
            symbol,
            range,
            as_of,
        } => {
            let config = load_config(&config)?;
            let market = JsonMarketData::new(config.data_dir.clone());
            let request = ChartRequest {
                symbol,
                range: range.unwrap_or(config.default_range),
                as_of,
            };
            run_chart(&market, &mut sink, &config, &request).map(|_| ())
        }
        Command::Quote { config, symbol } => {
            let config = load_config(&config)?;
            let market = JsonMarketData::new(config.data_dir.clone());
            run_quote(&market, &mut sink, &symbol).map(|_| ())
        }
        Command::Portfolio { action } => run_portfolio_action(action, &mut sink),
    }
}

fn run_portfolio_action(
    action: PortfolioAction,
    sink: &mut dyn DisplaySink,
) -> Result<(), QuotefolioError> {
    match action {
        PortfolioAction::Show { config, as_of } => {
            let config = load_config(&config)?;
            let market = JsonMarketData::new(config.data_dir.clone());
            let store = CsvPortfolioStore::new(config.portfolio_path.clone());
            run_show(&market, &store, sink, config.malformed_rows, as_of).map(|_| ())
        }
        PortfolioAction::Add {
            config,
            symbol,
            shares,
            cost_basis,
        } => {
            let store = portfolio_store(&config)?;
            add_holding(&store, Holding::new(&symbol, shares, cost_basis)?)
        }
        PortfolioAction::Update {
            config,
            symbol,
            shares,
            cost_basis,
        } => {
            let store = portfolio_store(&config)?;
            update_holding(&store, Holding::new(&symbol, shares, cost_basis)?)
        }
        PortfolioAction::Remove { config, symbol } => {
            let store = portfolio_store(&config)?;
            remove_holding(&store, &symbol)
        }
    }
}

pub fn load_config(path: &PathBuf) -> Result<DashboardConfig, QuotefolioError> {
    info!("Loading config from {}", path.display());
    let adapter =
        FileConfigAdapter::from_file(path).map_err(|e| QuotefolioError::ConfigParse {
            file: path.display().to_string(),
            reason: e.to_string(),
        })?;
    DashboardConfig::from_port(&adapter)
}

fn portfolio_store(config_path: &PathBuf) -> Result<CsvPortfolioStore, QuotefolioError> {
    let config = load_config(config_path)?;
    Ok(CsvPortfolioStore::new(config.portfolio_path))
}

pub fn run_chart(
    market: &dyn MarketDataPort,
    sink: &mut dyn DisplaySink,
    config: &DashboardConfig,
    request: &ChartRequest,
) -> Result<ChartView, QuotefolioError> {
    info!(symbol = %request.symbol, range = %request.range, "building chart");
    let raw = market.daily_series(&request.symbol)?;
    let full = normalize_with(&raw, config.malformed_rows)?;
    if full.is_empty() {
        warn!(symbol = %request.symbol, "no daily data");
    }

    let view = build_chart(&full, request, &config.ema_periods)?;
    for period in &view.omitted {
        warn!(
            symbol = %request.symbol,
            period,
            points = full.len(),
            "not enough history for EMA overlay"
        );
    }

    sink.chart(&request.symbol, &view.series, &view.overlays)?;
    Ok(view)
}

pub fn run_quote(
    market: &dyn MarketDataPort,
    sink: &mut dyn DisplaySink,
    symbol: &str,
) -> Result<Option<Quote>, QuotefolioError> {
    let quote = latest_quote(&market.intraday_series(symbol)?)?;
    if quote.is_none() {
        warn!(symbol, "no intraday data");
    }
    sink.quote(symbol, quote.as_ref())?;
    Ok(quote)
}

/// Current price for one symbol: latest intraday close when no date is
/// pinned, otherwise (or when intraday data is unavailable) the last daily
/// close on or before `as_of`.
///
/// A provider failure or an empty history is `Ok(None)`. A daily history that
/// fails normalization is an error, so callers can tell bad data from a
/// missing quote.
pub fn current_price(
    market: &dyn MarketDataPort,
    symbol: &str,
    policy: MalformedRowPolicy,
    as_of: Option<NaiveDate>,
) -> Result<Option<f64>, QuotefolioError> {
    if as_of.is_none() {
        match market
            .intraday_series(symbol)
            .and_then(|raw| latest_quote(&raw))
        {
            Ok(Some(quote)) => return Ok(Some(quote.price)),
            Ok(None) => debug!(symbol, "no intraday bars, falling back to daily"),
            Err(e) => debug!(symbol, error = %e, "intraday unavailable, falling back to daily"),
        }
    }

    let raw = match market.daily_series(symbol) {
        Ok(raw) => raw,
        Err(e) => {
            warn!(symbol, error = %e, "no price available");
            return Ok(None);
        }
    };
    let series = normalize_with(&raw, policy)?;
    Ok(series
        .iter()
        .rev()
        .find(|p| as_of.is_none_or(|d| p.date <= d))
        .map(|p| p.close))
}

pub fn run_show(
    market: &dyn MarketDataPort,
    store: &dyn PortfolioStore,
    sink: &mut dyn DisplaySink,
    policy: MalformedRowPolicy,
    as_of: Option<NaiveDate>,
) -> Result<PortfolioValuation, QuotefolioError> {
    let portfolio = store.load()?;
    info!(holdings = portfolio.len(), "valuing portfolio");

    let mut prices = HashMap::new();
    let mut bad_data = HashMap::new();
    for symbol in portfolio.symbols() {
        match current_price(market, symbol, policy, as_of) {
            Ok(Some(price)) => {
                prices.insert(symbol.to_string(), price);
            }
            Ok(None) => {}
            Err(e) => {
                warn!(symbol, error = %e, "price history is malformed");
                bad_data.insert(symbol.to_string(), e.to_string());
            }
        }
    }

    let valuation = value_portfolio_with_failures(&portfolio, &prices, &bad_data);
    sink.valuation(&valuation)?;
    Ok(valuation)
}

pub fn add_holding(store: &dyn PortfolioStore, holding: Holding) -> Result<(), QuotefolioError> {
    let mut portfolio = store.load()?;
    info!(symbol = %holding.symbol, "adding holding");
    portfolio.add(holding)?;
    store.save(&portfolio)
}

pub fn update_holding(store: &dyn PortfolioStore, holding: Holding) -> Result<(), QuotefolioError> {
    let mut portfolio = store.load()?;
    info!(symbol = %holding.symbol, "updating holding");
    portfolio.update(holding)?;
    store.save(&portfolio)
}

pub fn remove_holding(store: &dyn PortfolioStore, symbol: &str) -> Result<(), QuotefolioError> {
    let mut portfolio = store.load()?;
    let removed = portfolio.remove(symbol)?;
    info!(symbol = %removed.symbol, "removed holding");
    store.save(&portfolio)
}
