//! Mark-to-market of holdings and portfolio totals.

use std::collections::HashMap;
use tracing::warn;

use super::error::QuotefolioError;
use super::holding::Holding;
use super::portfolio::Portfolio;

#[derive(Debug, Clone, PartialEq)]
pub struct PricedPosition {
    pub symbol: String,
    pub shares: f64,
    pub cost_basis: f64,
    pub current_price: f64,
    pub market_value: f64,
    pub pnl: f64,
    pub pnl_percent: f64,
    /// False when cost basis is zero; `pnl_percent` is then reported as 0.
    pub cost_basis_available: bool,
}

impl PricedPosition {
    pub fn total_cost(&self) -> f64 {
        self.shares * self.cost_basis
    }

    pub fn is_gain(&self) -> bool {
        self.pnl >= 0.0
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct PortfolioSummary {
    pub total_value: f64,
    pub total_cost: f64,
    pub total_pnl: f64,
    pub total_pnl_percent: f64,
}

pub fn price_holding(
    holding: &Holding,
    current_price: f64,
) -> Result<PricedPosition, QuotefolioError> {
    if !current_price.is_finite() || current_price < 0.0 {
        return Err(QuotefolioError::InvalidPrice {
            symbol: holding.symbol.clone(),
            price: current_price,
        });
    }

    let market_value = holding.shares * current_price;
    let pnl = market_value - holding.total_cost();
    let cost_basis_available = holding.cost_basis > 0.0;
    let pnl_percent = if cost_basis_available {
        (current_price - holding.cost_basis) / holding.cost_basis * 100.0
    } else {
        0.0
    };

    Ok(PricedPosition {
        symbol: holding.symbol.clone(),
        shares: holding.shares,
        cost_basis: holding.cost_basis,
        current_price,
        market_value,
        pnl,
        pnl_percent,
        cost_basis_available,
    })
}

pub fn summarize(positions: &[PricedPosition]) -> PortfolioSummary {
    let total_value: f64 = positions.iter().map(|p| p.market_value).sum();
    let total_cost: f64 = positions.iter().map(|p| p.total_cost()).sum();
    let total_pnl = total_value - total_cost;
    let total_pnl_percent = if total_cost > 0.0 {
        total_pnl / total_cost * 100.0
    } else {
        0.0
    };

    PortfolioSummary {
        total_value,
        total_cost,
        total_pnl,
        total_pnl_percent,
    }
}

#[derive(Debug, Clone, PartialEq)]
pub enum UnpricedReason {
    NoQuote,
    InvalidPrice(f64),
    /// The price history exists but could not be normalized.
    MalformedData(String),
}

#[derive(Debug, Clone, PartialEq)]
pub struct UnpricedHolding {
    pub symbol: String,
    pub shares: f64,
    pub cost_basis: f64,
    pub reason: UnpricedReason,
}

impl UnpricedHolding {
    pub fn new(holding: &Holding, reason: UnpricedReason) -> Self {
        UnpricedHolding {
            symbol: holding.symbol.clone(),
            shares: holding.shares,
            cost_basis: holding.cost_basis,
            reason,
        }
    }
}

/// Priced positions in portfolio order, holdings that could not be priced,
/// and totals over the priced ones only.
#[derive(Debug, Clone, PartialEq)]
pub struct PortfolioValuation {
    pub positions: Vec<PricedPosition>,
    pub unpriced: Vec<UnpricedHolding>,
    pub summary: PortfolioSummary,
}

pub fn value_portfolio(portfolio: &Portfolio, prices: &HashMap<String, f64>) -> PortfolioValuation {
    value_portfolio_with_failures(portfolio, prices, &HashMap::new())
}

/// Like [`value_portfolio`], but holdings listed in `bad_data` (symbol to
/// reason) are reported as [`UnpricedReason::MalformedData`] instead of
/// [`UnpricedReason::NoQuote`] when they have no price.
pub fn value_portfolio_with_failures(
    portfolio: &Portfolio,
    prices: &HashMap<String, f64>,
    bad_data: &HashMap<String, String>,
) -> PortfolioValuation {
    let mut positions = Vec::with_capacity(portfolio.len());
    let mut unpriced = Vec::new();

    for holding in portfolio.holdings() {
        let Some(&price) = prices.get(&holding.symbol) else {
            let reason = match bad_data.get(&holding.symbol) {
                Some(reason) => UnpricedReason::MalformedData(reason.clone()),
                None => UnpricedReason::NoQuote,
            };
            unpriced.push(UnpricedHolding::new(holding, reason));
            continue;
        };
        match price_holding(holding, price) {
            Ok(position) => positions.push(position),
            Err(e) => {
                warn!(symbol = %holding.symbol, error = %e, "leaving holding unpriced");
                unpriced.push(UnpricedHolding::new(
                    holding,
                    UnpricedReason::InvalidPrice(price),
                ));
            }
        }
    }

    let summary = summarize(&positions);
    PortfolioValuation {
        positions,
        unpriced,
        summary,
    }
}
