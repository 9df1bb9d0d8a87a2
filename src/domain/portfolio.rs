//! Holdings collection keyed by symbol, in insertion order.

use serde::{Deserialize, Serialize};

use super::error::QuotefolioError;
use super::holding::{normalize_symbol, Holding};

/// Serialized as a plain list of holdings; deserializing goes through
/// [`Portfolio::from_holdings`].
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(try_from = "Vec<Holding>", into = "Vec<Holding>")]
pub struct Portfolio {
    holdings: Vec<Holding>,
}

impl Portfolio {
    pub fn new() -> Self {
        Portfolio::default()
    }

    /// Builds a portfolio from stored records, re-validating each one.
    pub fn from_holdings(holdings: Vec<Holding>) -> Result<Self, QuotefolioError> {
        let mut portfolio = Portfolio::new();
        for h in holdings {
            portfolio.add(h)?;
        }
        Ok(portfolio)
    }

    pub fn add(&mut self, holding: Holding) -> Result<(), QuotefolioError> {
        let holding = revalidate(holding)?;
        if self.contains(&holding.symbol) {
            return Err(QuotefolioError::DuplicateHolding {
                symbol: holding.symbol,
            });
        }
        self.holdings.push(holding);
        Ok(())
    }

    /// Replaces shares and cost basis of an existing holding.
    pub fn update(&mut self, holding: Holding) -> Result<(), QuotefolioError> {
        let holding = revalidate(holding)?;
        match self.holdings.iter_mut().find(|h| h.symbol == holding.symbol) {
            Some(existing) => {
                *existing = holding;
                Ok(())
            }
            None => Err(QuotefolioError::HoldingNotFound {
                symbol: holding.symbol,
            }),
        }
    }

    pub fn remove(&mut self, symbol: &str) -> Result<Holding, QuotefolioError> {
        let symbol = normalize_symbol(symbol);
        let index = self
            .holdings
            .iter()
            .position(|h| h.symbol == symbol)
            .ok_or(QuotefolioError::HoldingNotFound { symbol })?;
        Ok(self.holdings.remove(index))
    }

    pub fn get(&self, symbol: &str) -> Option<&Holding> {
        let symbol = normalize_symbol(symbol);
        self.holdings.iter().find(|h| h.symbol == symbol)
    }

    pub fn contains(&self, symbol: &str) -> bool {
        self.get(symbol).is_some()
    }

    pub fn holdings(&self) -> &[Holding] {
        &self.holdings
    }

    pub fn symbols(&self) -> Vec<&str> {
        self.holdings.iter().map(|h| h.symbol.as_str()).collect()
    }

    pub fn len(&self) -> usize {
        self.holdings.len()
    }

    pub fn is_empty(&self) -> bool {
        self.holdings.is_empty()
    }
}

/// Holding fields are public, so a hand-built value may skip [`Holding::new`].
fn revalidate(holding: Holding) -> Result<Holding, QuotefolioError> {
    Holding::new(&holding.symbol, holding.shares, holding.cost_basis)
}

impl TryFrom<Vec<Holding>> for Portfolio {
    type Error = QuotefolioError;

    fn try_from(holdings: Vec<Holding>) -> Result<Self, Self::Error> {
        Portfolio::from_holdings(holdings)
    }
}

impl From<Portfolio> for Vec<Holding> {
    fn from(portfolio: Portfolio) -> Self {
        portfolio.holdings
    }
}
