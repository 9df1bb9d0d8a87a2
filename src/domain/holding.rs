//! A single portfolio line: symbol, share count and per-share cost basis.

use serde::{Deserialize, Serialize};

use super::error::QuotefolioError;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Holding {
    pub symbol: String,
    pub shares: f64,
    pub cost_basis: f64,
}

impl Holding {
    /// Validated constructor. The symbol is trimmed and uppercased.
    pub fn new(symbol: &str, shares: f64, cost_basis: f64) -> Result<Self, QuotefolioError> {
        let symbol = normalize_symbol(symbol);
        if symbol.is_empty() {
            return Err(QuotefolioError::InvalidHolding {
                symbol,
                reason: "symbol must not be empty".into(),
            });
        }
        check_amount(&symbol, "shares", shares)?;
        check_amount(&symbol, "cost basis", cost_basis)?;
        Ok(Holding {
            symbol,
            shares,
            cost_basis,
        })
    }

    /// shares * cost_basis
    pub fn total_cost(&self) -> f64 {
        self.shares * self.cost_basis
    }
}

pub fn normalize_symbol(symbol: &str) -> String {
    symbol.trim().to_uppercase()
}

fn check_amount(symbol: &str, what: &str, value: f64) -> Result<(), QuotefolioError> {
    if !value.is_finite() || value < 0.0 {
        return Err(QuotefolioError::InvalidHolding {
            symbol: symbol.to_string(),
            reason: format!("{what} must be a non-negative number, got {value}"),
        });
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn symbol_is_trimmed_and_uppercased() {
        let holding = Holding::new("  aapl ", 10.0, 150.0).unwrap();
        assert_eq!(holding.symbol, "AAPL");
    }

    #[test]
    fn total_cost() {
        let holding = Holding::new("MSFT", 4.0, 25.5).unwrap();
        assert!((holding.total_cost() - 102.0).abs() < f64::EPSILON);
    }

    #[test]
    fn rejects_empty_symbol() {
        assert!(matches!(
            Holding::new("   ", 1.0, 1.0),
            Err(QuotefolioError::InvalidHolding { .. })
        ));
    }

    #[test]
    fn rejects_negative_shares() {
        assert!(Holding::new("X", -1.0, 1.0).is_err());
    }

    #[test]
    fn rejects_non_finite_cost_basis() {
        assert!(Holding::new("X", 1.0, f64::NAN).is_err());
        assert!(Holding::new("X", 1.0, f64::INFINITY).is_err());
    }

    #[test]
    fn zero_values_are_allowed() {
        let holding = Holding::new("X", 0.0, 0.0).unwrap();
        assert_eq!(holding.total_cost(), 0.0);
    }
}
