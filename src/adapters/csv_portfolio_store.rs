//! Holdings persisted as a `symbol,shares,cost_basis` CSV file.

use std::path::PathBuf;
use tracing::debug;

use crate::domain::error::QuotefolioError;
use crate::domain::holding::Holding;
use crate::domain::portfolio::Portfolio;
use crate::ports::portfolio_store_port::PortfolioStore;

pub struct CsvPortfolioStore {
    path: PathBuf,
}

impl CsvPortfolioStore {
    pub fn new(path: PathBuf) -> Self {
        Self { path }
    }

    fn store_error(&self, action: &str, e: impl std::fmt::Display) -> QuotefolioError {
        QuotefolioError::Store {
            reason: format!("failed to {} {}: {}", action, self.path.display(), e),
        }
    }
}

impl PortfolioStore for CsvPortfolioStore {
    /// A missing file is an empty portfolio.
    fn load(&self) -> Result<Portfolio, QuotefolioError> {
        if !self.path.exists() {
            debug!(path = %self.path.display(), "no portfolio file yet");
            return Ok(Portfolio::new());
        }

        let mut rdr = csv::Reader::from_path(&self.path).map_err(|e| self.store_error("read", e))?;
        let mut holdings = Vec::new();
        for result in rdr.deserialize::<Holding>() {
            holdings.push(result.map_err(|e| self.store_error("parse", e))?);
        }

        debug!(count = holdings.len(), "loaded holdings");
        Portfolio::from_holdings(holdings)
    }

    fn save(&self, portfolio: &Portfolio) -> Result<(), QuotefolioError> {
        if let Some(parent) = self.path.parent().filter(|p| !p.as_os_str().is_empty()) {
            std::fs::create_dir_all(parent)?;
        }

        let mut wtr = csv::Writer::from_path(&self.path).map_err(|e| self.store_error("write", e))?;
        for holding in portfolio.holdings() {
            wtr.serialize(holding)
                .map_err(|e| self.store_error("write", e))?;
        }
        wtr.flush()?;

        debug!(count = portfolio.len(), path = %self.path.display(), "saved holdings");
        Ok(())
    }
}
