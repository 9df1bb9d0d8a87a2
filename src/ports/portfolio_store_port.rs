//! Portfolio persistence port.

use crate::domain::error::QuotefolioError;
use crate::domain::portfolio::Portfolio;

pub trait PortfolioStore {
    fn load(&self) -> Result<Portfolio, QuotefolioError>;

    fn save(&self, portfolio: &Portfolio) -> Result<(), QuotefolioError>;
}
