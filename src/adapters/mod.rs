//! Concrete adapter implementations for ports.

pub mod csv_portfolio_store;
pub mod csv_sink;
pub mod file_config_adapter;
pub mod json_market_data;
