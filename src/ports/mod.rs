//! Collaborator traits.

pub mod config_port;
pub mod display_port;
pub mod market_data_port;
pub mod portfolio_store_port;
