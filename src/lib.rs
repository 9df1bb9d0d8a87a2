//! Price-series and portfolio kernel for a market dashboard.
//!
//! Hexagonal layout: pure computation in [`domain`], collaborator traits in
//! [`ports`], file-backed implementations in [`adapters`].

pub mod adapters;
pub mod cli;
pub mod domain;
pub mod log;
pub mod ports;
