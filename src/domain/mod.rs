//! Core domain types and logic.

pub mod chart;
pub mod config;
pub mod ema;
pub mod error;
pub mod holding;
pub mod normalizer;
pub mod portfolio;
pub mod price_point;
pub mod quote;
pub mod range;
pub mod valuation;
