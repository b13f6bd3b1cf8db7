//! Core domain types and logic.

pub mod ohlcv;
pub mod indicator;
pub mod indicator_helpers;
pub mod signal;
pub mod strategy;
pub mod ledger;
pub mod portfolio;
pub mod backtest;
pub mod config_validation;
pub mod error;
