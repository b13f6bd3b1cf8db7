//! Valuation lookup port trait.

use crate::domain::error::SentibtError;

pub trait ValuationPort {
    /// Trailing P/E ratio for `ticker`; `None` when unavailable.
    fn pe_ratio(&self, ticker: &str) -> Result<Option<f64>, SentibtError>;
}
