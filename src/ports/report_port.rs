//! Report generation port trait.

use crate::domain::backtest::BacktestResult;
use crate::domain::error::SentibtError;

/// Port for exporting backtest results.
pub trait ReportPort {
    fn write(&self, result: &BacktestResult, output_path: &str) -> Result<(), SentibtError>;
}
