//! Price data access port trait.

use crate::domain::error::SentibtError;
use crate::domain::ohlcv::PriceBar;
use chrono::NaiveDate;

pub trait PriceDataPort {
    /// Ordered daily bars for `ticker` within the window, inclusive.
    /// An empty vector means the data is unavailable.
    fn fetch_bars(
        &self,
        ticker: &str,
        start_date: NaiveDate,
        end_date: NaiveDate,
    ) -> Result<Vec<PriceBar>, SentibtError>;
}
