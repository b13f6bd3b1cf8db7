//! Sentiment score access port trait.

use crate::domain::error::SentibtError;
use chrono::NaiveDate;

pub trait SentimentPort {
    /// One aggregate sentiment score in [-100, 100] for `ticker` over
    /// the window, inclusive. 0.0 means neutral or no data.
    fn sentiment_score(
        &self,
        ticker: &str,
        start_date: NaiveDate,
        end_date: NaiveDate,
    ) -> Result<f64, SentibtError>;
}
