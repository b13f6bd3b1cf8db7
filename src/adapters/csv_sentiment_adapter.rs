//! CSV sentiment data adapter.
//!
//! One file per ticker named `<TICKER>_sentiment.csv` with a
//! `date,score` header, one aggregate score per date. A window query
//! averages the scores falling inside the window and clamps the result
//! to [-100, 100]; no rows (or no file) yields the neutral 0.0.

use crate::domain::error::SentibtError;
use crate::ports::sentiment_port::SentimentPort;
use chrono::NaiveDate;
use std::path::PathBuf;

pub struct CsvSentimentAdapter {
    base_path: PathBuf,
}

impl CsvSentimentAdapter {
    pub fn new(base_path: PathBuf) -> Self {
        Self { base_path }
    }

    fn csv_path(&self, ticker: &str) -> PathBuf {
        self.base_path.join(format!("{}_sentiment.csv", ticker))
    }
}

impl SentimentPort for CsvSentimentAdapter {
    fn sentiment_score(
        &self,
        ticker: &str,
        start_date: NaiveDate,
        end_date: NaiveDate,
    ) -> Result<f64, SentibtError> {
        let path = self.csv_path(ticker);
        if !path.exists() {
            return Ok(0.0);
        }

        let mut rdr = csv::Reader::from_path(&path).map_err(|e| SentibtError::Data {
            reason: format!("failed to read {}: {}", path.display(), e),
        })?;

        let mut sum = 0.0;
        let mut count = 0usize;

        for result in rdr.records() {
            let record = result.map_err(|e| SentibtError::Data {
                reason: format!("CSV parse error: {}", e),
            })?;

            let date_str = record.get(0).ok_or_else(|| SentibtError::Data {
                reason: "missing date column".into(),
            })?;
            let date = NaiveDate::parse_from_str(date_str.trim(), "%Y-%m-%d").map_err(|e| {
                SentibtError::Data {
                    reason: format!("invalid date format: {}", e),
                }
            })?;

            if date < start_date || date > end_date {
                continue;
            }

            let score: f64 = record
                .get(1)
                .ok_or_else(|| SentibtError::Data {
                    reason: "missing score column".into(),
                })?
                .trim()
                .parse()
                .map_err(|e| SentibtError::Data {
                    reason: format!("invalid score value: {}", e),
                })?;

            sum += score;
            count += 1;
        }

        if count == 0 {
            return Ok(0.0);
        }
        Ok((sum / count as f64).clamp(-100.0, 100.0))
    }
}
