#![allow(dead_code)]

use chrono::{Duration, NaiveDate};
use sentibt::domain::backtest::BacktestConfig;
use sentibt::domain::error::SentibtError;
pub use sentibt::domain::ohlcv::PriceBar;
use sentibt::domain::signal::RsiMode;
use sentibt::ports::data_port::PriceDataPort;
use sentibt::ports::sentiment_port::SentimentPort;
use sentibt::ports::valuation_port::ValuationPort;
use std::collections::HashMap;
use std::io::Write;
use std::path::Path;

pub fn date(y: i32, m: u32, d: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(y, m, d).unwrap()
}

/// Bearish closes with a widening high/low channel. Every close falls
/// by 1, so RSI pins at 0 once defined, while the rising highs keep
/// +DM dominant and the ADX defined.
pub fn divergent_bars(ticker: &str, start: NaiveDate, n: usize) -> Vec<PriceBar> {
    (0..n)
        .map(|i| PriceBar {
            ticker: ticker.to_string(),
            date: start + Duration::days(i as i64),
            open: 200.0 - i as f64,
            high: 100.0 + 2.0 * i as f64,
            low: 90.0 + i as f64,
            close: 200.0 - i as f64,
            volume: 1_000,
        })
        .collect()
}

pub fn sample_config(ticker: &str, start: NaiveDate, end: NaiveDate) -> BacktestConfig {
    BacktestConfig {
        ticker: ticker.to_string(),
        start_date: start,
        end_date: end,
        initial_cash: 10_000.0,
        rsi_period: 3,
        adx_period: 3,
        rsi_mode: RsiMode::Standard,
        sentiment_window_days: 1,
        lookback_days: 20,
        fallback_pe: 20.0,
    }
}

pub fn write_prices_csv(dir: &Path, ticker: &str, bars: &[PriceBar]) {
    let mut file = std::fs::File::create(dir.join(format!("{}.csv", ticker))).unwrap();
    writeln!(file, "date,open,high,low,close,volume").unwrap();
    for bar in bars {
        writeln!(
            file,
            "{},{},{},{},{},{}",
            bar.date, bar.open, bar.high, bar.low, bar.close, bar.volume,
        )
        .unwrap();
    }
}

pub fn write_sentiment_csv(dir: &Path, ticker: &str, rows: &[(NaiveDate, f64)]) {
    let mut file =
        std::fs::File::create(dir.join(format!("{}_sentiment.csv", ticker))).unwrap();
    writeln!(file, "date,score").unwrap();
    for (d, score) in rows {
        writeln!(file, "{},{}", d, score).unwrap();
    }
}

pub struct MockDataPort {
    pub data: HashMap<String, Vec<PriceBar>>,
}

impl MockDataPort {
    pub fn new() -> Self {
        Self {
            data: HashMap::new(),
        }
    }

    pub fn with_bars(mut self, ticker: &str, bars: Vec<PriceBar>) -> Self {
        self.data.insert(ticker.to_string(), bars);
        self
    }
}

impl PriceDataPort for MockDataPort {
    fn fetch_bars(
        &self,
        ticker: &str,
        start_date: NaiveDate,
        end_date: NaiveDate,
    ) -> Result<Vec<PriceBar>, SentibtError> {
        Ok(self
            .data
            .get(ticker)
            .map(|bars| {
                bars.iter()
                    .filter(|b| b.date >= start_date && b.date <= end_date)
                    .cloned()
                    .collect()
            })
            .unwrap_or_default())
    }
}

pub struct MockSentimentPort {
    pub scores: HashMap<NaiveDate, f64>,
    pub default: f64,
}

impl MockSentimentPort {
    pub fn fixed(score: f64) -> Self {
        Self {
            scores: HashMap::new(),
            default: score,
        }
    }

    pub fn with_score(mut self, end_date: NaiveDate, score: f64) -> Self {
        self.scores.insert(end_date, score);
        self
    }
}

impl SentimentPort for MockSentimentPort {
    fn sentiment_score(
        &self,
        _ticker: &str,
        _start_date: NaiveDate,
        end_date: NaiveDate,
    ) -> Result<f64, SentibtError> {
        Ok(self.scores.get(&end_date).copied().unwrap_or(self.default))
    }
}

pub struct MockValuationPort {
    pub pe: Option<f64>,
}

impl ValuationPort for MockValuationPort {
    fn pe_ratio(&self, _ticker: &str) -> Result<Option<f64>, SentibtError> {
        Ok(self.pe)
    }
}
