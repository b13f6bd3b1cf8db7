//! Backtest engine and daily event loop.
//!
//! The driver walks the requested date range strictly in order: each
//! day's ledger transition depends on the previous day's state, so the
//! walk is single-threaded and blocks on each collaborator lookup.
//! Every day produces an inspectable [`DayOutcome`] instead of a log
//! line, and collaborator failures are absorbed here into neutral
//! defaults rather than surfacing as errors.

use chrono::{Duration, NaiveDate};

use crate::domain::error::{SentibtError, SignalError};
use crate::domain::indicator_helpers::compute_snapshots;
use crate::domain::ledger::{LedgerEvent, PositionLedger, PositionSide};
use crate::domain::portfolio::{summarize, PortfolioSummary};
use crate::domain::signal::{RsiMode, TradingSignal};
use crate::domain::strategy::generate_trading_signal;
use crate::ports::data_port::PriceDataPort;
use crate::ports::sentiment_port::SentimentPort;
use crate::ports::valuation_port::ValuationPort;

#[derive(Debug, Clone)]
pub struct BacktestConfig {
    pub ticker: String,
    pub start_date: NaiveDate,
    pub end_date: NaiveDate,
    pub initial_cash: f64,
    pub rsi_period: usize,
    pub adx_period: usize,
    pub rsi_mode: RsiMode,
    /// Trailing window, in days, fed to the sentiment collaborator.
    pub sentiment_window_days: i64,
    /// Extra bars fetched before `start_date` for indicator warmup.
    pub lookback_days: i64,
    /// P/E used when the valuation collaborator has no value.
    pub fallback_pe: f64,
}

/// One evaluated day. Field order matches the export surface.
#[derive(Debug, Clone, PartialEq)]
pub struct DayRecord {
    pub date: NaiveDate,
    pub close: f64,
    pub sentiment_score: f64,
    pub rsi: f64,
    pub adx: f64,
    pub pe_ratio: f64,
    pub rsi_mode: RsiMode,
    pub signal: TradingSignal,
    pub confidence_level: String,
    pub total_score: f64,
    pub explanation: String,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SkipReason {
    /// RSI or ADX undefined for that date (warmup or gap).
    IndicatorsUnavailable,
}

impl std::fmt::Display for SkipReason {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            SkipReason::IndicatorsUnavailable => write!(f, "indicators unavailable"),
        }
    }
}

/// Per-day outcome of the walk.
#[derive(Debug, Clone, PartialEq)]
pub enum DayOutcome {
    Evaluated(DayRecord),
    Skipped { date: NaiveDate, reason: SkipReason },
    Failed { date: NaiveDate, error: SignalError },
}

#[derive(Debug, Clone)]
pub struct BacktestResult {
    pub days: Vec<DayOutcome>,
    pub events: Vec<LedgerEvent>,
    pub open_position: Option<(PositionSide, NaiveDate, f64)>,
    pub summary: PortfolioSummary,
}

impl BacktestResult {
    pub fn records(&self) -> impl Iterator<Item = &DayRecord> {
        self.days.iter().filter_map(|d| match d {
            DayOutcome::Evaluated(r) => Some(r),
            _ => None,
        })
    }
}

/// Run the full daily walk over `[start_date, end_date]`.
///
/// The only fatal condition is an empty price series for the fetch
/// window. Undefined indicators skip the day; a domain-validation
/// failure records a `Failed` outcome and leaves the ledger untouched;
/// sentiment/valuation collaborator errors fall back to neutral
/// defaults (0.0 sentiment, the configured fallback P/E).
pub fn run_backtest(
    config: &BacktestConfig,
    data_port: &dyn PriceDataPort,
    sentiment_port: &dyn SentimentPort,
    valuation_port: &dyn ValuationPort,
) -> Result<BacktestResult, SentibtError> {
    let fetch_start = config.start_date - Duration::days(config.lookback_days);
    let bars = data_port.fetch_bars(&config.ticker, fetch_start, config.end_date)?;

    if bars.is_empty() {
        return Err(SentibtError::NoData {
            ticker: config.ticker.clone(),
        });
    }

    let snapshots = compute_snapshots(&bars, config.rsi_period, config.adx_period);

    let mut ledger = PositionLedger::new();
    let mut days: Vec<DayOutcome> = Vec::new();
    let mut last_close: Option<f64> = None;

    for (bar, snapshot) in bars.iter().zip(snapshots.iter()) {
        if bar.date < config.start_date || bar.date > config.end_date {
            continue;
        }
        last_close = Some(bar.close);

        let (rsi, adx) = match (snapshot.rsi, snapshot.adx) {
            (Some(rsi), Some(adx)) => (rsi, adx),
            _ => {
                days.push(DayOutcome::Skipped {
                    date: bar.date,
                    reason: SkipReason::IndicatorsUnavailable,
                });
                continue;
            }
        };

        let window_start = bar.date - Duration::days(config.sentiment_window_days);
        let sentiment_score = sentiment_port
            .sentiment_score(&config.ticker, window_start, bar.date)
            .unwrap_or(0.0);

        let pe_ratio = valuation_port
            .pe_ratio(&config.ticker)
            .unwrap_or(None)
            .unwrap_or(config.fallback_pe);

        match generate_trading_signal(rsi, adx, pe_ratio, sentiment_score, config.rsi_mode) {
            Ok(result) => {
                ledger.apply(bar.date, bar.close, result.signal);
                days.push(DayOutcome::Evaluated(DayRecord {
                    date: bar.date,
                    close: bar.close,
                    sentiment_score,
                    rsi,
                    adx,
                    pe_ratio,
                    rsi_mode: config.rsi_mode,
                    signal: result.signal,
                    confidence_level: result.confidence_level,
                    total_score: result.total_score,
                    explanation: result.explanation,
                }));
            }
            Err(error) => {
                days.push(DayOutcome::Failed {
                    date: bar.date,
                    error,
                });
            }
        }
    }

    if days.is_empty() {
        return Err(SentibtError::NoData {
            ticker: config.ticker.clone(),
        });
    }

    let summary = summarize(config.initial_cash, &ledger, last_close);

    Ok(BacktestResult {
        days,
        events: ledger.events().to_vec(),
        open_position: ledger.open_position(),
        summary,
    })
}
