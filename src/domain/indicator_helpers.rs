//! Shared helper functions for indicator calculations.
//!
//! Indicator pipelines work internally on `Option<f64>` sequences
//! aligned with the bar index, where `None` marks a warmup gap or an
//! undefined intermediate (zero denominator). The helpers here mirror
//! rolling simple means and span-parameterized exponential means over
//! such sequences.

use chrono::NaiveDate;

use crate::domain::indicator::{IndicatorValue, IndicatorType};
use crate::domain::ohlcv::PriceBar;

/// Rolling simple mean over a fixed window.
///
/// Output at index `i` is defined only when the trailing `period`
/// entries ending at `i` are all defined.
pub fn rolling_mean(values: &[Option<f64>], period: usize) -> Vec<Option<f64>> {
    let mut out = vec![None; values.len()];
    if period == 0 {
        return out;
    }
    for i in (period - 1)..values.len() {
        let window = &values[i + 1 - period..=i];
        if window.iter().all(Option::is_some) {
            let sum: f64 = window.iter().map(|v| v.unwrap_or(0.0)).sum();
            out[i] = Some(sum / period as f64);
        }
    }
    out
}

/// Exponentially weighted mean with span parameterization.
///
/// alpha = 2 / (span + 1). The recursion seeds at the first defined
/// input; undefined inputs leave the state untouched but carry the
/// current mean forward. Output is defined once `min_periods` defined
/// inputs have been absorbed.
pub fn ewm_span(values: &[Option<f64>], span: usize, min_periods: usize) -> Vec<Option<f64>> {
    let mut out = vec![None; values.len()];
    if span == 0 {
        return out;
    }
    let alpha = 2.0 / (span as f64 + 1.0);

    let mut mean: Option<f64> = None;
    let mut seen = 0usize;

    for (i, value) in values.iter().enumerate() {
        if let Some(x) = value {
            mean = Some(match mean {
                None => *x,
                Some(m) => m + alpha * (x - m),
            });
            seen += 1;
        }
        if seen >= min_periods {
            out[i] = mean;
        }
    }
    out
}

/// One date's view of the technical indicators, joined by bar index.
#[derive(Debug, Clone, PartialEq)]
pub struct IndicatorSnapshot {
    pub date: NaiveDate,
    pub rsi: Option<f64>,
    pub adx: Option<f64>,
}

/// Compute RSI and ADX over the full bar series and join them per date.
pub fn compute_snapshots(
    bars: &[PriceBar],
    rsi_period: usize,
    adx_period: usize,
) -> Vec<IndicatorSnapshot> {
    let rsi_series = super::indicator::rsi::calculate_rsi(bars, rsi_period);
    let adx_series = super::indicator::adx::calculate_adx(bars, adx_period);

    debug_assert_eq!(rsi_series.indicator_type, IndicatorType::Rsi(rsi_period));
    debug_assert_eq!(adx_series.indicator_type, IndicatorType::Adx(adx_period));

    bars.iter()
        .enumerate()
        .map(|(i, bar)| {
            let rsi = rsi_series
                .values
                .get(i)
                .filter(|p| p.valid)
                .and_then(|p| p.value.simple());
            let adx = adx_series.values.get(i).filter(|p| p.valid).and_then(|p| {
                match p.value {
                    IndicatorValue::Adx { adx, .. } => Some(adx),
                    _ => None,
                }
            });
            IndicatorSnapshot {
                date: bar.date,
                rsi,
                adx,
            }
        })
        .collect()
}
