//! RSI (Relative Strength Index) indicator implementation.
//!
//! Uses simple moving averages for the gain/loss smoothing:
//! avg_gain / avg_loss are rolling means over the trailing `period`
//! close-to-close changes. The first bar has no prior close and
//! counts as a zero gain and zero loss, so the first `period - 1`
//! bars carry no value.
//!
//! Formula: RSI = 100 - (100 / (1 + avg_gain / avg_loss))
//! If avg_loss == 0 the ratio is undefined and the point stays invalid
//! rather than being clamped to 100.
//!
//! Insufficient input never errors: the series comes back all-invalid.

use crate::domain::indicator::{IndicatorPoint, IndicatorSeries, IndicatorType, IndicatorValue};
use crate::domain::indicator_helpers::rolling_mean;
use crate::domain::ohlcv::PriceBar;

pub fn calculate_rsi(bars: &[PriceBar], period: usize) -> IndicatorSeries {
    let invalid = |date| IndicatorPoint {
        date,
        valid: false,
        value: IndicatorValue::Simple(0.0),
    };

    if period == 0 || bars.len() < period {
        let values = bars.iter().map(|b| invalid(b.date)).collect();
        return IndicatorSeries {
            indicator_type: IndicatorType::Rsi(period),
            values,
        };
    }

    // Gain/loss sequences aligned with the bar index; the first bar
    // counts as a zero move in both directions.
    let mut gains: Vec<Option<f64>> = vec![Some(0.0)];
    let mut losses: Vec<Option<f64>> = vec![Some(0.0)];
    for i in 1..bars.len() {
        let change = bars[i].close - bars[i - 1].close;
        gains.push(Some(if change > 0.0 { change } else { 0.0 }));
        losses.push(Some(if change < 0.0 { -change } else { 0.0 }));
    }

    let avg_gains = rolling_mean(&gains, period);
    let avg_losses = rolling_mean(&losses, period);

    let values = bars
        .iter()
        .enumerate()
        .map(|(i, bar)| match (avg_gains[i], avg_losses[i]) {
            (Some(_), Some(avg_loss)) if avg_loss == 0.0 => invalid(bar.date),
            (Some(avg_gain), Some(avg_loss)) => {
                let rs = avg_gain / avg_loss;
                let rsi = 100.0 - (100.0 / (1.0 + rs));
                IndicatorPoint {
                    date: bar.date,
                    valid: true,
                    value: IndicatorValue::Simple(rsi),
                }
            }
            _ => invalid(bar.date),
        })
        .collect();

    IndicatorSeries {
        indicator_type: IndicatorType::Rsi(period),
        values,
    }
}
