//! ADX (Average Directional Index) indicator implementation.
//!
//! Directional movement is diff-based: up = high_t − high_{t−1},
//! down = low_t − low_{t−1}; +DM keeps up when it is positive and
//! dominates, −DM keeps down when it is positive and dominates.
//! ATR is a simple moving average of true range; ±DI divide
//! span-smoothed exponential means of ±DM by ATR; DX is the scaled
//! absolute DI spread (undefined on a zero DI sum); ADX is the
//! span-smoothed exponential mean of DX.
//!
//! Points before the warmup are invalid; short input yields an empty
//! series rather than an error.

use crate::domain::indicator::{IndicatorPoint, IndicatorSeries, IndicatorType, IndicatorValue};
use crate::domain::indicator_helpers::{ewm_span, rolling_mean};
use crate::domain::ohlcv::PriceBar;

pub fn calculate_adx(bars: &[PriceBar], period: usize) -> IndicatorSeries {
    if period == 0 || bars.len() < period {
        return IndicatorSeries {
            indicator_type: IndicatorType::Adx(period),
            values: vec![],
        };
    }

    // The first bar has no prior bar and counts as zero directional
    // movement in both directions.
    let mut plus_dm: Vec<Option<f64>> = vec![Some(0.0)];
    let mut minus_dm: Vec<Option<f64>> = vec![Some(0.0)];
    let mut tr: Vec<Option<f64>> = vec![Some(bars[0].high - bars[0].low)];

    for i in 1..bars.len() {
        let up = bars[i].high - bars[i - 1].high;
        let down = bars[i].low - bars[i - 1].low;
        plus_dm.push(Some(if up > down && up > 0.0 { up } else { 0.0 }));
        minus_dm.push(Some(if down > up && down > 0.0 { down } else { 0.0 }));
        tr.push(Some(bars[i].true_range(bars[i - 1].close)));
    }

    let atr = rolling_mean(&tr, period);
    let plus_smooth = ewm_span(&plus_dm, period, period);
    let minus_smooth = ewm_span(&minus_dm, period, period);

    let di = |smooth: &[Option<f64>], i: usize| -> Option<f64> {
        match (smooth[i], atr[i]) {
            (Some(dm), Some(atr)) if atr != 0.0 => Some(100.0 * dm / atr),
            _ => None,
        }
    };

    let mut dx: Vec<Option<f64>> = Vec::with_capacity(bars.len());
    for i in 0..bars.len() {
        let point = match (di(&plus_smooth, i), di(&minus_smooth, i)) {
            (Some(pdi), Some(mdi)) if pdi + mdi != 0.0 => {
                Some(100.0 * (pdi - mdi).abs() / (pdi + mdi))
            }
            _ => None,
        };
        dx.push(point);
    }

    let adx = ewm_span(&dx, period, period);

    let values = bars
        .iter()
        .enumerate()
        .map(|(i, bar)| {
            match (di(&plus_smooth, i), di(&minus_smooth, i), adx[i]) {
                (Some(plus_di), Some(minus_di), Some(adx)) => IndicatorPoint {
                    date: bar.date,
                    valid: true,
                    value: IndicatorValue::Adx {
                        plus_di,
                        minus_di,
                        adx,
                    },
                },
                _ => IndicatorPoint {
                    date: bar.date,
                    valid: false,
                    value: IndicatorValue::Adx {
                        plus_di: 0.0,
                        minus_di: 0.0,
                        adx: 0.0,
                    },
                },
            }
        })
        .collect();

    IndicatorSeries {
        indicator_type: IndicatorType::Adx(period),
        values,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;

    fn make_bar(day: u32, high: f64, low: f64, close: f64) -> PriceBar {
        PriceBar {
            ticker: "TEST".into(),
            date: NaiveDate::from_ymd_opt(2024, 1, 1).unwrap()
                + chrono::Duration::days(day as i64 - 1),
            open: close,
            high,
            low,
            close,
            volume: 1000,
        }
    }

    fn trending_bars(n: u32) -> Vec<PriceBar> {
        // uptrend with a widening range: highs rise by 3 per bar, lows
        // by 1, so upward movement dominates
        (1..=n)
            .map(|i| {
                let high = 100.0 + i as f64 * 3.0;
                let low = 98.0 + i as f64;
                make_bar(i, high, low, (high + low) / 2.0)
            })
            .collect()
    }

    #[test]
    fn adx_insufficient_bars_is_empty() {
        let bars = trending_bars(3);
        let series = calculate_adx(&bars, 14);
        assert!(series.values.is_empty());
    }

    #[test]
    fn adx_zero_period_is_empty() {
        let bars = trending_bars(5);
        let series = calculate_adx(&bars, 0);
        assert!(series.values.is_empty());
    }

    #[test]
    fn adx_warmup_invalid_then_valid() {
        let bars = trending_bars(40);
        let series = calculate_adx(&bars, 14);

        assert_eq!(series.values.len(), 40);
        // DI comes online at index 13 (14 DM observations counting the
        // leading zero), DX likewise, and ADX 13 DX observations later
        // at index 26.
        for (i, point) in series.values[..26].iter().enumerate() {
            assert!(!point.valid, "bar {} should be invalid", i);
        }
        assert!(series.values[26].valid, "bar 26 should be valid");
        assert!(series.values.last().unwrap().valid);
    }

    #[test]
    fn adx_uptrend_plus_di_dominates() {
        let bars = trending_bars(40);
        let series = calculate_adx(&bars, 14);

        let last = series.values.last().unwrap();
        assert!(last.valid);
        if let IndicatorValue::Adx {
            plus_di,
            minus_di,
            adx,
        } = last.value
        {
            assert!(plus_di > minus_di, "uptrend should favor +DI");
            assert!(adx > 0.0);
            assert!((0.0..=100.0).contains(&adx), "ADX {} out of range", adx);
        } else {
            panic!("expected Adx value");
        }
    }

    #[test]
    fn adx_in_range_for_choppy_series() {
        let bars: Vec<PriceBar> = (1..=60u32)
            .map(|i| {
                let base = 100.0 + (i as f64 % 9.0 - 4.0) * 3.0;
                make_bar(i, base + 2.0, base - 2.0, base)
            })
            .collect();
        let series = calculate_adx(&bars, 14);

        for point in &series.values {
            if point.valid {
                if let IndicatorValue::Adx { adx, .. } = point.value {
                    assert!((0.0..=100.0).contains(&adx), "ADX {} out of range", adx);
                }
            }
        }
    }

    #[test]
    fn adx_flat_market_stays_undefined() {
        // identical bars: no directional movement and zero true range,
        // so DI (and therefore ADX) never becomes defined
        let bars: Vec<PriceBar> = (1..=30).map(|i| make_bar(i, 100.0, 100.0, 100.0)).collect();
        let series = calculate_adx(&bars, 14);

        for point in &series.values {
            assert!(!point.valid);
        }
    }

    #[test]
    fn adx_indicator_type() {
        let bars = trending_bars(20);
        let series = calculate_adx(&bars, 14);
        assert_eq!(series.indicator_type, IndicatorType::Adx(14));
    }
}
