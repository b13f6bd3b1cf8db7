//! Technical indicator implementations.
//!
//! Types for representing indicator values and series:
//! - `IndicatorPoint`: a single point in an indicator time series
//! - `IndicatorValue`: enum for different indicator output shapes
//! - `IndicatorType`: enum for indicator identity + parameters
//! - `IndicatorSeries`: a time series of indicator values
//!
//! A point with `valid == false` is a warmup/gap point: the window did
//! not yet contain enough observations (or a denominator was zero) and
//! the carried value is meaningless.

pub mod rsi;
pub mod adx;

use chrono::NaiveDate;
use std::fmt;

#[derive(Debug, Clone)]
pub struct IndicatorPoint {
    pub date: NaiveDate,
    pub valid: bool,
    pub value: IndicatorValue,
}

#[derive(Debug, Clone)]
pub enum IndicatorValue {
    Simple(f64),
    Adx {
        plus_di: f64,
        minus_di: f64,
        adx: f64,
    },
}

impl IndicatorValue {
    pub fn simple(&self) -> Option<f64> {
        match self {
            IndicatorValue::Simple(v) => Some(*v),
            _ => None,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum IndicatorType {
    Rsi(usize),
    Adx(usize),
}

#[derive(Debug, Clone)]
pub struct IndicatorSeries {
    pub indicator_type: IndicatorType,
    pub values: Vec<IndicatorPoint>,
}

impl fmt::Display for IndicatorType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            IndicatorType::Rsi(period) => write!(f, "RSI({})", period),
            IndicatorType::Adx(period) => write!(f, "ADX({})", period),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn indicator_type_display() {
        assert_eq!(IndicatorType::Rsi(14).to_string(), "RSI(14)");
        assert_eq!(IndicatorType::Adx(14).to_string(), "ADX(14)");
    }

    #[test]
    fn indicator_value_simple_accessor() {
        assert_eq!(IndicatorValue::Simple(42.0).simple(), Some(42.0));
        let adx = IndicatorValue::Adx {
            plus_di: 20.0,
            minus_di: 10.0,
            adx: 25.0,
        };
        assert_eq!(adx.simple(), None);
    }

    #[test]
    fn indicator_type_hash_eq() {
        use std::collections::HashMap;

        let mut map = HashMap::new();
        map.insert(IndicatorType::Rsi(14), "rsi_series".to_string());
        map.insert(IndicatorType::Adx(14), "adx_series".to_string());

        assert_eq!(
            map.get(&IndicatorType::Rsi(14)),
            Some(&"rsi_series".to_string())
        );
        assert_eq!(
            map.get(&IndicatorType::Adx(14)),
            Some(&"adx_series".to_string())
        );
        assert_eq!(map.get(&IndicatorType::Rsi(21)), None);
    }
}
