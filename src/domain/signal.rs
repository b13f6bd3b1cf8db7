//! Trading signal and RSI-mode types.

use std::fmt;
use std::str::FromStr;

/// Final per-day decision. Exactly one of the three; there are no
/// weak/strong variants.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TradingSignal {
    Buy,
    Sell,
    Hold,
}

impl fmt::Display for TradingSignal {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            TradingSignal::Buy => write!(f, "Buy"),
            TradingSignal::Sell => write!(f, "Sell"),
            TradingSignal::Hold => write!(f, "Hold"),
        }
    }
}

/// Selects how aggressively the RSI thresholds trigger signals.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RsiMode {
    Conservative,
    Standard,
    Aggressive,
}

impl RsiMode {
    /// (oversold, overbought) threshold pair.
    pub fn thresholds(self) -> (f64, f64) {
        match self {
            RsiMode::Conservative => (35.0, 65.0),
            RsiMode::Standard => (40.0, 60.0),
            RsiMode::Aggressive => (45.0, 55.0),
        }
    }
}

impl fmt::Display for RsiMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            RsiMode::Conservative => write!(f, "conservative"),
            RsiMode::Standard => write!(f, "standard"),
            RsiMode::Aggressive => write!(f, "aggressive"),
        }
    }
}

impl FromStr for RsiMode {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "conservative" => Ok(RsiMode::Conservative),
            "standard" => Ok(RsiMode::Standard),
            "aggressive" => Ok(RsiMode::Aggressive),
            other => Err(format!("unknown rsi_mode: {}", other)),
        }
    }
}

/// Output of one signal-fusion evaluation. Derived, never mutated.
#[derive(Debug, Clone, PartialEq)]
pub struct SignalResult {
    pub signal: TradingSignal,
    /// Formatted percentage string; "100%" for Hold, otherwise the
    /// integer truncation of `total_score`.
    pub confidence_level: String,
    pub total_score: f64,
    pub explanation: String,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn threshold_pairs() {
        assert_eq!(RsiMode::Conservative.thresholds(), (35.0, 65.0));
        assert_eq!(RsiMode::Standard.thresholds(), (40.0, 60.0));
        assert_eq!(RsiMode::Aggressive.thresholds(), (45.0, 55.0));
    }

    #[test]
    fn threshold_ordering_and_band_widths() {
        for mode in [RsiMode::Conservative, RsiMode::Standard, RsiMode::Aggressive] {
            let (oversold, overbought) = mode.thresholds();
            assert!(oversold < overbought);
        }
        let width = |mode: RsiMode| {
            let (lo, hi) = mode.thresholds();
            hi - lo
        };
        assert!(width(RsiMode::Aggressive) < width(RsiMode::Standard));
        assert!(width(RsiMode::Standard) < width(RsiMode::Conservative));
    }

    #[test]
    fn mode_round_trips_through_str() {
        for mode in [RsiMode::Conservative, RsiMode::Standard, RsiMode::Aggressive] {
            assert_eq!(mode.to_string().parse::<RsiMode>().unwrap(), mode);
        }
    }

    #[test]
    fn mode_parse_is_case_insensitive() {
        assert_eq!("Standard".parse::<RsiMode>().unwrap(), RsiMode::Standard);
        assert_eq!(" AGGRESSIVE ".parse::<RsiMode>().unwrap(), RsiMode::Aggressive);
    }

    #[test]
    fn mode_parse_rejects_unknown() {
        assert!("weak".parse::<RsiMode>().is_err());
    }

    #[test]
    fn signal_display() {
        assert_eq!(TradingSignal::Buy.to_string(), "Buy");
        assert_eq!(TradingSignal::Sell.to_string(), "Sell");
        assert_eq!(TradingSignal::Hold.to_string(), "Hold");
    }
}
