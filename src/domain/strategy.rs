//! Hybrid signal fusion: technical indicators + sentiment + valuation.
//!
//! One evaluation blends an RSI/ADX technical read with an external
//! sentiment score, then scales the conviction by a P/E multiplier.
//! The fusion is a pure function: identical inputs always produce the
//! identical [`SignalResult`].

use crate::domain::error::SignalError;
use crate::domain::signal::{RsiMode, SignalResult, TradingSignal};

const HOLD_EXPLANATION: &str =
    "Indicators are not aligned, or momentum is weak: no action recommended.";

/// Generate a trading signal from one day's inputs.
///
/// Steps:
/// 1. Validate ranges (RSI/ADX in [0,100], sentiment in [-100,100], P/E > 0).
/// 2. Pick oversold/overbought thresholds from `rsi_mode`.
/// 3. Technical signal: Buy below oversold / Sell above overbought, both
///    gated on ADX > 15.
/// 4. Sentiment signal from the score's sign.
/// 5. Fuse, first matching rule wins: aligned Buy, aligned Sell, then the
///    two momentum-continuation overrides (|sentiment| > 25, ADX >= 20),
///    else Hold.
/// 6. Score non-Hold signals: 0.6 * |RSI - 50| * 2 + 0.4 * |sentiment|,
///    zero when sentiment is exactly neutral.
/// 7. Scale by the P/E multiplier (cheap favors Buy, expensive favors Sell).
/// 8. Format confidence and pick the explanation.
pub fn generate_trading_signal(
    rsi: f64,
    adx: f64,
    pe_ratio: f64,
    sentiment_score: f64,
    rsi_mode: RsiMode,
) -> Result<SignalResult, SignalError> {
    if !(0.0..=100.0).contains(&rsi) {
        return Err(SignalError::RsiOutOfRange(rsi));
    }
    if !(0.0..=100.0).contains(&adx) {
        return Err(SignalError::AdxOutOfRange(adx));
    }
    if !(-100.0..=100.0).contains(&sentiment_score) {
        return Err(SignalError::SentimentOutOfRange(sentiment_score));
    }
    if pe_ratio <= 0.0 {
        return Err(SignalError::NonPositivePe(pe_ratio));
    }

    let (oversold, overbought) = rsi_mode.thresholds();

    let technical_signal = if rsi < oversold && adx > 15.0 {
        TradingSignal::Buy
    } else if rsi > overbought && adx > 15.0 {
        TradingSignal::Sell
    } else {
        TradingSignal::Hold
    };

    // Sign of the sentiment score; exactly zero is neutral.
    let sentiment_bullish = sentiment_score > 0.0;
    let sentiment_bearish = sentiment_score < 0.0;

    let final_signal = if technical_signal == TradingSignal::Buy && sentiment_bullish {
        TradingSignal::Buy
    } else if technical_signal == TradingSignal::Sell && sentiment_bearish {
        TradingSignal::Sell
    } else if rsi > overbought && sentiment_score > 25.0 && adx >= 20.0 {
        // overbought continuation
        TradingSignal::Buy
    } else if rsi < oversold && sentiment_score < -25.0 && adx >= 20.0 {
        // oversold continuation
        TradingSignal::Sell
    } else {
        TradingSignal::Hold
    };

    let mut total_score = if final_signal == TradingSignal::Hold {
        0.0
    } else {
        let technical_score = (rsi - 50.0).abs() * 2.0;
        let sentiment_abs = sentiment_score.abs();
        if sentiment_abs == 0.0 {
            0.0
        } else {
            0.6 * technical_score + 0.4 * sentiment_abs
        }
    };

    if total_score > 0.0 {
        let multiplier = match final_signal {
            TradingSignal::Buy if pe_ratio < 15.0 => 1.1,
            TradingSignal::Buy if pe_ratio > 25.0 => 0.9,
            TradingSignal::Sell if pe_ratio > 25.0 => 1.1,
            TradingSignal::Sell if pe_ratio < 15.0 => 0.9,
            _ => 1.0,
        };
        total_score *= multiplier;
    }

    let confidence_level = if final_signal == TradingSignal::Hold {
        "100%".to_string()
    } else {
        format!("{}%", total_score.trunc() as i64)
    };

    let explanation = match final_signal {
        TradingSignal::Hold => HOLD_EXPLANATION.to_string(),
        TradingSignal::Buy => {
            if rsi > overbought && sentiment_score > 25.0 {
                "Despite overbought condition, strong bullish sentiment suggests a continuation of the uptrend."
            } else if rsi < oversold && sentiment_score > 0.0 {
                "Oversold condition and positive sentiment indicate a likely reversal upward: buying opportunity."
            } else {
                "Moderate bullish sentiment and RSI positioning suggest a possible upward move."
            }
            .to_string()
        }
        TradingSignal::Sell => {
            if rsi < oversold && sentiment_score < -25.0 {
                "Despite oversold condition, strong bearish sentiment suggests a continuation of the downtrend."
            } else if rsi > overbought && sentiment_score < 0.0 {
                "Overbought condition and negative sentiment indicate a likely reversal downward: selling opportunity."
            } else {
                "Moderate bearish sentiment and RSI positioning suggest a possible downward move."
            }
            .to_string()
        }
    };

    Ok(SignalResult {
        signal: final_signal,
        confidence_level,
        total_score,
        explanation,
    })
}
