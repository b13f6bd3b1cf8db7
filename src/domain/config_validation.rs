//! Configuration validation.
//!
//! Validates all config fields before a backtest runs.

use crate::domain::error::SentibtError;
use crate::domain::signal::RsiMode;
use crate::ports::config_port::ConfigPort;
use chrono::NaiveDate;

pub fn validate_backtest_config(config: &dyn ConfigPort) -> Result<(), SentibtError> {
    validate_ticker(config)?;
    validate_dates(config)?;
    validate_initial_cash(config)?;
    validate_rsi_mode(config)?;
    validate_lookback(config)?;
    validate_periods(config)?;
    validate_sentiment_window(config)?;
    validate_fallback_pe(config)?;
    Ok(())
}

fn validate_ticker(config: &dyn ConfigPort) -> Result<(), SentibtError> {
    match config.get_string("backtest", "ticker") {
        Some(s) if !s.trim().is_empty() => Ok(()),
        _ => Err(SentibtError::ConfigMissing {
            section: "backtest".to_string(),
            key: "ticker".to_string(),
        }),
    }
}

fn validate_dates(config: &dyn ConfigPort) -> Result<(), SentibtError> {
    let start_str = config.get_string("backtest", "start_date");
    let end_str = config.get_string("backtest", "end_date");

    let start_date = parse_date(start_str.as_deref(), "start_date")?;
    let end_date = parse_date(end_str.as_deref(), "end_date")?;

    if start_date > end_date {
        return Err(SentibtError::ConfigInvalid {
            section: "backtest".to_string(),
            key: "start_date".to_string(),
            reason: "start_date must not be after end_date".to_string(),
        });
    }
    Ok(())
}

fn parse_date(value: Option<&str>, field: &str) -> Result<NaiveDate, SentibtError> {
    match value {
        None => Err(SentibtError::ConfigMissing {
            section: "backtest".to_string(),
            key: field.to_string(),
        }),
        Some(s) => {
            NaiveDate::parse_from_str(s, "%Y-%m-%d").map_err(|_| SentibtError::ConfigInvalid {
                section: "backtest".to_string(),
                key: field.to_string(),
                reason: format!("invalid {} format, expected YYYY-MM-DD", field),
            })
        }
    }
}

fn validate_initial_cash(config: &dyn ConfigPort) -> Result<(), SentibtError> {
    let value = config.get_double("backtest", "initial_cash", 10_000.0);
    if value <= 0.0 {
        return Err(SentibtError::ConfigInvalid {
            section: "backtest".to_string(),
            key: "initial_cash".to_string(),
            reason: "initial_cash must be positive".to_string(),
        });
    }
    Ok(())
}

fn validate_rsi_mode(config: &dyn ConfigPort) -> Result<(), SentibtError> {
    let value = config
        .get_string("backtest", "rsi_mode")
        .unwrap_or_else(|| "standard".to_string());
    value
        .parse::<RsiMode>()
        .map_err(|reason| SentibtError::ConfigInvalid {
            section: "backtest".to_string(),
            key: "rsi_mode".to_string(),
            reason,
        })?;
    Ok(())
}

fn validate_lookback(config: &dyn ConfigPort) -> Result<(), SentibtError> {
    let value = config.get_int("backtest", "lookback_days", 90);
    if value < 0 {
        return Err(SentibtError::ConfigInvalid {
            section: "backtest".to_string(),
            key: "lookback_days".to_string(),
            reason: "lookback_days must be non-negative".to_string(),
        });
    }
    Ok(())
}

fn validate_periods(config: &dyn ConfigPort) -> Result<(), SentibtError> {
    for key in ["rsi_period", "adx_period"] {
        let value = config.get_int("indicators", key, 14);
        if value < 2 {
            return Err(SentibtError::ConfigInvalid {
                section: "indicators".to_string(),
                key: key.to_string(),
                reason: format!("{} must be at least 2", key),
            });
        }
    }
    Ok(())
}

fn validate_sentiment_window(config: &dyn ConfigPort) -> Result<(), SentibtError> {
    let value = config.get_int("sentiment", "window_days", 7);
    if value < 1 {
        return Err(SentibtError::ConfigInvalid {
            section: "sentiment".to_string(),
            key: "window_days".to_string(),
            reason: "window_days must be at least 1".to_string(),
        });
    }
    Ok(())
}

fn validate_fallback_pe(config: &dyn ConfigPort) -> Result<(), SentibtError> {
    let value = config.get_double("valuation", "fallback_pe", 20.0);
    if value <= 0.0 {
        return Err(SentibtError::ConfigInvalid {
            section: "valuation".to_string(),
            key: "fallback_pe".to_string(),
            reason: "fallback_pe must be positive".to_string(),
        });
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::adapters::file_config_adapter::FileConfigAdapter;

    fn minimal_config() -> &'static str {
        "[backtest]\n\
         ticker = NVDA\n\
         start_date = 2025-05-06\n\
         end_date = 2025-05-26\n\
         initial_cash = 10000\n"
    }

    #[test]
    fn minimal_config_is_valid() {
        let adapter = FileConfigAdapter::from_string(minimal_config()).unwrap();
        assert!(validate_backtest_config(&adapter).is_ok());
    }

    #[test]
    fn missing_ticker_rejected() {
        let content = "[backtest]\nstart_date = 2025-05-06\nend_date = 2025-05-26\n";
        let adapter = FileConfigAdapter::from_string(content).unwrap();
        let err = validate_backtest_config(&adapter).unwrap_err();
        assert!(matches!(err, SentibtError::ConfigMissing { ref key, .. } if key == "ticker"));
    }

    #[test]
    fn reversed_dates_rejected() {
        let content = "[backtest]\n\
             ticker = NVDA\n\
             start_date = 2025-05-26\n\
             end_date = 2025-05-06\n\
             initial_cash = 10000\n";
        let adapter = FileConfigAdapter::from_string(content).unwrap();
        let err = validate_backtest_config(&adapter).unwrap_err();
        assert!(matches!(err, SentibtError::ConfigInvalid { ref key, .. } if key == "start_date"));
    }

    #[test]
    fn bad_date_format_rejected() {
        let content = "[backtest]\n\
             ticker = NVDA\n\
             start_date = 06/05/2025\n\
             end_date = 2025-05-26\n\
             initial_cash = 10000\n";
        let adapter = FileConfigAdapter::from_string(content).unwrap();
        assert!(validate_backtest_config(&adapter).is_err());
    }

    #[test]
    fn non_positive_cash_rejected() {
        let content = "[backtest]\n\
             ticker = NVDA\n\
             start_date = 2025-05-06\n\
             end_date = 2025-05-26\n\
             initial_cash = 0\n";
        let adapter = FileConfigAdapter::from_string(content).unwrap();
        let err = validate_backtest_config(&adapter).unwrap_err();
        assert!(matches!(err, SentibtError::ConfigInvalid { ref key, .. } if key == "initial_cash"));
    }

    #[test]
    fn unknown_rsi_mode_rejected() {
        let content = format!("{}rsi_mode = reckless\n", minimal_config());
        let adapter = FileConfigAdapter::from_string(&content).unwrap();
        let err = validate_backtest_config(&adapter).unwrap_err();
        assert!(matches!(err, SentibtError::ConfigInvalid { ref key, .. } if key == "rsi_mode"));
    }

    #[test]
    fn short_period_rejected() {
        let content = format!("{}\n[indicators]\nrsi_period = 1\n", minimal_config());
        let adapter = FileConfigAdapter::from_string(&content).unwrap();
        let err = validate_backtest_config(&adapter).unwrap_err();
        assert!(matches!(err, SentibtError::ConfigInvalid { ref key, .. } if key == "rsi_period"));
    }

    #[test]
    fn bad_sentiment_window_rejected() {
        let content = format!("{}\n[sentiment]\nwindow_days = 0\n", minimal_config());
        let adapter = FileConfigAdapter::from_string(&content).unwrap();
        let err = validate_backtest_config(&adapter).unwrap_err();
        assert!(matches!(err, SentibtError::ConfigInvalid { ref key, .. } if key == "window_days"));
    }

    #[test]
    fn non_positive_fallback_pe_rejected() {
        let content = format!("{}\n[valuation]\nfallback_pe = -5\n", minimal_config());
        let adapter = FileConfigAdapter::from_string(&content).unwrap();
        let err = validate_backtest_config(&adapter).unwrap_err();
        assert!(matches!(err, SentibtError::ConfigInvalid { ref key, .. } if key == "fallback_pe"));
    }
}
