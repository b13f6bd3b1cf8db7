//! Config-backed valuation adapter.
//!
//! P/E ratios rarely move enough day-to-day to matter for a confidence
//! multiplier, so a static per-ticker value from the `[valuation]`
//! config section stands in for a live lookup. An absent key means
//! unavailable and lets the driver fall back.

use crate::domain::error::SentibtError;
use crate::ports::config_port::ConfigPort;
use crate::ports::valuation_port::ValuationPort;

pub struct ConfigValuationAdapter {
    pe_ratios: std::collections::HashMap<String, f64>,
}

impl ConfigValuationAdapter {
    /// Reads `pe_<ticker>` keys from the `[valuation]` section for the
    /// given tickers.
    pub fn from_config(config: &dyn ConfigPort, tickers: &[&str]) -> Self {
        let mut pe_ratios = std::collections::HashMap::new();
        for ticker in tickers {
            let key = format!("pe_{}", ticker.to_lowercase());
            if let Some(value) = config.get_string("valuation", &key) {
                if let Ok(pe) = value.trim().parse::<f64>() {
                    pe_ratios.insert(ticker.to_uppercase(), pe);
                }
            }
        }
        Self { pe_ratios }
    }
}

impl ValuationPort for ConfigValuationAdapter {
    fn pe_ratio(&self, ticker: &str) -> Result<Option<f64>, SentibtError> {
        Ok(self.pe_ratios.get(&ticker.to_uppercase()).copied())
    }
}
