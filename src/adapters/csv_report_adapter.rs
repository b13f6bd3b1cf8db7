//! CSV report adapter.
//!
//! Exports the per-day records plus a summary file. The record column
//! names and order are the compatibility surface for downstream
//! reports; do not reorder them.

use crate::domain::backtest::BacktestResult;
use crate::domain::error::SentibtError;
use crate::ports::report_port::ReportPort;
use std::path::Path;

pub struct CsvReportAdapter;

const RECORD_HEADER: [&str; 10] = [
    "Date",
    "Close",
    "SentimentScore",
    "RSI",
    "ADX",
    "PE_ratio",
    "RSI_mode",
    "Signal",
    "Confidence_Level",
    "Total_Score",
];

fn summary_path(output_path: &str) -> String {
    let path = Path::new(output_path);
    let stem = path
        .file_stem()
        .map(|s| s.to_string_lossy().into_owned())
        .unwrap_or_else(|| "report".to_string());
    let ext = path
        .extension()
        .map(|s| s.to_string_lossy().into_owned())
        .unwrap_or_else(|| "csv".to_string());
    match path.parent() {
        Some(parent) if !parent.as_os_str().is_empty() => parent
            .join(format!("{}_summary.{}", stem, ext))
            .to_string_lossy()
            .into_owned(),
        _ => format!("{}_summary.{}", stem, ext),
    }
}

impl ReportPort for CsvReportAdapter {
    fn write(&self, result: &BacktestResult, output_path: &str) -> Result<(), SentibtError> {
        let mut wtr = csv::Writer::from_path(output_path).map_err(|e| SentibtError::Data {
            reason: format!("failed to write {}: {}", output_path, e),
        })?;

        wtr.write_record(RECORD_HEADER)
            .map_err(|e| SentibtError::Data {
                reason: format!("CSV write error: {}", e),
            })?;

        for record in result.records() {
            wtr.write_record([
                record.date.format("%Y-%m-%d").to_string(),
                format!("{}", record.close),
                format!("{}", record.sentiment_score),
                format!("{}", record.rsi),
                format!("{}", record.adx),
                format!("{}", record.pe_ratio),
                record.rsi_mode.to_string(),
                record.signal.to_string(),
                record.confidence_level.clone(),
                format!("{}", record.total_score),
            ])
            .map_err(|e| SentibtError::Data {
                reason: format!("CSV write error: {}", e),
            })?;
        }
        wtr.flush()?;

        let summary = &result.summary;
        let summary_out = summary_path(output_path);
        let mut wtr = csv::Writer::from_path(&summary_out).map_err(|e| SentibtError::Data {
            reason: format!("failed to write {}: {}", summary_out, e),
        })?;
        wtr.write_record(["Status", "Final_Cash", "Gain_Pct"])
            .map_err(|e| SentibtError::Data {
                reason: format!("CSV write error: {}", e),
            })?;
        wtr.write_record([
            summary.status.to_string(),
            format!("{:.2}", summary.final_cash),
            format!("{:.2}", summary.gain_pct),
        ])
        .map_err(|e| SentibtError::Data {
            reason: format!("CSV write error: {}", e),
        })?;
        wtr.flush()?;

        Ok(())
    }
}
