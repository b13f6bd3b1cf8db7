//! CLI definition and dispatch.

use chrono::NaiveDate;
use clap::{Parser, Subcommand};
use std::path::PathBuf;
use std::process::ExitCode;

use crate::adapters::config_valuation_adapter::ConfigValuationAdapter;
use crate::adapters::csv_price_adapter::CsvPriceAdapter;
use crate::adapters::csv_report_adapter::CsvReportAdapter;
use crate::adapters::csv_sentiment_adapter::CsvSentimentAdapter;
use crate::adapters::file_config_adapter::FileConfigAdapter;
use crate::domain::backtest::{run_backtest, BacktestConfig, DayOutcome};
use crate::domain::config_validation::validate_backtest_config;
use crate::domain::error::SentibtError;
use crate::domain::signal::RsiMode;
use crate::domain::strategy::generate_trading_signal;
use crate::ports::config_port::ConfigPort;
use crate::ports::report_port::ReportPort;

#[derive(Parser, Debug)]
#[command(name = "sentibt", about = "Hybrid technical/sentiment signal backtester")]
pub struct Cli {
    #[command(subcommand)]
    pub command: Command,
}

#[derive(Subcommand, Debug)]
pub enum Command {
    /// Run a backtest over a historical date range
    Backtest {
        #[arg(short, long)]
        config: PathBuf,
        #[arg(short, long)]
        output: Option<PathBuf>,
        #[arg(long)]
        ticker: Option<String>,
        #[arg(long)]
        dry_run: bool,
    },
    /// Evaluate a single trading signal from explicit inputs
    Signal {
        #[arg(long)]
        rsi: f64,
        #[arg(long)]
        adx: f64,
        #[arg(long, default_value_t = 20.0)]
        pe: f64,
        #[arg(long)]
        sentiment: f64,
        #[arg(long, default_value = "standard")]
        mode: String,
    },
    /// Validate a backtest configuration
    Validate {
        #[arg(short, long)]
        config: PathBuf,
    },
}

pub fn run(cli: Cli) -> ExitCode {
    match cli.command {
        Command::Backtest {
            config,
            output,
            ticker,
            dry_run,
        } => {
            if dry_run {
                run_validate(&config)
            } else {
                run_backtest_command(&config, output.as_ref(), ticker.as_deref())
            }
        }
        Command::Signal {
            rsi,
            adx,
            pe,
            sentiment,
            mode,
        } => run_signal(rsi, adx, pe, sentiment, &mode),
        Command::Validate { config } => run_validate(&config),
    }
}

pub fn load_config(path: &PathBuf) -> Result<FileConfigAdapter, ExitCode> {
    FileConfigAdapter::from_file(path).map_err(|e| {
        let err = SentibtError::ConfigParse {
            file: path.display().to_string(),
            reason: e.to_string(),
        };
        eprintln!("error: {err}");
        ExitCode::from(&err)
    })
}

pub fn build_backtest_config(
    adapter: &dyn ConfigPort,
    ticker_override: Option<&str>,
) -> Result<BacktestConfig, SentibtError> {
    let ticker = match ticker_override {
        Some(t) => t.to_uppercase(),
        None => adapter
            .get_string("backtest", "ticker")
            .ok_or_else(|| SentibtError::ConfigMissing {
                section: "backtest".into(),
                key: "ticker".into(),
            })?
            .to_uppercase(),
    };

    let parse_date = |key: &str| -> Result<NaiveDate, SentibtError> {
        let value =
            adapter
                .get_string("backtest", key)
                .ok_or_else(|| SentibtError::ConfigMissing {
                    section: "backtest".into(),
                    key: key.into(),
                })?;
        NaiveDate::parse_from_str(&value, "%Y-%m-%d").map_err(|_| SentibtError::ConfigInvalid {
            section: "backtest".into(),
            key: key.into(),
            reason: "invalid date format (expected YYYY-MM-DD)".into(),
        })
    };

    let parse_period = |key: &str| -> Result<usize, SentibtError> {
        let value = adapter.get_int("indicators", key, 14);
        usize::try_from(value).map_err(|_| SentibtError::ConfigInvalid {
            section: "indicators".into(),
            key: key.into(),
            reason: format!("{} must be non-negative", key),
        })
    };

    let rsi_mode: RsiMode = adapter
        .get_string("backtest", "rsi_mode")
        .unwrap_or_else(|| "standard".to_string())
        .parse()
        .map_err(|reason| SentibtError::ConfigInvalid {
            section: "backtest".into(),
            key: "rsi_mode".into(),
            reason,
        })?;

    Ok(BacktestConfig {
        ticker,
        start_date: parse_date("start_date")?,
        end_date: parse_date("end_date")?,
        initial_cash: adapter.get_double("backtest", "initial_cash", 10_000.0),
        rsi_period: parse_period("rsi_period")?,
        adx_period: parse_period("adx_period")?,
        rsi_mode,
        sentiment_window_days: adapter.get_int("sentiment", "window_days", 7),
        lookback_days: adapter.get_int("backtest", "lookback_days", 90),
        fallback_pe: adapter.get_double("valuation", "fallback_pe", 20.0),
    })
}

fn run_backtest_command(
    config_path: &PathBuf,
    output_path: Option<&PathBuf>,
    ticker_override: Option<&str>,
) -> ExitCode {
    eprintln!("Loading config from {}", config_path.display());
    let adapter = match load_config(config_path) {
        Ok(a) => a,
        Err(code) => return code,
    };

    if let Err(e) = validate_backtest_config(&adapter) {
        eprintln!("error: {e}");
        return (&e).into();
    }

    let bt_config = match build_backtest_config(&adapter, ticker_override) {
        Ok(c) => c,
        Err(e) => {
            eprintln!("error: {e}");
            return (&e).into();
        }
    };

    let prices_path = match adapter.get_string("data", "prices_path") {
        Some(p) => PathBuf::from(p),
        None => {
            let err = SentibtError::ConfigMissing {
                section: "data".into(),
                key: "prices_path".into(),
            };
            eprintln!("error: {err}");
            return (&err).into();
        }
    };
    let sentiment_path = adapter
        .get_string("sentiment", "data_path")
        .map(PathBuf::from)
        .unwrap_or_else(|| prices_path.clone());

    let data_port = CsvPriceAdapter::new(prices_path);
    let sentiment_port = CsvSentimentAdapter::new(sentiment_path);
    let valuation_port = ConfigValuationAdapter::from_config(&adapter, &[bt_config.ticker.as_str()]);

    eprintln!(
        "Running backtest: {} from {} to {}",
        bt_config.ticker, bt_config.start_date, bt_config.end_date,
    );

    let result = match run_backtest(&bt_config, &data_port, &sentiment_port, &valuation_port) {
        Ok(r) => r,
        Err(e) => {
            eprintln!("error: {e}");
            return (&e).into();
        }
    };

    for day in &result.days {
        match day {
            DayOutcome::Evaluated(r) => {
                eprintln!(
                    "{},{:.2},{:.1},{:.1},{:.1},{},{},{}",
                    r.date,
                    r.close,
                    r.sentiment_score,
                    r.rsi,
                    r.adx,
                    r.signal,
                    r.confidence_level,
                    r.explanation,
                );
            }
            DayOutcome::Skipped { date, reason } => {
                eprintln!("{}: skipped ({reason})", date);
            }
            DayOutcome::Failed { date, error } => {
                eprintln!("{}: failed ({error})", date);
            }
        }
    }

    eprintln!("\n=== Position Events ===");
    if result.events.is_empty() {
        eprintln!("  (none)");
    }
    for event in &result.events {
        match event {
            crate::domain::ledger::LedgerEvent::Opened { side, date, price } => {
                eprintln!("  Opened {} position on {} at {:.2}", side, date, price);
            }
            crate::domain::ledger::LedgerEvent::Closed {
                side,
                date,
                price,
                realized_return,
            } => {
                eprintln!(
                    "  Closed {} position on {} at {:.2} ({:+.2}%)",
                    side,
                    date,
                    price,
                    realized_return * 100.0,
                );
            }
        }
    }
    if let Some((side, date, price)) = result.open_position {
        eprintln!(
            "  {} position still open at end of period (entered {} at {:.2})",
            side, date, price,
        );
    }

    eprintln!("\n=== Summary ===");
    eprintln!("Status:       {}", result.summary.status);
    eprintln!("Final Cash:   {:.2}", result.summary.final_cash);
    eprintln!("Total Return: {:.2}%", result.summary.gain_pct);

    let output = output_path
        .map(|p| p.to_string_lossy().into_owned())
        .or_else(|| adapter.get_string("report", "output_path"))
        .unwrap_or_else(|| format!("{}_backtest_output.csv", bt_config.ticker));

    match CsvReportAdapter.write(&result, &output) {
        Ok(()) => {
            eprintln!("\nReport written to: {output}");
            ExitCode::SUCCESS
        }
        Err(e) => {
            eprintln!("error: failed to write report: {e}");
            (&e).into()
        }
    }
}

fn run_signal(rsi: f64, adx: f64, pe: f64, sentiment: f64, mode: &str) -> ExitCode {
    let rsi_mode: RsiMode = match mode.parse() {
        Ok(m) => m,
        Err(reason) => {
            eprintln!("error: {reason}");
            return ExitCode::from(4);
        }
    };

    match generate_trading_signal(rsi, adx, pe, sentiment, rsi_mode) {
        Ok(result) => {
            println!("Signal:     {}", result.signal);
            println!("Confidence: {}", result.confidence_level);
            println!("Score:      {:.2}", result.total_score);
            println!("Rationale:  {}", result.explanation);
            ExitCode::SUCCESS
        }
        Err(e) => {
            let err: SentibtError = e.into();
            eprintln!("error: {err}");
            (&err).into()
        }
    }
}

fn run_validate(config_path: &PathBuf) -> ExitCode {
    eprintln!("Loading config from {}", config_path.display());
    let adapter = match load_config(config_path) {
        Ok(a) => a,
        Err(code) => return code,
    };

    if let Err(e) = validate_backtest_config(&adapter) {
        eprintln!("error: {e}");
        return (&e).into();
    }

    eprintln!("Config validated successfully");
    ExitCode::SUCCESS
}
