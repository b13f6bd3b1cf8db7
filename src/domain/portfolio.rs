//! Portfolio accounting over the ledger's trade history.
//!
//! Closed-trade returns aggregate additively (non-compounding). A run
//! that only ever opened a single never-closed position is valued
//! mark-to-market at the last available close instead.

use std::fmt;

use crate::domain::ledger::{PositionLedger, PositionSide};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RunStatus {
    NoPositions,
    OpenedNotClosed,
    OpenedAndClosed,
}

impl fmt::Display for RunStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            RunStatus::NoPositions => write!(f, "No positions opened"),
            RunStatus::OpenedNotClosed => write!(f, "Opened but not closed"),
            RunStatus::OpenedAndClosed => write!(f, "Opened and closed"),
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct PortfolioSummary {
    pub status: RunStatus,
    pub final_cash: f64,
    pub gain_pct: f64,
}

/// Finalize a run: fold the ledger into a portfolio summary.
///
/// `last_close` is the final available closing price, used only for
/// mark-to-market valuation of a never-closed position.
pub fn summarize(
    initial_cash: f64,
    ledger: &PositionLedger,
    last_close: Option<f64>,
) -> PortfolioSummary {
    let closed = ledger.closed_trades();

    if !closed.is_empty() {
        let total_return: f64 = closed.iter().map(|t| t.realized_return).sum();
        return PortfolioSummary {
            status: RunStatus::OpenedAndClosed,
            final_cash: initial_cash * (1.0 + total_return),
            gain_pct: total_return * 100.0,
        };
    }

    if let Some((side, _open_date, open_price)) = ledger.open_position() {
        // Full allocation at the entry price, valued at the last close.
        let final_cash = match last_close {
            Some(close) if open_price > 0.0 => {
                let quantity = initial_cash / open_price;
                match side {
                    PositionSide::Long => quantity * close,
                    PositionSide::Short => initial_cash + quantity * (open_price - close),
                }
            }
            _ => initial_cash,
        };
        let gain_pct = if initial_cash > 0.0 {
            (final_cash - initial_cash) / initial_cash * 100.0
        } else {
            0.0
        };
        return PortfolioSummary {
            status: RunStatus::OpenedNotClosed,
            final_cash,
            gain_pct,
        };
    }

    PortfolioSummary {
        status: RunStatus::NoPositions,
        final_cash: initial_cash,
        gain_pct: 0.0,
    }
}
