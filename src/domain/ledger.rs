//! Single-position trade ledger state machine.
//!
//! At most one position is open at any time. The state is a single
//! tagged enum, so "long and short at once" is unrepresentable. The
//! ledger is driven once per simulated day by that day's final signal
//! and the day's closing price.

use chrono::NaiveDate;
use std::fmt;

use crate::domain::signal::TradingSignal;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PositionSide {
    Long,
    Short,
}

impl fmt::Display for PositionSide {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            PositionSide::Long => write!(f, "long"),
            PositionSide::Short => write!(f, "short"),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub enum PositionState {
    Flat,
    Long { open_date: NaiveDate, open_price: f64 },
    Short { open_date: NaiveDate, open_price: f64 },
}

/// A completed round trip with its realized fractional return.
#[derive(Debug, Clone, PartialEq)]
pub struct ClosedTrade {
    pub side: PositionSide,
    pub open_date: NaiveDate,
    pub open_price: f64,
    pub close_date: NaiveDate,
    pub close_price: f64,
    pub realized_return: f64,
}

/// Open/close event, recorded in chronological order.
#[derive(Debug, Clone, PartialEq)]
pub enum LedgerEvent {
    Opened {
        side: PositionSide,
        date: NaiveDate,
        price: f64,
    },
    Closed {
        side: PositionSide,
        date: NaiveDate,
        price: f64,
        realized_return: f64,
    },
}

#[derive(Debug, Clone)]
pub struct PositionLedger {
    state: PositionState,
    events: Vec<LedgerEvent>,
    closed_trades: Vec<ClosedTrade>,
}

impl Default for PositionLedger {
    fn default() -> Self {
        Self::new()
    }
}

impl PositionLedger {
    pub fn new() -> Self {
        PositionLedger {
            state: PositionState::Flat,
            events: Vec::new(),
            closed_trades: Vec::new(),
        }
    }

    pub fn state(&self) -> PositionState {
        self.state
    }

    pub fn events(&self) -> &[LedgerEvent] {
        &self.events
    }

    pub fn closed_trades(&self) -> &[ClosedTrade] {
        &self.closed_trades
    }

    /// The still-open position, if the ledger is non-Flat.
    pub fn open_position(&self) -> Option<(PositionSide, NaiveDate, f64)> {
        match self.state {
            PositionState::Flat => None,
            PositionState::Long {
                open_date,
                open_price,
            } => Some((PositionSide::Long, open_date, open_price)),
            PositionState::Short {
                open_date,
                open_price,
            } => Some((PositionSide::Short, open_date, open_price)),
        }
    }

    /// Apply one day's final signal at that day's close.
    ///
    /// Transitions:
    /// - Flat + Buy opens a long; Flat + Sell opens a short.
    /// - Long + Hold/Sell closes the long at the day's close.
    /// - Short + Hold/Buy closes the short at the day's close.
    /// - Everything else (Long + Buy, Short + Sell, Flat + Hold) is a no-op.
    ///
    /// Closing never opens the opposite side on the same day.
    pub fn apply(
        &mut self,
        date: NaiveDate,
        close: f64,
        signal: TradingSignal,
    ) -> Option<LedgerEvent> {
        let event = match (self.state, signal) {
            (PositionState::Flat, TradingSignal::Buy) => {
                self.state = PositionState::Long {
                    open_date: date,
                    open_price: close,
                };
                Some(LedgerEvent::Opened {
                    side: PositionSide::Long,
                    date,
                    price: close,
                })
            }
            (PositionState::Flat, TradingSignal::Sell) => {
                self.state = PositionState::Short {
                    open_date: date,
                    open_price: close,
                };
                Some(LedgerEvent::Opened {
                    side: PositionSide::Short,
                    date,
                    price: close,
                })
            }
            (
                PositionState::Long {
                    open_date,
                    open_price,
                },
                TradingSignal::Hold | TradingSignal::Sell,
            ) => Some(self.close(PositionSide::Long, open_date, open_price, date, close)),
            (
                PositionState::Short {
                    open_date,
                    open_price,
                },
                TradingSignal::Hold | TradingSignal::Buy,
            ) => Some(self.close(PositionSide::Short, open_date, open_price, date, close)),
            _ => None,
        };

        if let Some(ref e) = event {
            self.events.push(e.clone());
        }
        event
    }

    fn close(
        &mut self,
        side: PositionSide,
        open_date: NaiveDate,
        open_price: f64,
        close_date: NaiveDate,
        close_price: f64,
    ) -> LedgerEvent {
        let realized_return = match side {
            PositionSide::Long => (close_price - open_price) / open_price,
            PositionSide::Short => (open_price - close_price) / open_price,
        };

        self.state = PositionState::Flat;
        self.closed_trades.push(ClosedTrade {
            side,
            open_date,
            open_price,
            close_date,
            close_price,
            realized_return,
        });

        LedgerEvent::Closed {
            side,
            date: close_date,
            price: close_price,
            realized_return,
        }
    }
}
