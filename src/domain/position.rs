//! Position state machine and trade intents.
//!
//! A single speculative position: `Flat` or `Long`. Entry price and size
//! exist only while the position is open, so the enum is the invariant.
//! Transitions consume evaluator signals and produce at most one
//! [`TradeIntent`] each.

use chrono::{DateTime, Utc};
use std::fmt;

use crate::domain::candle::Candle;
use crate::domain::signal::Signal;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum IntentKind {
    Buy,
    Sell,
}

impl fmt::Display for IntentKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            IntentKind::Buy => write!(f, "BUY"),
            IntentKind::Sell => write!(f, "SELL"),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TradeReason {
    EntrySignal,
    StopLoss,
    TakeProfit,
}

impl fmt::Display for TradeReason {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            TradeReason::EntrySignal => write!(f, "entry-signal"),
            TradeReason::StopLoss => write!(f, "stop-loss"),
            TradeReason::TakeProfit => write!(f, "take-profit"),
        }
    }
}

/// A decided action, created by a state transition and consumed once by the
/// emitter.
#[derive(Debug, Clone, PartialEq)]
pub struct TradeIntent {
    pub kind: IntentKind,
    pub price: f64,
    pub amount: f64,
    pub reason: TradeReason,
    pub timestamp: DateTime<Utc>,
}

/// Strategy parameters shared by the evaluator and the state machine.
#[derive(Debug, Clone, PartialEq)]
pub struct StrategyParams {
    pub trade_notional: f64,
    pub stop_loss_pct: f64,
    pub take_profit_min_pct: f64,
    pub take_profit_max_pct: f64,
}

impl Default for StrategyParams {
    fn default() -> Self {
        StrategyParams {
            trade_notional: 1.0,
            stop_loss_pct: 0.10,
            take_profit_min_pct: 0.50,
            take_profit_max_pct: 1.00,
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub enum PositionState {
    Flat,
    Long { entry_price: f64, amount: f64 },
}

impl PositionState {
    pub fn is_flat(&self) -> bool {
        matches!(self, PositionState::Flat)
    }

    pub fn is_long(&self) -> bool {
        matches!(self, PositionState::Long { .. })
    }

    /// Apply an evaluator decision at the given candle. Signals that do not
    /// match the current state are ignored.
    pub fn apply(
        &mut self,
        signal: Signal,
        candle: &Candle,
        params: &StrategyParams,
    ) -> Option<TradeIntent> {
        match (&*self, signal) {
            (PositionState::Flat, Signal::Enter) => {
                let amount = params.trade_notional / candle.close;
                *self = PositionState::Long {
                    entry_price: candle.close,
                    amount,
                };
                Some(TradeIntent {
                    kind: IntentKind::Buy,
                    price: candle.close,
                    amount,
                    reason: TradeReason::EntrySignal,
                    timestamp: candle.timestamp,
                })
            }
            (PositionState::Long { amount, .. }, Signal::ExitStopLoss) => {
                let amount = *amount;
                *self = PositionState::Flat;
                Some(TradeIntent {
                    kind: IntentKind::Sell,
                    price: candle.close,
                    amount,
                    reason: TradeReason::StopLoss,
                    timestamp: candle.timestamp,
                })
            }
            (PositionState::Long { amount, .. }, Signal::ExitTakeProfit) => {
                let amount = *amount;
                *self = PositionState::Flat;
                Some(TradeIntent {
                    kind: IntentKind::Sell,
                    price: candle.close,
                    amount,
                    reason: TradeReason::TakeProfit,
                    timestamp: candle.timestamp,
                })
            }
            _ => None,
        }
    }
}
