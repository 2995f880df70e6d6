//! Trade intent emitter.
//!
//! Packages a decided intent into the normalized execution message and
//! ledger record, then forwards to the signal-log, notification and ledger
//! sinks in that order. All three sinks are always attempted; a failing sink
//! is recorded in the [`SinkReport`] and never blocks the others.

use std::fmt;

use crate::domain::error::DipbotError;
use crate::domain::position::{IntentKind, TradeIntent, TradeReason};
use crate::ports::ledger_port::LedgerPort;
use crate::ports::log_port::SignalLogPort;
use crate::ports::notify_port::NotifyPort;
use chrono::{DateTime, Utc};

/// Output label only: decision logic is identical in both modes.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RunMode {
    Live,
    Demo,
}

impl fmt::Display for RunMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            RunMode::Live => write!(f, "LIVE"),
            RunMode::Demo => write!(f, "DEMO"),
        }
    }
}

/// One row of the durable trade ledger.
#[derive(Debug, Clone, PartialEq)]
pub struct TradeRecord {
    pub timestamp: DateTime<Utc>,
    pub mode: RunMode,
    pub kind: IntentKind,
    pub price: f64,
    pub amount: f64,
    pub reason: TradeReason,
}

#[derive(Debug)]
pub struct SinkFailure {
    pub sink: &'static str,
    pub error: DipbotError,
}

/// Per-sink outcomes of one emit call.
#[derive(Debug, Default)]
pub struct SinkReport {
    pub failures: Vec<SinkFailure>,
}

impl SinkReport {
    pub fn is_clean(&self) -> bool {
        self.failures.is_empty()
    }
}

pub struct IntentEmitter<'a> {
    pub log: &'a dyn SignalLogPort,
    pub notify: &'a dyn NotifyPort,
    pub ledger: &'a dyn LedgerPort,
    pub mode: RunMode,
    pub symbol: &'a str,
}

impl IntentEmitter<'_> {
    /// The operator-facing execution line, also mirrored to the notifier.
    pub fn message(&self, intent: &TradeIntent) -> String {
        format!(
            "[{}] {} {:.4} {} at {:.8} | Reason: {}",
            self.mode, intent.kind, intent.amount, self.symbol, intent.price, intent.reason
        )
    }

    pub fn emit(&self, intent: &TradeIntent) -> SinkReport {
        let mut report = SinkReport::default();

        let executed = format!(
            "Trade executed: {} {:.4} {} at {:.8}",
            intent.kind, intent.amount, self.symbol, intent.price
        );
        if let Err(error) = self.log.log_line(&executed) {
            report.failures.push(SinkFailure { sink: "log", error });
        }

        if let Err(error) = self.notify.send_notification(&self.message(intent)) {
            report.failures.push(SinkFailure {
                sink: "notify",
                error,
            });
        }

        let record = TradeRecord {
            timestamp: intent.timestamp,
            mode: self.mode,
            kind: intent.kind,
            price: intent.price,
            amount: intent.amount,
            reason: intent.reason,
        };
        if let Err(error) = self.ledger.append_record(&record) {
            report.failures.push(SinkFailure {
                sink: "ledger",
                error,
            });
        }

        report
    }
}
