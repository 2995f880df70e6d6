//! CSV trade ledger adapter.
//!
//! Append-only `trades.csv`. The header row is written once, when the file
//! is missing or empty; price and amount are fixed 8-decimal text.

use crate::domain::emitter::TradeRecord;
use crate::domain::error::DipbotError;
use crate::ports::ledger_port::LedgerPort;
use serde::Serialize;
use std::fs::OpenOptions;
use std::path::PathBuf;

#[derive(Serialize)]
struct LedgerRow {
    timestamp: String,
    mode: String,
    trade_type: String,
    price: String,
    amount: String,
    reason: String,
}

pub struct CsvLedgerAdapter {
    path: PathBuf,
}

impl CsvLedgerAdapter {
    pub fn new(path: PathBuf) -> Self {
        Self { path }
    }

    fn needs_header(&self) -> bool {
        std::fs::metadata(&self.path)
            .map(|m| m.len() == 0)
            .unwrap_or(true)
    }
}

impl LedgerPort for CsvLedgerAdapter {
    fn append_record(&self, record: &TradeRecord) -> Result<(), DipbotError> {
        let sink_err = |reason: String| DipbotError::Sink {
            sink: "ledger".to_string(),
            reason,
        };

        let write_header = self.needs_header();
        let file = OpenOptions::new()
            .create(true)
            .append(true)
            .open(&self.path)
            .map_err(|e| sink_err(format!("failed to open {}: {}", self.path.display(), e)))?;

        let mut writer = csv::WriterBuilder::new()
            .has_headers(write_header)
            .from_writer(file);

        let row = LedgerRow {
            timestamp: record.timestamp.to_rfc3339(),
            mode: record.mode.to_string(),
            trade_type: record.kind.to_string(),
            price: format!("{:.8}", record.price),
            amount: format!("{:.8}", record.amount),
            reason: record.reason.to_string(),
        };

        writer
            .serialize(row)
            .map_err(|e| sink_err(e.to_string()))?;
        writer.flush().map_err(|e| sink_err(e.to_string()))
    }
}
