//! Signal log file adapter.
//!
//! Append-only operator log: one `[timestamp] message` line per event. The
//! file is created with a banner header on first use.

use crate::domain::error::DipbotError;
use crate::ports::log_port::SignalLogPort;
use chrono::Utc;
use std::fs::OpenOptions;
use std::io::Write;
use std::path::PathBuf;

const HEADER: &str = "=== Trading Signals Log ===\n";

pub struct SignalLogAdapter {
    path: PathBuf,
}

impl SignalLogAdapter {
    pub fn new(path: PathBuf) -> Result<Self, DipbotError> {
        if !path.exists() {
            let mut file = OpenOptions::new()
                .create(true)
                .append(true)
                .open(&path)?;
            file.write_all(HEADER.as_bytes())?;
        }
        Ok(Self { path })
    }
}

impl SignalLogPort for SignalLogAdapter {
    fn log_line(&self, message: &str) -> Result<(), DipbotError> {
        let timestamp = Utc::now().format("%Y-%m-%d %H:%M:%S");
        let mut file = OpenOptions::new()
            .create(true)
            .append(true)
            .open(&self.path)
            .map_err(|e| DipbotError::Sink {
                sink: "log".to_string(),
                reason: format!("failed to open {}: {}", self.path.display(), e),
            })?;

        writeln!(file, "[{}] {}", timestamp, message).map_err(|e| DipbotError::Sink {
            sink: "log".to_string(),
            reason: e.to_string(),
        })
    }
}
