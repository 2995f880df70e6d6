#![allow(dead_code)]

use chrono::{DateTime, Duration, TimeZone, Utc};
use dipbot::domain::candle::Candle;
use dipbot::domain::emitter::TradeRecord;
use dipbot::domain::error::DipbotError;
use dipbot::domain::pipeline::IndicatorFrame;
use dipbot::ports::data_port::MarketDataPort;
use dipbot::ports::ledger_port::LedgerPort;
use dipbot::ports::log_port::SignalLogPort;
use dipbot::ports::notify_port::NotifyPort;
use std::cell::RefCell;

pub fn start_time() -> DateTime<Utc> {
    Utc.with_ymd_and_hms(2024, 1, 1, 0, 0, 0).unwrap()
}

pub fn make_candle(i: usize, close: f64) -> Candle {
    Candle {
        timestamp: start_time() + Duration::minutes(5 * i as i64),
        open: close,
        high: close,
        low: close,
        close,
        volume: 1_000_000.0,
    }
}

pub fn make_candles(closes: &[f64]) -> Vec<Candle> {
    closes
        .iter()
        .enumerate()
        .map(|(i, &close)| make_candle(i, close))
        .collect()
}

pub fn flat_candles(n: usize, close: f64) -> Vec<Candle> {
    (0..n).map(|i| make_candle(i, close)).collect()
}

/// A frame satisfying all five entry conditions for a close of 0.08.
pub fn entry_frame() -> IndicatorFrame {
    IndicatorFrame {
        ma_short: Some(0.09),
        ma_long: Some(0.075),
        bb_upper: Some(0.11),
        bb_lower: Some(0.09),
        macd: Some(1.0),
        macd_signal: Some(0.5),
        rsi: Some(25.0),
        stoch: Some(10.0),
    }
}

/// A complete frame satisfying no entry condition.
pub fn neutral_frame() -> IndicatorFrame {
    IndicatorFrame {
        ma_short: Some(0.09),
        ma_long: Some(0.075),
        bb_upper: Some(0.11),
        bb_lower: Some(0.07),
        macd: Some(0.1),
        macd_signal: Some(0.5),
        rsi: Some(60.0),
        stoch: Some(60.0),
    }
}

pub struct MockDataPort {
    pub candles: Vec<Candle>,
    pub error: Option<String>,
}

impl MockDataPort {
    pub fn with_candles(candles: Vec<Candle>) -> Self {
        Self {
            candles,
            error: None,
        }
    }

    pub fn failing(reason: &str) -> Self {
        Self {
            candles: Vec::new(),
            error: Some(reason.to_string()),
        }
    }
}

impl MarketDataPort for MockDataPort {
    fn fetch_candles(
        &self,
        _symbol: &str,
        _timeframe: &str,
        limit: usize,
    ) -> Result<Vec<Candle>, DipbotError> {
        if let Some(reason) = &self.error {
            return Err(DipbotError::DataFetch {
                reason: reason.clone(),
            });
        }
        Ok(self.candles.iter().take(limit).cloned().collect())
    }
}

pub struct RecordingLog {
    pub lines: RefCell<Vec<String>>,
    pub fail: bool,
}

impl RecordingLog {
    pub fn new() -> Self {
        Self {
            lines: RefCell::new(Vec::new()),
            fail: false,
        }
    }

    pub fn failing() -> Self {
        Self {
            lines: RefCell::new(Vec::new()),
            fail: true,
        }
    }
}

impl SignalLogPort for RecordingLog {
    fn log_line(&self, message: &str) -> Result<(), DipbotError> {
        if self.fail {
            return Err(DipbotError::Sink {
                sink: "log".into(),
                reason: "write failed".into(),
            });
        }
        self.lines.borrow_mut().push(message.to_string());
        Ok(())
    }
}

pub struct RecordingNotifier {
    pub messages: RefCell<Vec<String>>,
    pub fail: bool,
}

impl RecordingNotifier {
    pub fn new() -> Self {
        Self {
            messages: RefCell::new(Vec::new()),
            fail: false,
        }
    }

    pub fn failing() -> Self {
        Self {
            messages: RefCell::new(Vec::new()),
            fail: true,
        }
    }
}

impl NotifyPort for RecordingNotifier {
    fn send_notification(&self, message: &str) -> Result<(), DipbotError> {
        if self.fail {
            return Err(DipbotError::Sink {
                sink: "notify".into(),
                reason: "unreachable".into(),
            });
        }
        self.messages.borrow_mut().push(message.to_string());
        Ok(())
    }
}

pub struct RecordingLedger {
    pub records: RefCell<Vec<TradeRecord>>,
    pub fail: bool,
}

impl RecordingLedger {
    pub fn new() -> Self {
        Self {
            records: RefCell::new(Vec::new()),
            fail: false,
        }
    }

    pub fn failing() -> Self {
        Self {
            records: RefCell::new(Vec::new()),
            fail: true,
        }
    }
}

impl LedgerPort for RecordingLedger {
    fn append_record(&self, record: &TradeRecord) -> Result<(), DipbotError> {
        if self.fail {
            return Err(DipbotError::Sink {
                sink: "ledger".into(),
                reason: "disk full".into(),
            });
        }
        self.records.borrow_mut().push(record.clone());
        Ok(())
    }
}
