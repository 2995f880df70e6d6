//! OHLCV candle representation.

use chrono::{DateTime, Duration, Utc};

#[derive(Debug, Clone, PartialEq)]
pub struct Candle {
    pub timestamp: DateTime<Utc>,
    pub open: f64,
    pub high: f64,
    pub low: f64,
    pub close: f64,
    pub volume: f64,
}

impl Candle {
    /// All fields finite and non-negative, with `low <= open/close <= high`.
    pub fn is_well_formed(&self) -> bool {
        let fields = [self.open, self.high, self.low, self.close, self.volume];
        if fields.iter().any(|v| !v.is_finite() || *v < 0.0) {
            return false;
        }
        self.low <= self.open
            && self.low <= self.close
            && self.open <= self.high
            && self.close <= self.high
    }
}

/// True when every bar is well formed and timestamps strictly ascend.
pub fn is_ordered_series(candles: &[Candle]) -> bool {
    candles.iter().all(Candle::is_well_formed)
        && candles
            .windows(2)
            .all(|pair| pair[0].timestamp < pair[1].timestamp)
}

/// Parse a bar timeframe like `5m`, `1h` or `1d` into a duration.
pub fn timeframe_duration(timeframe: &str) -> Option<Duration> {
    let timeframe = timeframe.trim();
    if timeframe.len() < 2 {
        return None;
    }
    let (count, unit) = timeframe.split_at(timeframe.len() - 1);
    let count: i64 = count.parse().ok().filter(|n| *n > 0)?;

    match unit {
        "s" => Some(Duration::seconds(count)),
        "m" => Some(Duration::minutes(count)),
        "h" => Some(Duration::hours(count)),
        "d" => Some(Duration::days(count)),
        "w" => Some(Duration::weeks(count)),
        _ => None,
    }
}
