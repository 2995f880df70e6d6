//! Binance market data adapter.
//!
//! Reads the public klines REST endpoint; no credentials are involved in
//! market data access. A kline row is a JSON array of
//! `[open_time_ms, open, high, low, close, volume, close_time_ms, ...]`
//! with the price fields encoded as numeric strings.

use crate::domain::candle::Candle;
use crate::domain::error::DipbotError;
use crate::ports::data_port::MarketDataPort;
use chrono::{TimeZone, Utc};
use serde_json::Value;

const DEFAULT_BASE_URL: &str = "https://api.binance.com";

pub struct BinanceDataAdapter {
    client: reqwest::blocking::Client,
    base_url: String,
}

impl BinanceDataAdapter {
    pub fn new() -> Self {
        Self::with_base_url(DEFAULT_BASE_URL.to_string())
    }

    pub fn with_base_url(base_url: String) -> Self {
        Self {
            client: reqwest::blocking::Client::new(),
            base_url,
        }
    }
}

impl Default for BinanceDataAdapter {
    fn default() -> Self {
        Self::new()
    }
}

impl MarketDataPort for BinanceDataAdapter {
    fn fetch_candles(
        &self,
        symbol: &str,
        timeframe: &str,
        limit: usize,
    ) -> Result<Vec<Candle>, DipbotError> {
        let url = format!("{}/api/v3/klines", self.base_url);
        let response = self
            .client
            .get(&url)
            .query(&[
                ("symbol", rest_symbol(symbol)),
                ("interval", timeframe.to_string()),
                ("limit", limit.to_string()),
            ])
            .send()
            .map_err(|e| fetch_err(e.to_string()))?
            .error_for_status()
            .map_err(|e| fetch_err(e.to_string()))?;

        let payload: Value = response.json().map_err(|e| fetch_err(e.to_string()))?;
        let mut candles = parse_klines(&payload)?;
        candles.sort_by_key(|c| c.timestamp);
        Ok(candles)
    }
}

/// Map an exchange pair like `DOGE/USDT` onto the REST spelling `DOGEUSDT`.
pub fn rest_symbol(symbol: &str) -> String {
    symbol
        .chars()
        .filter(|c| c.is_ascii_alphanumeric())
        .collect::<String>()
        .to_uppercase()
}

pub fn parse_klines(payload: &Value) -> Result<Vec<Candle>, DipbotError> {
    let rows = payload
        .as_array()
        .ok_or_else(|| fetch_err("expected a JSON array of klines".to_string()))?;

    let mut candles = Vec::with_capacity(rows.len());
    for row in rows {
        let fields = row
            .as_array()
            .filter(|f| f.len() >= 6)
            .ok_or_else(|| fetch_err("kline row has fewer than 6 fields".to_string()))?;

        let millis = fields[0]
            .as_i64()
            .ok_or_else(|| fetch_err("kline open time is not an integer".to_string()))?;
        let timestamp = Utc
            .timestamp_millis_opt(millis)
            .single()
            .ok_or_else(|| fetch_err(format!("kline open time {} out of range", millis)))?;

        candles.push(Candle {
            timestamp,
            open: number_field(&fields[1], "open")?,
            high: number_field(&fields[2], "high")?,
            low: number_field(&fields[3], "low")?,
            close: number_field(&fields[4], "close")?,
            volume: number_field(&fields[5], "volume")?,
        });
    }

    Ok(candles)
}

fn number_field(value: &Value, name: &str) -> Result<f64, DipbotError> {
    match value {
        Value::String(s) => s.parse().map_err(|_| {
            fetch_err(format!("kline {} field {:?} is not numeric", name, s))
        }),
        Value::Number(n) => n
            .as_f64()
            .ok_or_else(|| fetch_err(format!("kline {} field out of range", name))),
        _ => Err(fetch_err(format!("kline {} field has unexpected type", name))),
    }
}

fn fetch_err(reason: String) -> DipbotError {
    DipbotError::DataFetch { reason }
}
