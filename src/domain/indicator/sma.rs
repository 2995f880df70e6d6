//! Simple Moving Average indicator.
//!
//! Arithmetic mean of close over the trailing n bars.
//! Warmup: first (n-1) bars are invalid.

use crate::domain::candle::Candle;
use crate::domain::indicator::{IndicatorPoint, IndicatorSeries, IndicatorType, IndicatorValue};

pub fn calculate_sma(candles: &[Candle], period: usize) -> IndicatorSeries {
    let mut values = Vec::with_capacity(candles.len());
    let mut sum = 0.0;

    for (i, candle) in candles.iter().enumerate() {
        sum += candle.close;
        if i >= period {
            sum -= candles[i - period].close;
        }

        let valid = period > 0 && i >= period - 1;
        let value = if valid { sum / period as f64 } else { 0.0 };

        values.push(IndicatorPoint {
            timestamp: candle.timestamp,
            valid,
            value: IndicatorValue::Simple(value),
        });
    }

    IndicatorSeries {
        indicator_type: IndicatorType::Sma(period),
        values,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{Duration, TimeZone, Utc};

    fn make_candles(prices: &[f64]) -> Vec<Candle> {
        let start = Utc.with_ymd_and_hms(2024, 1, 1, 0, 0, 0).unwrap();
        prices
            .iter()
            .enumerate()
            .map(|(i, &close)| Candle {
                timestamp: start + Duration::minutes(5 * i as i64),
                open: close,
                high: close,
                low: close,
                close,
                volume: 1000.0,
            })
            .collect()
    }

    #[test]
    fn sma_warmup() {
        let candles = make_candles(&[10.0, 20.0, 30.0, 40.0, 50.0]);
        let series = calculate_sma(&candles, 3);

        assert!(!series.values[0].valid);
        assert!(!series.values[1].valid);
        assert!(series.values[2].valid);
        assert!(series.values[3].valid);
        assert!(series.values[4].valid);
    }

    #[test]
    fn sma_rolling_mean() {
        let candles = make_candles(&[10.0, 20.0, 30.0, 40.0, 50.0]);
        let series = calculate_sma(&candles, 3);

        if let IndicatorValue::Simple(v) = series.values[2].value {
            assert!((v - 20.0).abs() < 1e-10);
        }
        if let IndicatorValue::Simple(v) = series.values[3].value {
            assert!((v - 30.0).abs() < 1e-10);
        }
        if let IndicatorValue::Simple(v) = series.values[4].value {
            assert!((v - 40.0).abs() < 1e-10);
        }
    }

    #[test]
    fn sma_period_1_tracks_close() {
        let candles = make_candles(&[10.0, 20.0, 30.0]);
        let series = calculate_sma(&candles, 1);

        for (i, point) in series.values.iter().enumerate() {
            assert!(point.valid);
            if let IndicatorValue::Simple(v) = point.value {
                assert!((v - candles[i].close).abs() < f64::EPSILON);
            }
        }
    }

    #[test]
    fn sma_period_0_all_invalid() {
        let candles = make_candles(&[10.0, 20.0]);
        let series = calculate_sma(&candles, 0);
        assert_eq!(series.values.len(), 2);
        assert!(series.values.iter().all(|p| !p.valid));
    }

    #[test]
    fn sma_insufficient_history_all_invalid() {
        let candles = make_candles(&[10.0, 20.0, 30.0]);
        let series = calculate_sma(&candles, 5);
        assert_eq!(series.values.len(), 3);
        assert!(series.values.iter().all(|p| !p.valid));
    }

    #[test]
    fn sma_indicator_type() {
        let candles = make_candles(&[10.0]);
        let series = calculate_sma(&candles, 20);
        assert_eq!(series.indicator_type, IndicatorType::Sma(20));
    }
}
