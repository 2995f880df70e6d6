//! Stochastic oscillator (%K).
//!
//! %K = 100 * (close - min(low)) / (max(high) - min(low)) over the trailing
//! n bars. A flat range (zero denominator) is defined as 50 so the value
//! never becomes NaN.
//!
//! Default parameter: period=14
//! Warmup: first (period-1) bars are invalid.

use crate::domain::candle::Candle;
use crate::domain::indicator::{IndicatorPoint, IndicatorSeries, IndicatorType, IndicatorValue};

pub fn calculate_stochastic(candles: &[Candle], period: usize) -> IndicatorSeries {
    let mut values = Vec::with_capacity(candles.len());

    for i in 0..candles.len() {
        let valid = period > 0 && i + 1 >= period;

        let k = if valid {
            let start = i + 1 - period;
            let window = &candles[start..=i];

            let min_low = window.iter().map(|c| c.low).fold(f64::INFINITY, f64::min);
            let max_high = window
                .iter()
                .map(|c| c.high)
                .fold(f64::NEG_INFINITY, f64::max);

            let range = max_high - min_low;
            if range == 0.0 {
                50.0
            } else {
                100.0 * (candles[i].close - min_low) / range
            }
        } else {
            0.0
        };

        values.push(IndicatorPoint {
            timestamp: candles[i].timestamp,
            valid,
            value: IndicatorValue::Simple(k),
        });
    }

    IndicatorSeries {
        indicator_type: IndicatorType::StochasticK(period),
        values,
    }
}
