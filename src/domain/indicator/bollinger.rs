//! Bollinger Bands indicator.
//!
//! - Middle: Simple Moving Average (SMA) over n periods
//! - Upper: Middle + (multiplier × StdDev)
//! - Lower: Middle - (multiplier × StdDev)
//!
//! StdDev is population standard deviation (divides by N, not N-1).
//! The multiplier is carried as hundredths so the indicator identity stays
//! hashable; 200 means 2.0.
//!
//! Default parameters: period=20, multiplier=2.0
//! Warmup: first (period-1) bars are invalid.

use crate::domain::candle::Candle;
use crate::domain::indicator::{IndicatorPoint, IndicatorSeries, IndicatorType, IndicatorValue};

pub fn calculate_bollinger(
    candles: &[Candle],
    period: usize,
    stddev_mult_x100: u32,
) -> IndicatorSeries {
    let mut values = Vec::with_capacity(candles.len());
    let mult = stddev_mult_x100 as f64 / 100.0;

    for i in 0..candles.len() {
        let valid = period > 0 && i + 1 >= period;

        let (upper, middle, lower) = if valid {
            let start = i + 1 - period;
            let window = &candles[start..=i];

            let middle_val: f64 = window.iter().map(|c| c.close).sum::<f64>() / period as f64;

            let variance: f64 = window
                .iter()
                .map(|c| {
                    let diff = c.close - middle_val;
                    diff * diff
                })
                .sum::<f64>()
                / period as f64;

            let stddev = variance.sqrt();
            (middle_val + mult * stddev, middle_val, middle_val - mult * stddev)
        } else {
            (0.0, 0.0, 0.0)
        };

        values.push(IndicatorPoint {
            timestamp: candles[i].timestamp,
            valid,
            value: IndicatorValue::Bollinger {
                upper,
                middle,
                lower,
            },
        });
    }

    IndicatorSeries {
        indicator_type: IndicatorType::Bollinger {
            period,
            stddev_mult_x100,
        },
        values,
    }
}
