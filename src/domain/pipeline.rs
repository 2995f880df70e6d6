//! Indicator pipeline: derives the per-candle frame the evaluator reads.
//!
//! The pipeline computes each configured indicator series over the whole
//! candle series, then zips them into [`IndicatorFrame`] rows aligned 1:1
//! with the input. A field is `None` while its defining window exceeds the
//! available history; the warm-up boundary falls out of the configured
//! window sizes rather than a fixed constant.

use crate::domain::candle::Candle;
use crate::domain::indicator::{
    calculate_bollinger, calculate_macd, calculate_rsi, calculate_sma, calculate_stochastic,
    IndicatorSeries, IndicatorValue,
};

#[derive(Debug, Clone, PartialEq)]
pub struct IndicatorConfig {
    pub ma_short_window: usize,
    pub ma_long_window: usize,
    pub bb_window: usize,
    pub bb_mult: f64,
    pub macd_fast: usize,
    pub macd_slow: usize,
    pub macd_signal_period: usize,
    pub rsi_period: usize,
    pub stoch_period: usize,
}

impl Default for IndicatorConfig {
    fn default() -> Self {
        IndicatorConfig {
            ma_short_window: 20,
            ma_long_window: 200,
            bb_window: 20,
            bb_mult: 2.0,
            macd_fast: 12,
            macd_slow: 26,
            macd_signal_period: 9,
            rsi_period: 14,
            stoch_period: 14,
        }
    }
}

impl IndicatorConfig {
    /// Bollinger multiplier in hundredths, the representation the indicator
    /// identity uses.
    pub fn bb_mult_x100(&self) -> u32 {
        (self.bb_mult * 100.0).round() as u32
    }

    /// First index at which every frame field is defined (199 with defaults).
    pub fn warmup_index(&self) -> usize {
        let ma_short = self.ma_short_window.saturating_sub(1);
        let ma_long = self.ma_long_window.saturating_sub(1);
        let bb = self.bb_window.saturating_sub(1);
        let macd =
            self.macd_slow.saturating_sub(1) + self.macd_signal_period.saturating_sub(1);
        let rsi = self.rsi_period;
        let stoch = self.stoch_period.saturating_sub(1);

        ma_short.max(ma_long).max(bb).max(macd).max(rsi).max(stoch)
    }
}

/// Derived values for one candle; `None` means undefined at that index.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct IndicatorFrame {
    pub ma_short: Option<f64>,
    pub ma_long: Option<f64>,
    pub bb_upper: Option<f64>,
    pub bb_lower: Option<f64>,
    pub macd: Option<f64>,
    pub macd_signal: Option<f64>,
    pub rsi: Option<f64>,
    pub stoch: Option<f64>,
}

impl IndicatorFrame {
    pub fn is_complete(&self) -> bool {
        self.ma_short.is_some()
            && self.ma_long.is_some()
            && self.bb_upper.is_some()
            && self.bb_lower.is_some()
            && self.macd.is_some()
            && self.macd_signal.is_some()
            && self.rsi.is_some()
            && self.stoch.is_some()
    }
}

pub fn compute_frames(candles: &[Candle], config: &IndicatorConfig) -> Vec<IndicatorFrame> {
    let ma_short = simple_values(&calculate_sma(candles, config.ma_short_window));
    let ma_long = simple_values(&calculate_sma(candles, config.ma_long_window));
    let bollinger = calculate_bollinger(candles, config.bb_window, config.bb_mult_x100());
    let macd = calculate_macd(
        candles,
        config.macd_fast,
        config.macd_slow,
        config.macd_signal_period,
    );
    let rsi = simple_values(&calculate_rsi(candles, config.rsi_period));
    let stoch = simple_values(&calculate_stochastic(candles, config.stoch_period));

    (0..candles.len())
        .map(|i| {
            let (bb_upper, bb_lower) = match bollinger.values.get(i) {
                Some(p) if p.valid => match p.value {
                    IndicatorValue::Bollinger { upper, lower, .. } => (Some(upper), Some(lower)),
                    _ => (None, None),
                },
                _ => (None, None),
            };

            let (macd_line, macd_signal) = match macd.values.get(i) {
                Some(p) if p.valid => match p.value {
                    IndicatorValue::Macd { line, signal, .. } => (Some(line), Some(signal)),
                    _ => (None, None),
                },
                _ => (None, None),
            };

            IndicatorFrame {
                ma_short: at(&ma_short, i),
                ma_long: at(&ma_long, i),
                bb_upper,
                bb_lower,
                macd: macd_line,
                macd_signal,
                rsi: at(&rsi, i),
                stoch: at(&stoch, i),
            }
        })
        .collect()
}

fn simple_values(series: &IndicatorSeries) -> Vec<Option<f64>> {
    series
        .values
        .iter()
        .map(|p| {
            if !p.valid {
                return None;
            }
            match p.value {
                IndicatorValue::Simple(v) => Some(v),
                _ => None,
            }
        })
        .collect()
}

fn at(values: &[Option<f64>], i: usize) -> Option<f64> {
    values.get(i).copied().flatten()
}
