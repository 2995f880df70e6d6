//! Synthetic market data adapter.
//!
//! Fallback data source when live acquisition fails: a random walk around a
//! base price drawn from [0.05, 0.15], with OHLC derived from the walk level
//! by fixed multipliers. The series ends at the current wall-clock time and
//! steps back by the requested timeframe.

use crate::domain::candle::{timeframe_duration, Candle};
use crate::domain::error::DipbotError;
use crate::ports::data_port::MarketDataPort;
use chrono::Utc;
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

pub struct SyntheticDataAdapter {
    seed: Option<u64>,
}

impl SyntheticDataAdapter {
    pub fn new() -> Self {
        Self { seed: None }
    }

    pub fn with_seed(seed: u64) -> Self {
        Self { seed: Some(seed) }
    }
}

impl Default for SyntheticDataAdapter {
    fn default() -> Self {
        Self::new()
    }
}

impl MarketDataPort for SyntheticDataAdapter {
    fn fetch_candles(
        &self,
        _symbol: &str,
        timeframe: &str,
        limit: usize,
    ) -> Result<Vec<Candle>, DipbotError> {
        let step = timeframe_duration(timeframe).ok_or_else(|| DipbotError::Timeframe {
            value: timeframe.to_string(),
        })?;

        let mut rng = match self.seed {
            Some(seed) => StdRng::seed_from_u64(seed),
            None => StdRng::from_entropy(),
        };

        let base_price: f64 = rng.gen_range(0.05..0.15);
        let end = Utc::now();
        let mut candles = Vec::with_capacity(limit);
        let mut drift = 0.0;

        for i in 0..limit {
            drift += rng.gen_range(-0.002..0.002);
            // keep the walk strictly positive even on long bearish runs
            let level = (base_price * (1.0 + drift)).max(base_price * 0.05);

            let offset = (limit - 1 - i) as i32;
            candles.push(Candle {
                timestamp: end - step * offset,
                open: level * 0.998,
                high: level * 1.002,
                low: level * 0.995,
                close: level,
                volume: rng.gen_range(1_000_000.0..5_000_000.0),
            });
        }

        Ok(candles)
    }
}
