//! Market data access port trait.

use crate::domain::candle::Candle;
use crate::domain::error::DipbotError;

pub trait MarketDataPort {
    /// Fetch up to `limit` of the most recent bars for the symbol, ascending
    /// by timestamp.
    fn fetch_candles(
        &self,
        symbol: &str,
        timeframe: &str,
        limit: usize,
    ) -> Result<Vec<Candle>, DipbotError>;
}
