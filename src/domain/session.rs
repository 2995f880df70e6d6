//! Batch strategy pass.
//!
//! Walks the candle series in ascending index order, feeding each frame to
//! the evaluator and its decision to the position state machine. Intents
//! come out in the order they were decided; an open position at the end of
//! the series is left open.

use rand::Rng;

use crate::domain::candle::Candle;
use crate::domain::pipeline::IndicatorFrame;
use crate::domain::position::{PositionState, StrategyParams, TradeIntent};
use crate::domain::signal;

#[derive(Debug)]
pub struct SessionResult {
    pub intents: Vec<TradeIntent>,
    pub final_state: PositionState,
}

pub fn run_strategy<R: Rng>(
    candles: &[Candle],
    frames: &[IndicatorFrame],
    params: &StrategyParams,
    rng: &mut R,
) -> SessionResult {
    let mut state = PositionState::Flat;
    let mut intents = Vec::new();

    for (candle, frame) in candles.iter().zip(frames.iter()) {
        let decision = signal::evaluate(candle, frame, &state, params, rng);
        if let Some(intent) = state.apply(decision, candle, params) {
            intents.push(intent);
        }
    }

    SessionResult {
        intents,
        final_state: state,
    }
}
