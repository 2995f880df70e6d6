//! Configuration validation.
//!
//! All checks run at construction time, before any data is fetched or any
//! bar is evaluated.

use crate::domain::candle::timeframe_duration;
use crate::domain::error::DipbotError;
use crate::ports::config_port::ConfigPort;

pub fn validate_trading_config(config: &dyn ConfigPort) -> Result<(), DipbotError> {
    validate_symbol(config)?;
    validate_timeframe(config)?;
    validate_limit(config)?;
    validate_notional(config)?;
    validate_stop_loss(config)?;
    validate_take_profit(config)?;
    Ok(())
}

pub fn validate_indicator_config(config: &dyn ConfigPort) -> Result<(), DipbotError> {
    for key in [
        "ma_short_window",
        "ma_long_window",
        "bb_window",
        "macd_fast",
        "macd_slow",
        "macd_signal_period",
        "rsi_period",
        "stoch_period",
    ] {
        validate_window(config, key)?;
    }
    validate_macd_ordering(config)?;
    validate_bb_mult(config)?;
    Ok(())
}

fn validate_symbol(config: &dyn ConfigPort) -> Result<(), DipbotError> {
    if let Some(symbol) = config.get_string("trading", "symbol") {
        if symbol.trim().is_empty() {
            return Err(DipbotError::ConfigInvalid {
                section: "trading".to_string(),
                key: "symbol".to_string(),
                reason: "symbol must not be empty".to_string(),
            });
        }
    }
    Ok(())
}

fn validate_timeframe(config: &dyn ConfigPort) -> Result<(), DipbotError> {
    let timeframe = config
        .get_string("trading", "timeframe")
        .unwrap_or_else(|| "5m".to_string());
    if timeframe_duration(&timeframe).is_none() {
        return Err(DipbotError::ConfigInvalid {
            section: "trading".to_string(),
            key: "timeframe".to_string(),
            reason: format!("unrecognized timeframe {:?}", timeframe),
        });
    }
    Ok(())
}

fn validate_limit(config: &dyn ConfigPort) -> Result<(), DipbotError> {
    let limit = config.get_int("trading", "limit", 500);
    if limit <= 0 {
        return Err(DipbotError::ConfigInvalid {
            section: "trading".to_string(),
            key: "limit".to_string(),
            reason: "limit must be positive".to_string(),
        });
    }
    Ok(())
}

fn validate_notional(config: &dyn ConfigPort) -> Result<(), DipbotError> {
    let notional = config.get_double("trading", "trade_notional", 1.0);
    if notional <= 0.0 {
        return Err(DipbotError::ConfigInvalid {
            section: "trading".to_string(),
            key: "trade_notional".to_string(),
            reason: "trade_notional must be positive".to_string(),
        });
    }
    Ok(())
}

fn validate_stop_loss(config: &dyn ConfigPort) -> Result<(), DipbotError> {
    let stop_loss = config.get_double("trading", "stop_loss_pct", 0.10);
    if stop_loss <= 0.0 || stop_loss >= 1.0 {
        return Err(DipbotError::ConfigInvalid {
            section: "trading".to_string(),
            key: "stop_loss_pct".to_string(),
            reason: "stop_loss_pct must be between 0 and 1 exclusive".to_string(),
        });
    }
    Ok(())
}

fn validate_take_profit(config: &dyn ConfigPort) -> Result<(), DipbotError> {
    let min = config.get_double("trading", "take_profit_min_pct", 0.50);
    let max = config.get_double("trading", "take_profit_max_pct", 1.00);

    if min <= 0.0 {
        return Err(DipbotError::ConfigInvalid {
            section: "trading".to_string(),
            key: "take_profit_min_pct".to_string(),
            reason: "take_profit_min_pct must be positive".to_string(),
        });
    }
    if max < min {
        return Err(DipbotError::ConfigInvalid {
            section: "trading".to_string(),
            key: "take_profit_max_pct".to_string(),
            reason: "take_profit_max_pct must not be below take_profit_min_pct".to_string(),
        });
    }
    Ok(())
}

fn validate_window(config: &dyn ConfigPort, key: &str) -> Result<(), DipbotError> {
    let value = config.get_int("indicators", key, 1);
    if value <= 0 {
        return Err(DipbotError::ConfigInvalid {
            section: "indicators".to_string(),
            key: key.to_string(),
            reason: format!("{} must be positive", key),
        });
    }
    Ok(())
}

fn validate_macd_ordering(config: &dyn ConfigPort) -> Result<(), DipbotError> {
    let fast = config.get_int("indicators", "macd_fast", 12);
    let slow = config.get_int("indicators", "macd_slow", 26);
    if fast >= slow {
        return Err(DipbotError::ConfigInvalid {
            section: "indicators".to_string(),
            key: "macd_fast".to_string(),
            reason: "macd_fast must be below macd_slow".to_string(),
        });
    }
    Ok(())
}

fn validate_bb_mult(config: &dyn ConfigPort) -> Result<(), DipbotError> {
    let mult = config.get_double("indicators", "bb_mult", 2.0);
    if mult <= 0.0 {
        return Err(DipbotError::ConfigInvalid {
            section: "indicators".to_string(),
            key: "bb_mult".to_string(),
            reason: "bb_mult must be positive".to_string(),
        });
    }
    Ok(())
}
