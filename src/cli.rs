//! CLI definition and dispatch.

use clap::{Parser, Subcommand};
use rand::rngs::StdRng;
use rand::SeedableRng;
use std::fs;
use std::path::PathBuf;
use std::process::ExitCode;

use crate::adapters::binance_adapter::BinanceDataAdapter;
use crate::adapters::csv_ledger_adapter::CsvLedgerAdapter;
use crate::adapters::file_config_adapter::FileConfigAdapter;
use crate::adapters::signal_log_adapter::SignalLogAdapter;
use crate::adapters::synthetic_adapter::SyntheticDataAdapter;
use crate::adapters::telegram_adapter::TelegramAdapter;
use crate::domain::candle::is_ordered_series;
use crate::domain::config_validation::{validate_indicator_config, validate_trading_config};
use crate::domain::emitter::{IntentEmitter, RunMode};
use crate::domain::error::DipbotError;
use crate::domain::indicator::IndicatorType;
use crate::domain::pipeline::{compute_frames, IndicatorConfig};
use crate::domain::position::StrategyParams;
use crate::domain::session::run_strategy;
use crate::ports::config_port::ConfigPort;
use crate::ports::data_port::MarketDataPort;
use crate::ports::log_port::SignalLogPort;

#[derive(Parser, Debug)]
#[command(name = "dipbot", about = "Single-position mean-reversion trading bot")]
pub struct Cli {
    #[command(subcommand)]
    pub command: Command,
}

#[derive(Subcommand, Debug)]
pub enum Command {
    /// Run one evaluation session over the latest candles
    Run {
        #[arg(short, long)]
        config: PathBuf,
        /// Skip the live data source and generate a synthetic series
        #[arg(long)]
        synthetic: bool,
        /// Validate configuration and show derived settings without fetching
        #[arg(long)]
        dry_run: bool,
    },
    /// Validate a configuration file
    Validate {
        #[arg(short, long)]
        config: PathBuf,
    },
}

pub fn run(cli: Cli) -> ExitCode {
    match cli.command {
        Command::Run {
            config,
            synthetic,
            dry_run,
        } => run_session(&config, synthetic, dry_run),
        Command::Validate { config } => run_validate(&config),
    }
}

pub fn load_config(path: &PathBuf) -> Result<FileConfigAdapter, ExitCode> {
    FileConfigAdapter::from_file(path).map_err(|e| {
        let err = DipbotError::ConfigParse {
            file: path.display().to_string(),
            reason: e.to_string(),
        };
        eprintln!("error: {err}");
        ExitCode::from(&err)
    })
}

pub fn build_indicator_config(config: &dyn ConfigPort) -> IndicatorConfig {
    IndicatorConfig {
        ma_short_window: config.get_int("indicators", "ma_short_window", 20) as usize,
        ma_long_window: config.get_int("indicators", "ma_long_window", 200) as usize,
        bb_window: config.get_int("indicators", "bb_window", 20) as usize,
        bb_mult: config.get_double("indicators", "bb_mult", 2.0),
        macd_fast: config.get_int("indicators", "macd_fast", 12) as usize,
        macd_slow: config.get_int("indicators", "macd_slow", 26) as usize,
        macd_signal_period: config.get_int("indicators", "macd_signal_period", 9) as usize,
        rsi_period: config.get_int("indicators", "rsi_period", 14) as usize,
        stoch_period: config.get_int("indicators", "stoch_period", 14) as usize,
    }
}

pub fn build_strategy_params(config: &dyn ConfigPort) -> StrategyParams {
    StrategyParams {
        trade_notional: config.get_double("trading", "trade_notional", 1.0),
        stop_loss_pct: config.get_double("trading", "stop_loss_pct", 0.10),
        take_profit_min_pct: config.get_double("trading", "take_profit_min_pct", 0.50),
        take_profit_max_pct: config.get_double("trading", "take_profit_max_pct", 1.00),
    }
}

/// Live mode requires both venue credentials; anything less is a demo.
pub fn derive_run_mode(config: &dyn ConfigPort) -> RunMode {
    let api_key = config
        .get_string("binance", "api_key")
        .filter(|s| !s.trim().is_empty());
    let api_secret = config
        .get_string("binance", "api_secret")
        .filter(|s| !s.trim().is_empty());

    match (api_key, api_secret) {
        (Some(_), Some(_)) => RunMode::Live,
        _ => RunMode::Demo,
    }
}

fn log_or_warn(log: &dyn SignalLogPort, message: &str) {
    if let Err(e) = log.log_line(message) {
        eprintln!("warning: {e}");
    }
}

fn run_session(config_path: &PathBuf, synthetic: bool, dry_run: bool) -> ExitCode {
    // Stage 1: load and validate config
    eprintln!("Loading config from {}", config_path.display());
    let adapter = match load_config(config_path) {
        Ok(a) => a,
        Err(code) => return code,
    };

    if let Err(e) = validate_trading_config(&adapter) {
        eprintln!("error: {e}");
        return (&e).into();
    }
    if let Err(e) = validate_indicator_config(&adapter) {
        eprintln!("error: {e}");
        return (&e).into();
    }

    // Stage 2: derive run mode and effective settings
    let mode = derive_run_mode(&adapter);
    if mode == RunMode::Demo {
        eprintln!("Running in DEMO mode - no real trades will be executed");
    }

    let symbol = adapter
        .get_string("trading", "symbol")
        .unwrap_or_else(|| "DOGE/USDT".to_string());
    let timeframe = adapter
        .get_string("trading", "timeframe")
        .unwrap_or_else(|| "5m".to_string());
    let limit = adapter.get_int("trading", "limit", 500) as usize;
    let log_dir = PathBuf::from(
        adapter
            .get_string("logging", "dir")
            .unwrap_or_else(|| "trading_logs".to_string()),
    );

    let indicator_config = build_indicator_config(&adapter);
    let params = build_strategy_params(&adapter);

    if dry_run {
        eprintln!("\nConfiguration is valid");
        eprintln!("  mode:      {}", mode);
        eprintln!("  symbol:    {} ({} x {})", symbol, limit, timeframe);
        eprintln!("  warm-up:   {} bars", indicator_config.warmup_index());
        eprintln!("  notional:  {}", params.trade_notional);
        eprintln!("  stop-loss: {}%", params.stop_loss_pct * 100.0);
        eprintln!(
            "  take-profit: {}%..{}%",
            params.take_profit_min_pct * 100.0,
            params.take_profit_max_pct * 100.0
        );
        return ExitCode::SUCCESS;
    }

    // Stage 3: sinks
    if let Err(e) = fs::create_dir_all(&log_dir) {
        eprintln!("error: failed to create {}: {}", log_dir.display(), e);
        return ExitCode::from(1);
    }
    let signal_log = match SignalLogAdapter::new(log_dir.join("signals.log")) {
        Ok(l) => l,
        Err(e) => {
            eprintln!("error: {e}");
            return (&e).into();
        }
    };
    let ledger = CsvLedgerAdapter::new(log_dir.join("trades.csv"));
    let notifier = TelegramAdapter::from_config(&adapter);
    if !notifier.is_configured() {
        eprintln!("Telegram notifications disabled (no credentials)");
    }

    log_or_warn(&signal_log, &format!("Starting {} trading session", mode));

    // Stage 4: fetch candles, falling back to synthetic data
    let candles = match fetch_candles(&signal_log, synthetic, &symbol, &timeframe, limit) {
        Ok(c) => c,
        Err(e) => {
            eprintln!("error: {e}");
            log_or_warn(&signal_log, "Trading session ended");
            return (&e).into();
        }
    };

    if !is_ordered_series(&candles) {
        eprintln!("warning: candle series is not strictly ordered by timestamp");
    }

    // Stage 5: indicators and strategy pass
    let frames = compute_frames(&candles, &indicator_config);
    eprintln!(
        "Evaluating {} bars of {} ({} warm-up)",
        candles.len(),
        symbol,
        indicator_config.warmup_index()
    );

    let mut rng = StdRng::from_entropy();
    let result = run_strategy(&candles, &frames, &params, &mut rng);

    // Stage 6: emit intents in decision order
    let emitter = IntentEmitter {
        log: &signal_log,
        notify: &notifier,
        ledger: &ledger,
        mode,
        symbol: &symbol,
    };

    for intent in &result.intents {
        println!("{}", emitter.message(intent));
        let report = emitter.emit(intent);
        for failure in &report.failures {
            eprintln!("warning: {} sink failed: {}", failure.sink, failure.error);
        }
    }

    log_or_warn(&signal_log, "Trading session ended");

    eprintln!(
        "\nSession complete: {} intents, position {}",
        result.intents.len(),
        if result.final_state.is_long() {
            "open"
        } else {
            "flat"
        }
    );
    ExitCode::SUCCESS
}

fn fetch_candles(
    signal_log: &dyn SignalLogPort,
    synthetic: bool,
    symbol: &str,
    timeframe: &str,
    limit: usize,
) -> Result<Vec<crate::domain::candle::Candle>, DipbotError> {
    if synthetic {
        log_or_warn(signal_log, "Using generated sample data");
        return SyntheticDataAdapter::new().fetch_candles(symbol, timeframe, limit);
    }

    match BinanceDataAdapter::new().fetch_candles(symbol, timeframe, limit) {
        Ok(candles) if !candles.is_empty() => Ok(candles),
        Ok(_) => {
            eprintln!("warning: live source returned no data, generating sample data");
            log_or_warn(signal_log, "Data fetch error: empty candle series");
            log_or_warn(signal_log, "Using generated sample data");
            SyntheticDataAdapter::new().fetch_candles(symbol, timeframe, limit)
        }
        Err(e) => {
            eprintln!("warning: {e}, generating sample data");
            log_or_warn(signal_log, &format!("Data fetch error: {e}"));
            log_or_warn(signal_log, "Using generated sample data");
            SyntheticDataAdapter::new().fetch_candles(symbol, timeframe, limit)
        }
    }
}

fn run_validate(config_path: &PathBuf) -> ExitCode {
    eprintln!("Validating config: {}", config_path.display());
    let adapter = match load_config(config_path) {
        Ok(a) => a,
        Err(code) => return code,
    };

    if let Err(e) = validate_trading_config(&adapter) {
        eprintln!("error: {e}");
        return (&e).into();
    }
    if let Err(e) = validate_indicator_config(&adapter) {
        eprintln!("error: {e}");
        return (&e).into();
    }

    let mode = derive_run_mode(&adapter);
    let indicator_config = build_indicator_config(&adapter);
    let params = build_strategy_params(&adapter);

    eprintln!("\nConfiguration is valid.");
    eprintln!("  mode:        {}", mode);
    eprintln!("  warm-up:     {} bars", indicator_config.warmup_index());
    eprintln!("  notional:    {}", params.trade_notional);
    eprintln!("  stop-loss:   {}%", params.stop_loss_pct * 100.0);
    eprintln!(
        "  take-profit: {}%..{}%",
        params.take_profit_min_pct * 100.0,
        params.take_profit_max_pct * 100.0
    );

    eprintln!("\nIndicators to compute:");
    let indicators = [
        IndicatorType::Sma(indicator_config.ma_short_window),
        IndicatorType::Sma(indicator_config.ma_long_window),
        IndicatorType::Bollinger {
            period: indicator_config.bb_window,
            stddev_mult_x100: indicator_config.bb_mult_x100(),
        },
        IndicatorType::Macd {
            fast: indicator_config.macd_fast,
            slow: indicator_config.macd_slow,
            signal: indicator_config.macd_signal_period,
        },
        IndicatorType::Rsi(indicator_config.rsi_period),
        IndicatorType::StochasticK(indicator_config.stoch_period),
    ];
    for indicator in &indicators {
        eprintln!("  {}", indicator);
    }
    ExitCode::SUCCESS
}
