pub mod binance_adapter;
pub mod csv_ledger_adapter;
pub mod file_config_adapter;
pub mod signal_log_adapter;
pub mod synthetic_adapter;
pub mod telegram_adapter;
