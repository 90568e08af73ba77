pub mod config;
pub mod operations;
pub mod processor;
pub mod processor_enums;
pub mod types;

pub use config::TradingConfig;
pub use operations::{to_trading_view, write_trading_csv};
pub use processor_enums::{TradingProcessorInput, TradingProcessorOutput};
pub use types::{TRADING_COLUMNS, TradingRow, TradingSeries};
