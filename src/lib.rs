// Public library interface for intraday-forecast
pub mod action_router;
pub mod aggregators;
pub mod api_format;
pub mod cli_helper;
pub mod cli_utils;
pub mod csv_export;
pub mod forecast;
pub mod summary;
pub mod trading;
pub mod utils;
