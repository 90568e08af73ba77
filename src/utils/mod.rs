pub mod app_config;
pub mod commons;
pub mod errors;
pub mod traits;
