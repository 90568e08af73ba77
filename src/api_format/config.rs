use crate::utils::app_config::{
    DEFAULT_DISPLAY_TIMEZONE, DEFAULT_DISPLAY_TIMEZONE_NAME, DEFAULT_HORIZON_DAYS, DEFAULT_TIMEZONE_NOTICE,
};

/// Configuration for the API payload
#[derive(Clone, Debug)]
pub struct ApiFormatConfig {
    /// Decimals for power and power quantiles
    pub power_decimals: u32,
    /// Decimals for energy and energy quantiles
    pub energy_decimals: u32,
    pub kwh_per_mwh: f64,
    pub horizon_days: u32,
    pub display_timezone: String,
    pub display_timezone_name: String,
    pub timezone_notice: String,
}

impl Default for ApiFormatConfig {
    fn default() -> Self {
        Self {
            power_decimals: 4,
            energy_decimals: 3,
            kwh_per_mwh: 1000.0,
            horizon_days: DEFAULT_HORIZON_DAYS,
            display_timezone: DEFAULT_DISPLAY_TIMEZONE.to_string(),
            display_timezone_name: DEFAULT_DISPLAY_TIMEZONE_NAME.to_string(),
            timezone_notice: DEFAULT_TIMEZONE_NOTICE.to_string(),
        }
    }
}
