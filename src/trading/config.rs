/// Constants for the trading desk view
#[derive(Clone, Debug)]
pub struct TradingConfig {
    /// Added to production before dividing so zero-production hours stay finite
    pub relative_uncertainty_epsilon_kw: f64,
    pub kwh_per_mwh: f64,
}

impl Default for TradingConfig {
    fn default() -> Self {
        Self {
            relative_uncertainty_epsilon_kw: 0.001,
            kwh_per_mwh: 1000.0,
        }
    }
}
