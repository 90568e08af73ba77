use chrono::{DateTime, FixedOffset};
use chrono_tz::Tz;
use serde::Serialize;

/// Column contract consumed by the trading desk, in order
pub const TRADING_COLUMNS: [&str; 14] = [
    "delivery_start_local",
    "delivery_end_local",
    "market_hour",
    "production_kw",
    "energy_kwh",
    "q10",
    "q25",
    "q50",
    "q75",
    "q90",
    "energy_p10_kwh",
    "energy_p90_kwh",
    "forecast_uncertainty",
    "relative_uncertainty",
];

/// One delivery hour. Field order is the column order of `TRADING_COLUMNS`.
#[derive(Serialize, Debug, Clone, PartialEq)]
pub struct TradingRow {
    pub delivery_start_local: DateTime<FixedOffset>,
    pub delivery_end_local: DateTime<FixedOffset>,
    /// Local hour + 1, in 1..=24
    pub market_hour: u32,
    pub production_kw: f64,
    pub energy_kwh: f64,
    pub q10: f64,
    pub q25: f64,
    pub q50: f64,
    pub q75: f64,
    pub q90: f64,
    pub energy_p10_kwh: f64,
    pub energy_p90_kwh: f64,
    pub forecast_uncertainty: f64,
    pub relative_uncertainty: f64,
}

#[derive(Debug, Clone)]
pub struct TradingSeries {
    pub timezone: Tz,
    pub rows: Vec<TradingRow>,
}

impl TradingSeries {
    pub fn len(&self) -> usize {
        self.rows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }
}
