//! Column layouts of the exported CSV files.
//!
//! Hourly files carry calendar columns for the spreadsheet template and always include
//! `energy_kwh`. Every other resolution keeps the plain time series layout, where the energy
//! groups only appear when the source has them.

pub const QUANTILE_COLUMNS: [&str; 5] = ["q10", "q25", "q50", "q75", "q90"];

pub const ENERGY_QUANTILE_COLUMNS: [&str; 5] = [
    "energy_q10_kwh",
    "energy_q25_kwh",
    "energy_q50_kwh",
    "energy_q75_kwh",
    "energy_q90_kwh",
];

pub fn hourly_header(with_day_end: bool) -> Vec<&'static str> {
    let mut header = vec!["timestamp", "YEAR", "MONTH", "DAY", "HOUR_START", "HOUR_END"];
    if with_day_end {
        header.push("DAY_END");
    }
    header.extend(["interval", "power_kw", "energy_kwh"]);
    header.extend(QUANTILE_COLUMNS);
    header
}

pub fn interval_header(
    with_energy: bool,
    with_energy_quantiles: bool,
    with_forecast_timestamp: bool,
    with_resolution_minutes: bool,
) -> Vec<&'static str> {
    let mut header = vec!["timestamp", "production_kw"];
    header.extend(QUANTILE_COLUMNS);
    if with_energy {
        header.push("energy_kwh");
    }
    if with_energy_quantiles {
        header.extend(ENERGY_QUANTILE_COLUMNS);
    }
    if with_forecast_timestamp {
        header.push("forecast_timestamp");
    }
    if with_resolution_minutes {
        header.push("resolution_minutes");
    }
    header
}
