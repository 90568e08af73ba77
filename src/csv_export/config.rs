/// Shift applied after converting to the location's local time. Moves an EET plant clock onto
/// the CET clock the market files are read against.
pub const CSV_LOCAL_TIME_OFFSET_HOURS: i64 = -1;

pub const CSV_TIMESTAMP_FORMAT: &str = "%Y-%m-%d %H:%M:%S";

/// Configuration for the per-resolution CSV files
#[derive(Clone, Debug)]
pub struct CsvExportConfig {
    pub local_time_offset_hours: i64,
    pub kwh_per_mwh: f64,
    pub decimals: u32,
}

impl Default for CsvExportConfig {
    fn default() -> Self {
        Self {
            local_time_offset_hours: CSV_LOCAL_TIME_OFFSET_HOURS,
            kwh_per_mwh: 1000.0,
            decimals: 6,
        }
    }
}
