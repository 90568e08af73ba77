use chrono_tz::Tz;
use std::path::PathBuf;

use crate::forecast::ForecastSeries;
use crate::trading::types::TradingSeries;

#[derive(Debug, Clone)]
pub struct BuildTradingViewInputArgs {
    pub hourly_series: ForecastSeries,
    /// Falls back to the application display timezone
    pub display_timezone: Option<Tz>,
}

#[derive(Debug, Clone)]
pub struct ExportTradingViewInputArgs {
    pub view: TradingSeries,
    pub path: PathBuf,
}

#[derive(Debug)]
pub enum TradingProcessorInput {
    BuildView(BuildTradingViewInputArgs),
    ExportView(ExportTradingViewInputArgs),
}

#[derive(Debug)]
pub enum TradingProcessorOutput {
    BuildView(TradingSeries),
    ExportView(PathBuf),
}
