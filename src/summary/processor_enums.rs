use chrono::{DateTime, Utc};
use std::path::PathBuf;

use crate::forecast::{ForecastSeries, Location};
use crate::summary::types::SummaryReport;

#[derive(Debug, Clone)]
pub struct SummarizeInputArgs {
    pub hourly_series: ForecastSeries,
    pub location: Location,
    pub generated_at: DateTime<Utc>,
}

#[derive(Debug, Clone)]
pub struct ExportSummaryInputArgs {
    pub report: SummaryReport,
    pub path: PathBuf,
}

#[derive(Debug)]
pub enum SummaryProcessorInput {
    Summarize(SummarizeInputArgs),
    ExportJson(ExportSummaryInputArgs),
}

#[derive(Debug)]
pub enum SummaryProcessorOutput {
    Summarize(SummaryReport),
    ExportJson(PathBuf),
}
