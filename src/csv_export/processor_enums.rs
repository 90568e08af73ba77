use chrono::{DateTime, Utc};
use std::path::PathBuf;

use crate::forecast::{Location, ResolutionMap};

#[derive(Debug, Clone)]
pub struct ExportCsvInputArgs {
    pub map: ResolutionMap,
    pub location: Location,
    /// Falls back to the application output directory
    pub output_dir: Option<PathBuf>,
    pub generated_at: DateTime<Utc>,
}

#[derive(Debug)]
pub enum CsvExportProcessorInput {
    Export(ExportCsvInputArgs),
}

#[derive(Debug)]
pub enum CsvExportProcessorOutput {
    Export(Vec<PathBuf>),
}
