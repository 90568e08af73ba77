pub mod columns;
pub mod config;
pub mod operations;
pub mod processor;
pub mod processor_enums;

pub use config::{CSV_LOCAL_TIME_OFFSET_HOURS, CsvExportConfig};
pub use operations::{CsvTable, export, export_file_name, series_table};
pub use processor_enums::{CsvExportProcessorInput, CsvExportProcessorOutput};
