pub mod config;
pub mod operations;
pub mod processor;
pub mod processor_enums;
pub mod types;

pub use config::SummaryConfig;
pub use operations::{export_json_summary, quality_label, summarize};
pub use processor_enums::{SummaryProcessorInput, SummaryProcessorOutput};
pub use types::{ForecastQuality, SummaryReport};
