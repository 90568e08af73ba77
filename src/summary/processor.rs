use crate::summary::config::SummaryConfig;
use crate::summary::operations::{export_json_summary, summarize};
use crate::summary::processor_enums::{SummaryProcessorInput, SummaryProcessorOutput};
use crate::utils::app_config::AppConfig;
use crate::utils::traits::ActionProcessor;

impl ActionProcessor<SummaryConfig, SummaryProcessorOutput> for SummaryProcessorInput {
    fn process(
        &self,
        _app_config: &mut AppConfig,
        local_config: &mut SummaryConfig,
    ) -> anyhow::Result<SummaryProcessorOutput> {
        match self {
            SummaryProcessorInput::Summarize(args) => {
                let report = summarize(&args.hourly_series, &args.location, args.generated_at, local_config);
                Ok(SummaryProcessorOutput::Summarize(report))
            }
            SummaryProcessorInput::ExportJson(args) => {
                let path = export_json_summary(&args.report, &args.path)?;
                Ok(SummaryProcessorOutput::ExportJson(path))
            }
        }
    }
}
