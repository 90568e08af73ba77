use crate::csv_export::config::CsvExportConfig;
use crate::csv_export::operations::export;
use crate::csv_export::processor_enums::{CsvExportProcessorInput, CsvExportProcessorOutput};
use crate::utils::app_config::AppConfig;
use crate::utils::traits::ActionProcessor;

impl ActionProcessor<CsvExportConfig, CsvExportProcessorOutput> for CsvExportProcessorInput {
    fn process(
        &self,
        app_config: &mut AppConfig,
        local_config: &mut CsvExportConfig,
    ) -> anyhow::Result<CsvExportProcessorOutput> {
        match self {
            CsvExportProcessorInput::Export(args) => {
                let output_dir = args.output_dir.as_ref().unwrap_or(&app_config.output_dir);
                let files = export(&args.map, &args.location, output_dir, args.generated_at, local_config)?;
                Ok(CsvExportProcessorOutput::Export(files))
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::csv_export::processor_enums::ExportCsvInputArgs;
    use crate::forecast::types::test_support::*;
    use crate::forecast::{Location, Resolution, ResolutionMap};

    #[test]
    fn test_export_defaults_to_app_output_dir() {
        let dir = tempfile::tempdir().unwrap();
        let mut app_config = AppConfig {
            output_dir: dir.path().join("out"),
            ..Default::default()
        };
        let map: ResolutionMap = [(Resolution::FifteenMinutes, base_series(start_of(2025, 7, 3), 4, false))]
            .into_iter()
            .collect();
        let input = CsvExportProcessorInput::Export(ExportCsvInputArgs {
            map,
            location: Location::new("lab", "UTC", None),
            output_dir: None,
            generated_at: start_of(2025, 7, 3),
        });

        match input.process(&mut app_config, &mut CsvExportConfig::default()).unwrap() {
            CsvExportProcessorOutput::Export(files) => {
                assert_eq!(files.len(), 1);
                assert!(files[0].starts_with(dir.path().join("out")));
            }
        }
    }
}
