use crate::aggregators::config::AggregatorsConfig;
use crate::aggregators::processor_enums::{AggregatorsProcessorInput, AggregatorsProcessorOutput};
use crate::api_format::config::ApiFormatConfig;
use crate::api_format::processor_enums::{ApiFormatProcessorInput, ApiFormatProcessorOutput};
use crate::csv_export::config::CsvExportConfig;
use crate::csv_export::processor_enums::{CsvExportProcessorInput, CsvExportProcessorOutput};
use crate::summary::config::SummaryConfig;
use crate::summary::processor_enums::{SummaryProcessorInput, SummaryProcessorOutput};
use crate::trading::config::TradingConfig;
use crate::trading::processor_enums::{TradingProcessorInput, TradingProcessorOutput};
use crate::utils::app_config::AppConfig;
use crate::utils::traits::ActionProcessor;
use anyhow::Result;

#[derive(Debug)]
pub enum ActionRouterInput {
    Aggregators(AggregatorsProcessorInput),
    Trading(TradingProcessorInput),
    ApiFormat(ApiFormatProcessorInput),
    CsvExport(CsvExportProcessorInput),
    Summary(SummaryProcessorInput),
}

#[derive(Debug)]
pub enum ActionRouterOutput {
    Aggregators(AggregatorsProcessorOutput),
    Trading(TradingProcessorOutput),
    ApiFormat(ApiFormatProcessorOutput),
    CsvExport(CsvExportProcessorOutput),
    Summary(SummaryProcessorOutput),
}

impl ActionRouterInput {
    pub fn process(&self, app_config: AppConfig) -> Result<ActionRouterOutput> {
        match self {
            ActionRouterInput::Aggregators(processor) => {
                let mut config = AggregatorsConfig {
                    partial_buckets: app_config.partial_buckets,
                    ..Default::default()
                };

                let res = processor.process(&mut app_config.clone(), &mut config)?;

                Ok(ActionRouterOutput::Aggregators(res))
            }
            ActionRouterInput::Trading(processor) => {
                let mut config = TradingConfig::default();

                let res = processor.process(&mut app_config.clone(), &mut config)?;

                Ok(ActionRouterOutput::Trading(res))
            }
            ActionRouterInput::ApiFormat(processor) => {
                let mut config = ApiFormatConfig {
                    horizon_days: app_config.horizon_days,
                    display_timezone: app_config.display_timezone.name().to_string(),
                    display_timezone_name: app_config.display_timezone_name.clone(),
                    timezone_notice: app_config.timezone_notice.clone(),
                    ..Default::default()
                };

                let res = processor.process(&mut app_config.clone(), &mut config)?;

                Ok(ActionRouterOutput::ApiFormat(res))
            }
            ActionRouterInput::CsvExport(processor) => {
                let mut config = CsvExportConfig::default();

                let res = processor.process(&mut app_config.clone(), &mut config)?;

                Ok(ActionRouterOutput::CsvExport(res))
            }
            ActionRouterInput::Summary(processor) => {
                let mut config = SummaryConfig::default();

                let res = processor.process(&mut app_config.clone(), &mut config)?;

                Ok(ActionRouterOutput::Summary(res))
            }
        }
    }
}
