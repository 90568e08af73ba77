use crate::aggregators::config::AggregatorsConfig;
use crate::aggregators::operations::{aggregate, aggregate_to_resolution};
use crate::aggregators::processor_enums::{AggregatorsProcessorInput, AggregatorsProcessorOutput};
use crate::utils::app_config::AppConfig;
use crate::utils::traits::ActionProcessor;

impl ActionProcessor<AggregatorsConfig, AggregatorsProcessorOutput> for AggregatorsProcessorInput {
    fn process(
        &self,
        app_config: &mut AppConfig,
        local_config: &mut AggregatorsConfig,
    ) -> anyhow::Result<AggregatorsProcessorOutput> {
        match self {
            AggregatorsProcessorInput::Aggregate(args) => {
                let resolutions = if args.resolutions.is_empty() {
                    &app_config.aggregation_levels
                } else {
                    &args.resolutions
                };

                let map = aggregate(&args.series, resolutions, local_config)?;
                Ok(AggregatorsProcessorOutput::Aggregate(map))
            }
            AggregatorsProcessorInput::AggregateToResolution(args) => {
                let series = aggregate_to_resolution(&args.series, args.resolution, local_config)?;
                Ok(AggregatorsProcessorOutput::AggregateToResolution(series))
            }
        }
    }
}
