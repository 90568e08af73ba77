use crate::forecast::{ForecastSeries, Resolution, ResolutionMap};

#[derive(Debug, Clone)]
pub struct AggregateInputArgs {
    pub series: ForecastSeries,
    /// Resolution identifiers to build. Empty means the configured aggregation levels.
    pub resolutions: Vec<String>,
}

#[derive(Debug, Clone)]
pub struct AggregateToResolutionInputArgs {
    pub series: ForecastSeries,
    pub resolution: Resolution,
}

#[derive(Debug)]
pub enum AggregatorsProcessorInput {
    /// Build a resolution map from a base series
    Aggregate(AggregateInputArgs),
    /// Aggregate to a single resolution
    AggregateToResolution(AggregateToResolutionInputArgs),
}

#[derive(Debug)]
pub enum AggregatorsProcessorOutput {
    Aggregate(ResolutionMap),
    AggregateToResolution(ForecastSeries),
}
