pub mod ingest;
pub mod location;
pub mod resolution;
pub mod types;

// Re-export commonly used types
pub use location::{Location, LocationRegistry};
pub use resolution::Resolution;
pub use types::{
    ForecastSeries, QuantileBand, ResolutionMap, SeriesMetadata, SeriesSchema,
    TimeSeriesPoint,
};
