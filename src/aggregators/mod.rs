pub mod aggregation_block;
pub mod config;
pub mod operations;
pub mod processor;
pub mod processor_enums;

// Re-export commonly used types
pub use aggregation_block::{AggregationBlock, bucket_start};
pub use config::{AggregatorsConfig, PartialBucketPolicy};
pub use operations::{aggregate, aggregate_to_resolution};
pub use processor_enums::{AggregateInputArgs, AggregatorsProcessorInput, AggregatorsProcessorOutput};
