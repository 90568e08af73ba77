pub mod config;
pub mod operations;
pub mod processor;
pub mod processor_enums;
pub mod types;

pub use config::ApiFormatConfig;
pub use operations::{to_api_payload, write_payload_json};
pub use processor_enums::{ApiFormatProcessorInput, ApiFormatProcessorOutput};
pub use types::{ApiPoint, Payload, PayloadMetadata, ResolutionPayload, UncertaintyBands};
