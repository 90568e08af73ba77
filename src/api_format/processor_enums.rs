use chrono::{DateTime, Utc};
use std::path::PathBuf;

use crate::api_format::types::Payload;
use crate::forecast::ResolutionMap;

#[derive(Debug, Clone)]
pub struct BuildPayloadInputArgs {
    pub map: ResolutionMap,
    pub location_key: String,
    pub generated_at: DateTime<Utc>,
}

#[derive(Debug, Clone)]
pub struct WritePayloadInputArgs {
    pub payload: Payload,
    pub path: PathBuf,
}

#[derive(Debug)]
pub enum ApiFormatProcessorInput {
    BuildPayload(BuildPayloadInputArgs),
    WritePayload(WritePayloadInputArgs),
}

#[derive(Debug)]
pub enum ApiFormatProcessorOutput {
    BuildPayload(Payload),
    WritePayload(PathBuf),
}
