use crate::api_format::config::ApiFormatConfig;
use crate::api_format::operations::{to_api_payload, write_payload_json};
use crate::api_format::processor_enums::{ApiFormatProcessorInput, ApiFormatProcessorOutput};
use crate::utils::app_config::AppConfig;
use crate::utils::traits::ActionProcessor;

impl ActionProcessor<ApiFormatConfig, ApiFormatProcessorOutput> for ApiFormatProcessorInput {
    fn process(
        &self,
        _app_config: &mut AppConfig,
        local_config: &mut ApiFormatConfig,
    ) -> anyhow::Result<ApiFormatProcessorOutput> {
        match self {
            ApiFormatProcessorInput::BuildPayload(args) => {
                let payload = to_api_payload(&args.map, &args.location_key, args.generated_at, local_config);
                Ok(ApiFormatProcessorOutput::BuildPayload(payload))
            }
            ApiFormatProcessorInput::WritePayload(args) => {
                let path = write_payload_json(&args.payload, &args.path)?;
                Ok(ApiFormatProcessorOutput::WritePayload(path))
            }
        }
    }
}
