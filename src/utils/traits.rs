use anyhow::Result;
use crate::utils::app_config::AppConfig;

pub trait ActionProcessor<Config, Output> {
    fn process(&self, app_config: &mut AppConfig, local_config: &mut Config) -> Result<Output>;
}
