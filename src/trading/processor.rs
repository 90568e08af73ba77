use crate::trading::config::TradingConfig;
use crate::trading::operations::{to_trading_view, write_trading_csv};
use crate::trading::processor_enums::{TradingProcessorInput, TradingProcessorOutput};
use crate::utils::app_config::AppConfig;
use crate::utils::traits::ActionProcessor;

impl ActionProcessor<TradingConfig, TradingProcessorOutput> for TradingProcessorInput {
    fn process(
        &self,
        app_config: &mut AppConfig,
        local_config: &mut TradingConfig,
    ) -> anyhow::Result<TradingProcessorOutput> {
        match self {
            TradingProcessorInput::BuildView(args) => {
                let tz = args.display_timezone.unwrap_or(app_config.display_timezone);
                let view = to_trading_view(&args.hourly_series, tz, local_config)?;
                Ok(TradingProcessorOutput::BuildView(view))
            }
            TradingProcessorInput::ExportView(args) => {
                let path = write_trading_csv(&args.view, &args.path)?;
                Ok(TradingProcessorOutput::ExportView(path))
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::forecast::types::test_support::*;
    use crate::trading::processor_enums::BuildTradingViewInputArgs;

    #[test]
    fn test_build_view_defaults_to_app_timezone() {
        let mut app_config = AppConfig {
            display_timezone: chrono_tz::Europe::Bucharest,
            ..Default::default()
        };
        let input = TradingProcessorInput::BuildView(BuildTradingViewInputArgs {
            hourly_series: hourly_series(start_of(2025, 1, 15), &[0.0, 10.0]),
            display_timezone: None,
        });

        match input.process(&mut app_config, &mut TradingConfig::default()).unwrap() {
            TradingProcessorOutput::BuildView(view) => {
                assert_eq!(view.timezone, chrono_tz::Europe::Bucharest);
                // UTC+2 in winter
                assert_eq!(view.rows[0].market_hour, 3);
            }
            other => panic!("unexpected output {:?}", other),
        }
    }
}
