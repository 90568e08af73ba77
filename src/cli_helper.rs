use anyhow::Result;
use dialoguer::Select;

use crate::action_router::{ActionRouterInput, ActionRouterOutput};
use crate::cli_utils::{CliError, print_warning};
use crate::forecast::{ForecastSeries, Location};
use crate::utils::app_config::AppConfig;

/// Initialize AppConfig for CLI operations
pub fn initialize_app_config() -> Result<AppConfig> {
    AppConfig::from_env()
}

/// Execute an action through the ActionRouter
pub fn call_action_router(input: ActionRouterInput, app_config: AppConfig) -> Result<ActionRouterOutput> {
    input.process(app_config)
}

/// Pick the location to export for.
///
/// An explicit key must exist in the registry. Without one the user chooses from the registry,
/// and with an empty registry the location named in the forecast file is used in the display
/// timezone with unknown capacity.
pub fn resolve_location(
    requested: Option<&str>,
    app_config: &AppConfig,
    series: &ForecastSeries,
) -> Result<Location> {
    if let Some(key) = requested {
        return Ok(app_config.locations.get(key)?.clone());
    }

    let keys = app_config.locations.keys();
    match keys.len() {
        0 => {
            let key = series
                .metadata()
                .location
                .clone()
                .ok_or_else(|| CliError::NotFound("no --location given and the forecast names none".to_string()))?;
            print_warning(&format!(
                "No locations configured, using '{}' in {}",
                key,
                app_config.display_timezone.name()
            ));
            Ok(Location::new(key, app_config.display_timezone.name(), None))
        }
        1 => Ok(app_config.locations.get(keys[0])?.clone()),
        _ => {
            let default = series
                .metadata()
                .location
                .as_deref()
                .and_then(|l| keys.iter().position(|k| *k == l))
                .unwrap_or(0);

            let idx = Select::new()
                .with_prompt("Select location")
                .items(&keys)
                .default(default)
                .interact_opt()
                .map_err(|e| CliError::IoError(e.to_string()))?
                .ok_or(CliError::UserCancelled)?;

            Ok(app_config.locations.get(keys[idx])?.clone())
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::forecast::LocationRegistry;
    use crate::forecast::types::test_support::*;

    #[test]
    fn test_explicit_location_must_be_registered() {
        let app_config = AppConfig {
            locations: LocationRegistry::from_locations(vec![Location::new("butimanu", "Europe/Bucharest", None)])
                .unwrap(),
            ..Default::default()
        };
        let series = base_series(start_of(2025, 7, 3), 4, false);

        let location = resolve_location(Some("butimanu"), &app_config, &series).unwrap();
        assert_eq!(location.timezone, "Europe/Bucharest");
        assert!(resolve_location(Some("elsewhere"), &app_config, &series).is_err());
    }

    #[test]
    fn test_single_registered_location_is_used() {
        let app_config = AppConfig {
            locations: LocationRegistry::from_locations(vec![Location::new("lab", "UTC", Some(5.0))]).unwrap(),
            ..Default::default()
        };
        let series = base_series(start_of(2025, 7, 3), 4, false);

        let location = resolve_location(None, &app_config, &series).unwrap();
        assert_eq!(location.key, "lab");
    }

    #[test]
    fn test_falls_back_to_forecast_location() {
        let series = base_series(start_of(2025, 7, 3), 4, false);
        let location = resolve_location(None, &AppConfig::default(), &series).unwrap();

        assert_eq!(location.key, "butimanu");
        assert_eq!(location.timezone, "Europe/Berlin");
        assert_eq!(location.capacity_kw, None);
    }
}
