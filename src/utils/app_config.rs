use anyhow::{Context, Result};
use chrono_tz::Tz;
use dotenvy::dotenv;
use std::env;
use std::path::PathBuf;

use crate::aggregators::config::PartialBucketPolicy;
use crate::forecast::location::LocationRegistry;
use crate::forecast::resolution::Resolution;
use crate::utils::commons::parse_timezone;

pub const DEFAULT_OUTPUT_DIR: &str = "data_output/intraday";
pub const DEFAULT_DISPLAY_TIMEZONE: &str = "Europe/Berlin";
pub const DEFAULT_DISPLAY_TIMEZONE_NAME: &str = "CET/CEST";
pub const DEFAULT_TIMEZONE_NOTICE: &str =
    "Timestamps are UTC; delivery windows are shown in Central European Time (CET/CEST)";
pub const DEFAULT_HORIZON_DAYS: u32 = 7;

#[derive(Debug, Clone)]
pub struct AppConfig {
    pub output_dir: PathBuf,
    pub display_timezone: Tz,
    pub display_timezone_name: String,
    pub timezone_notice: String,
    /// Raw resolution identifiers, validated by the aggregator so unknown entries are only skipped
    pub aggregation_levels: Vec<String>,
    pub horizon_days: u32,
    pub partial_buckets: PartialBucketPolicy,
    pub locations: LocationRegistry,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            output_dir: PathBuf::from(DEFAULT_OUTPUT_DIR),
            display_timezone: chrono_tz::Europe::Berlin,
            display_timezone_name: DEFAULT_DISPLAY_TIMEZONE_NAME.to_string(),
            timezone_notice: DEFAULT_TIMEZONE_NOTICE.to_string(),
            aggregation_levels: Resolution::ALL.iter().map(|r| r.to_string()).collect(),
            horizon_days: DEFAULT_HORIZON_DAYS,
            partial_buckets: PartialBucketPolicy::Keep,
            locations: LocationRegistry::default(),
        }
    }
}

impl AppConfig {
    pub fn new(output_dir: PathBuf, display_timezone: Tz, locations: LocationRegistry) -> Self {
        Self {
            output_dir,
            display_timezone,
            locations,
            ..Default::default()
        }
    }

    pub fn from_env() -> Result<Self> {
        let _ = dotenv();

        let mut config = Self::default();

        if let Ok(dir) = env::var("FORECAST_OUTPUT_DIR") {
            config.output_dir = PathBuf::from(dir);
        }

        let tz_name = env::var("DISPLAY_TIMEZONE").unwrap_or_else(|_| DEFAULT_DISPLAY_TIMEZONE.to_string());
        config.display_timezone = parse_timezone(&tz_name)?;

        if let Ok(name) = env::var("DISPLAY_TIMEZONE_NAME") {
            config.display_timezone_name = name;
        }
        if let Ok(notice) = env::var("TIMEZONE_NOTICE") {
            config.timezone_notice = notice;
        }

        if let Ok(levels) = env::var("AGGREGATION_LEVELS") {
            config.aggregation_levels = parse_levels(&levels);
        }

        if let Ok(days) = env::var("FORECAST_HORIZON_DAYS") {
            config.horizon_days = days
                .trim()
                .parse()
                .with_context(|| format!("FORECAST_HORIZON_DAYS is not a number: {}", days))?;
        }

        if let Ok(policy) = env::var("PARTIAL_BUCKETS") {
            config.partial_buckets = policy.parse()?;
        }

        match env::var("LOCATIONS_FILE") {
            Ok(path) => {
                config.locations = LocationRegistry::from_json_file(&path)
                    .with_context(|| format!("Failed to load locations from {}", path))?;
            }
            Err(_) => {
                tracing::warn!("LOCATIONS_FILE not set in environment, no locations configured");
            }
        }

        Ok(config)
    }
}

fn parse_levels(raw: &str) -> Vec<String> {
    raw.split(',')
        .map(|s| s.trim())
        .filter(|s| !s.is_empty())
        .map(|s| s.to_string())
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config() {
        let config = AppConfig::default();
        assert_eq!(config.horizon_days, 7);
        assert_eq!(config.partial_buckets, PartialBucketPolicy::Keep);
        assert_eq!(config.display_timezone, chrono_tz::Europe::Berlin);
        assert_eq!(
            config.aggregation_levels,
            vec!["15min", "30min", "1hour", "3hour", "6hour", "1day"]
        );
        assert!(config.locations.is_empty());
    }

    #[test]
    fn test_parse_levels_trims_and_skips_blanks() {
        assert_eq!(parse_levels(" 15min, 1hour ,,1day"), vec!["15min", "1hour", "1day"]);
        assert!(parse_levels("").is_empty());
    }
}
