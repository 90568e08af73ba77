use chrono::{DateTime, SecondsFormat, Utc};
use std::path::{Path, PathBuf};
use tracing::info;

use crate::api_format::config::ApiFormatConfig;
use crate::api_format::types::{ApiPoint, DATA_TIMEZONE, Payload, PayloadMetadata, ResolutionPayload, UncertaintyBands};
use crate::forecast::{ForecastSeries, ResolutionMap, TimeSeriesPoint};
use crate::utils::commons::{round_to, write_json_pretty};
use crate::utils::errors::ForecastResult;

pub fn to_api_payload(
    map: &ResolutionMap,
    location_key: &str,
    generated_at: DateTime<Utc>,
    config: &ApiFormatConfig,
) -> Payload {
    let metadata = PayloadMetadata {
        location: location_key.to_string(),
        forecast_timestamp: generated_at.to_rfc3339_opts(SecondsFormat::AutoSi, false),
        forecast_horizon_days: config.horizon_days,
        available_resolutions: map.keys().copied().collect(),
        data_timezone: DATA_TIMEZONE.to_string(),
        display_timezone: config.display_timezone.clone(),
        display_timezone_name: config.display_timezone_name.clone(),
        timezone_notice: config.timezone_notice.clone(),
    };

    let forecasts = map
        .iter()
        .map(|(resolution, series)| (*resolution, resolution_payload(series, config)))
        .collect();

    Payload { metadata, forecasts }
}

fn resolution_payload(series: &ForecastSeries, config: &ApiFormatConfig) -> ResolutionPayload {
    let data: Vec<ApiPoint> = series
        .points()
        .iter()
        .map(|point| api_point(point, config))
        .collect();

    ResolutionPayload {
        resolution_minutes: series.resolution().minutes(),
        data_points: data.len(),
        data,
    }
}

fn api_point(point: &TimeSeriesPoint, config: &ApiFormatConfig) -> ApiPoint {
    let power = |v: f64| round_to(v, config.power_decimals);
    let energy = |v: f64| round_to(v * config.kwh_per_mwh, config.energy_decimals);

    let energy_kwh = point.energy_mwh.map(energy);
    let energy_uncertainty_bands = point
        .energy_quantiles_mwh
        .map(|q| UncertaintyBands::from(q.map(energy)));

    ApiPoint {
        timestamp: point.timestamp.to_rfc3339_opts(SecondsFormat::Secs, false),
        production_kw: power(point.production_kw),
        uncertainty_bands: UncertaintyBands::from(point.quantiles.map(power)),
        energy_kwh,
        energy_uncertainty_bands,
    }
}

/// Write the payload as pretty-printed JSON
pub fn write_payload_json(payload: &Payload, path: &Path) -> ForecastResult<PathBuf> {
    write_json_pretty(payload, path)?;
    info!("API payload exported to: {}", path.display());
    Ok(path.to_path_buf())
}
