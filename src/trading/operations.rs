use chrono::{Duration, Timelike};
use chrono_tz::Tz;
use std::fs::{self, File};
use std::path::{Path, PathBuf};
use tracing::info;

use crate::forecast::{ForecastSeries, Resolution, TimeSeriesPoint};
use crate::trading::config::TradingConfig;
use crate::trading::types::{TRADING_COLUMNS, TradingRow, TradingSeries};
use crate::utils::errors::{ForecastError, ForecastResult};

/// Build the hourly trading view in the display timezone.
///
/// Local times come from converting each UTC instant, which is total, so hours repeated or
/// skipped by a daylight-saving change still map to exactly one local timestamp each.
pub fn to_trading_view(
    series: &ForecastSeries,
    display_timezone: Tz,
    config: &TradingConfig,
) -> ForecastResult<TradingSeries> {
    if series.resolution() != Resolution::OneHour {
        return Err(ForecastError::config(format!(
            "trading view needs an hourly series, got {}",
            series.resolution()
        )));
    }

    let rows = series
        .points()
        .iter()
        .map(|point| trading_row(point, display_timezone, config))
        .collect();

    Ok(TradingSeries {
        timezone: display_timezone,
        rows,
    })
}

fn trading_row(point: &TimeSeriesPoint, tz: Tz, config: &TradingConfig) -> TradingRow {
    let start_local = point.timestamp.with_timezone(&tz);
    let end_local = (point.timestamp + Duration::hours(1)).with_timezone(&tz);

    // One hour at constant power: kW equals kWh
    let energy_kwh = point
        .energy_mwh
        .map(|e| e * config.kwh_per_mwh)
        .unwrap_or(point.production_kw);
    let (energy_p10_kwh, energy_p90_kwh) = match point.energy_quantiles_mwh {
        Some(q) => (q.p10 * config.kwh_per_mwh, q.p90 * config.kwh_per_mwh),
        None => (point.quantiles.p10, point.quantiles.p90),
    };

    let forecast_uncertainty = point.quantiles.spread();

    TradingRow {
        delivery_start_local: start_local.fixed_offset(),
        delivery_end_local: end_local.fixed_offset(),
        market_hour: start_local.hour() + 1,
        production_kw: point.production_kw,
        energy_kwh,
        q10: point.quantiles.p10,
        q25: point.quantiles.p25,
        q50: point.quantiles.p50,
        q75: point.quantiles.p75,
        q90: point.quantiles.p90,
        energy_p10_kwh,
        energy_p90_kwh,
        forecast_uncertainty,
        relative_uncertainty: forecast_uncertainty
            / (point.production_kw + config.relative_uncertainty_epsilon_kw),
    }
}

/// Write the trading view as CSV with the fixed column order
pub fn write_trading_csv(view: &TradingSeries, path: &Path) -> ForecastResult<PathBuf> {
    if let Some(parent) = path.parent() {
        if !parent.as_os_str().is_empty() {
            fs::create_dir_all(parent)?;
        }
    }

    let mut writer = csv::Writer::from_writer(File::create(path)?);
    if view.rows.is_empty() {
        writer.write_record(TRADING_COLUMNS)?;
    }
    for row in &view.rows {
        writer.serialize(row)?;
    }
    writer.flush()?;

    info!("Exported trading view ({} hours) to: {}", view.len(), path.display());
    Ok(path.to_path_buf())
}
