use chrono::{DateTime, Datelike, Duration, Timelike, Utc};
use chrono_tz::Tz;
use std::fs::{self, File};
use std::path::{Path, PathBuf};
use tracing::{error, info, warn};

use crate::csv_export::columns::{hourly_header, interval_header};
use crate::csv_export::config::{CSV_TIMESTAMP_FORMAT, CsvExportConfig};
use crate::forecast::{ForecastSeries, Location, Resolution, ResolutionMap, TimeSeriesPoint};
use crate::utils::commons::round_to;
use crate::utils::errors::{ForecastError, ForecastResult};

/// Header plus rendered rows for one resolution
#[derive(Debug, Clone, PartialEq)]
pub struct CsvTable {
    pub header: Vec<&'static str>,
    pub rows: Vec<Vec<String>>,
}

/// Write one CSV per resolution into `output_dir`.
///
/// A file that fails to write is logged and left out of the returned paths. Fails when no file
/// could be written at all.
pub fn export(
    map: &ResolutionMap,
    location: &Location,
    output_dir: &Path,
    generated_at: DateTime<Utc>,
    config: &CsvExportConfig,
) -> ForecastResult<Vec<PathBuf>> {
    fs::create_dir_all(output_dir)?;
    let tz = location.tz()?;

    let mut exported = Vec::new();

    for (resolution, series) in map {
        let path = output_dir.join(export_file_name(&location.key, *resolution, generated_at));
        let table = series_table(series, tz, config);

        match write_table(&table, &path) {
            Ok(()) => {
                info!("Exported {} forecast to: {}", resolution, path.display());
                exported.push(path);
            }
            Err(e) => error!("Failed to export {} forecast to {}: {}", resolution, path.display(), e),
        }
    }

    if exported.is_empty() {
        return Err(ForecastError::export(format!(
            "no CSV files written for location '{}'",
            location.key
        )));
    }

    Ok(exported)
}

/// `{location}_{resolution}_{YYYYMMDD_HHMMSS}.csv`
pub fn export_file_name(location_key: &str, resolution: Resolution, generated_at: DateTime<Utc>) -> String {
    format!(
        "{}_{}_{}.csv",
        location_key,
        resolution,
        generated_at.format("%Y%m%d_%H%M%S")
    )
}

/// Render a series in the layout for its resolution
pub fn series_table(series: &ForecastSeries, tz: Tz, config: &CsvExportConfig) -> CsvTable {
    if series.resolution() == Resolution::OneHour {
        hourly_table(series, tz, config)
    } else {
        interval_table(series, tz, config)
    }
}

fn hourly_table(series: &ForecastSeries, tz: Tz, config: &CsvExportConfig) -> CsvTable {
    let num = |v: f64| round_to(v, config.decimals).to_string();

    let windows: Vec<(DateTime<Tz>, DateTime<Tz>)> = series
        .points()
        .iter()
        .map(|p| {
            let start = local_time(p.timestamp, tz, config);
            (start, start + Duration::hours(1))
        })
        .collect();

    let with_day_end = windows.iter().any(|(start, end)| start.day() != end.day());

    let rows = series
        .points()
        .iter()
        .zip(&windows)
        .map(|(point, (start, end))| {
            let mut row = vec![
                start.format(CSV_TIMESTAMP_FORMAT).to_string(),
                start.year().to_string(),
                start.month().to_string(),
                start.day().to_string(),
                start.hour().to_string(),
                end.hour().to_string(),
            ];
            if with_day_end {
                row.push(end.day().to_string());
            }
            row.push((start.hour() + 1).to_string());
            row.push(num(point.production_kw));
            // One hour at constant power: kW equals kWh
            let energy_kwh = point
                .energy_mwh
                .map(|e| e * config.kwh_per_mwh)
                .unwrap_or(point.production_kw);
            row.push(num(energy_kwh));
            row.extend(point.quantiles.values().map(num));
            row
        })
        .collect();

    CsvTable {
        header: hourly_header(with_day_end),
        rows,
    }
}

fn interval_table(series: &ForecastSeries, tz: Tz, config: &CsvExportConfig) -> CsvTable {
    let with_energy = series.has_energy();
    let with_energy_quantiles = series.has_energy_quantiles();
    let metadata = series.metadata();
    let forecast_timestamp = metadata
        .forecast_timestamp
        .map(|ts| ts.format("%Y-%m-%d %H:%M:%S%:z").to_string());

    let rows = series
        .points()
        .iter()
        .map(|point| {
            let mut row = vec![local_time(point.timestamp, tz, config)
                .format(CSV_TIMESTAMP_FORMAT)
                .to_string()];
            row.extend(power_cells(point, config));
            if with_energy {
                row.push(energy_cell(point.energy_mwh, config));
            }
            if with_energy_quantiles {
                row.extend(energy_quantile_cells(point, config));
            }
            if let Some(ts) = &forecast_timestamp {
                row.push(ts.clone());
            }
            if let Some(minutes) = metadata.resolution_minutes {
                row.push(minutes.to_string());
            }
            row
        })
        .collect();

    CsvTable {
        header: interval_header(
            with_energy,
            with_energy_quantiles,
            forecast_timestamp.is_some(),
            metadata.resolution_minutes.is_some(),
        ),
        rows,
    }
}

fn local_time(timestamp: DateTime<Utc>, tz: Tz, config: &CsvExportConfig) -> DateTime<Tz> {
    timestamp.with_timezone(&tz) + Duration::hours(config.local_time_offset_hours)
}

fn power_cells(point: &TimeSeriesPoint, config: &CsvExportConfig) -> Vec<String> {
    std::iter::once(point.production_kw)
        .chain(point.quantiles.values())
        .map(|v| round_to(v, config.decimals).to_string())
        .collect()
}

fn energy_cell(energy_mwh: Option<f64>, config: &CsvExportConfig) -> String {
    energy_mwh
        .map(|e| round_to(e * config.kwh_per_mwh, config.decimals).to_string())
        .unwrap_or_default()
}

fn energy_quantile_cells(point: &TimeSeriesPoint, config: &CsvExportConfig) -> Vec<String> {
    match point.energy_quantiles_mwh {
        Some(quantiles) => quantiles
            .values()
            .into_iter()
            .map(|v| energy_cell(Some(v), config))
            .collect(),
        None => vec![String::new(); 5],
    }
}

/// Write through a sibling temporary file so a failed write never leaves a partial CSV at `path`
fn write_table(table: &CsvTable, path: &Path) -> ForecastResult<()> {
    let partial = partial_path(path);

    let result = write_records(table, &partial)
        .and_then(|()| fs::rename(&partial, path).map_err(ForecastError::from));
    if result.is_err() && partial.exists() {
        if let Err(e) = fs::remove_file(&partial) {
            warn!("Could not remove partial file {}: {}", partial.display(), e);
        }
    }
    result
}

fn partial_path(path: &Path) -> PathBuf {
    let mut name = path.file_name().map(|n| n.to_os_string()).unwrap_or_default();
    name.push(".partial");
    path.with_file_name(name)
}

fn write_records(table: &CsvTable, path: &Path) -> ForecastResult<()> {
    let mut writer = csv::Writer::from_writer(File::create(path)?);
    writer.write_record(&table.header)?;
    for row in &table.rows {
        writer.write_record(row)?;
    }
    writer.flush()?;
    Ok(())
}
